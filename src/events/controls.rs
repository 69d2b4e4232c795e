use crate::dom::ListenerSet;
use crate::overlay::OverlayAction;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::viewer::Viewer;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Nearest `data-action` value at or above the event target.
pub fn action_of(ev: &web::Event) -> Option<String> {
    let el = ev.target()?.dyn_into::<web::Element>().ok()?;
    let el = el.closest("[data-action]").ok()??;
    el.get_attribute("data-action")
}

/// One delegated click listener for every overlay button; the overlay's
/// markup is replaced on change, so buttons never hold their own listeners.
pub fn wire_overlay(listeners: &mut ListenerSet, root: &web::Element, viewer: &Rc<RefCell<Viewer>>) {
    let v = viewer.clone();
    listeners.on(root.as_ref(), "click", move |ev: web::MouseEvent| {
        let Some(action) = action_of(&ev).as_deref().and_then(OverlayAction::parse) else {
            return;
        };
        ev.stop_propagation();
        let mut viewer = v.borrow_mut();
        match action {
            OverlayAction::ToggleHotspots => {
                viewer.toggle_hotspots();
            }
            OverlayAction::ToggleCollapsed => {
                viewer.toggle_collapsed();
            }
            OverlayAction::Close => {
                viewer.close_panel();
            }
        }
    });
}

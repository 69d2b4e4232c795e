use crate::dom::ListenerSet;
use crate::input::{action_for_key, is_editable_tag, KeyAction};
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::viewer::Viewer;
use wasm_bindgen::JsCast;
use web_sys as web;

fn from_editable(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| is_editable_tag(&el.tag_name()))
        .unwrap_or(false)
}

pub fn wire(listeners: &mut ListenerSet, document: &web::Document, viewer: &Rc<RefCell<Viewer>>) {
    let v = viewer.clone();
    listeners.on(document.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
        if ev.repeat() || from_editable(&ev) {
            return;
        }
        let Some(action) = action_for_key(&ev.key()) else {
            return;
        };
        let mut viewer = v.borrow_mut();
        let handled = match action {
            KeyAction::ClosePanel => viewer.close_panel(),
            KeyAction::ToggleHotspots => viewer.toggle_hotspots(),
        };
        if handled {
            log::info!("[input] key {:?}", action);
        }
    });
}

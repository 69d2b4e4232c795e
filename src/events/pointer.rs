use crate::dom::{self, ListenerSet};
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::viewer::{ClickOutcome, Viewer};
use web_sys as web;

fn canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> glam::Vec2 {
    let rect = canvas.get_bounding_client_rect();
    input::pointer_css_px(ev.client_x() as f64, ev.client_y() as f64, &rect)
}

/// Drag-to-rotate, wheel-to-zoom and click-to-select on the canvas.
pub fn wire(
    listeners: &mut ListenerSet,
    canvas: &web::HtmlCanvasElement,
    viewer: &Rc<RefCell<Viewer>>,
) {
    let target: &web::EventTarget = canvas.as_ref();

    let (v, c) = (viewer.clone(), canvas.clone());
    listeners.on(target, "pointerdown", move |ev: web::PointerEvent| {
        v.borrow_mut().pointer_down(canvas_px(&ev, &c));
    });

    let (v, c) = (viewer.clone(), canvas.clone());
    listeners.on(target, "pointermove", move |ev: web::PointerEvent| {
        v.borrow_mut().pointer_move(canvas_px(&ev, &c));
    });

    let v = viewer.clone();
    listeners.on(target, "pointerup", move |_: web::PointerEvent| {
        v.borrow_mut().pointer_up();
    });

    let v = viewer.clone();
    listeners.on(target, "pointerleave", move |_: web::PointerEvent| {
        v.borrow_mut().pointer_leave();
    });

    let v = viewer.clone();
    listeners.on_active(target, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        v.borrow_mut()
            .wheel(input::wheel_delta_px(ev.delta_y(), ev.delta_mode()));
    });

    let (v, c) = (viewer.clone(), canvas.clone());
    listeners.on(target, "click", move |ev: web::MouseEvent| {
        let (ndc, aspect) = input::mouse_ndc(&ev, &c);
        match v.borrow_mut().click(ndc, aspect) {
            ClickOutcome::Selected(id) => {
                log::info!("[input] click ({:.2},{:.2}) selected '{}'", ndc.x, ndc.y, id)
            }
            ClickOutcome::Missed => log::debug!("[input] click ({:.2},{:.2}) missed", ndc.x, ndc.y),
            ClickOutcome::Ignored => {}
        }
    });

    if let Some(window) = web::window() {
        let c = canvas.clone();
        listeners.on(window.as_ref(), "resize", move |_: web::Event| {
            dom::sync_canvas_backing_size(&c);
        });
    }
}

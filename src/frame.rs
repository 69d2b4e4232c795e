use crate::overlay::{self, OverlayDom};
use crate::render::GpuState;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use viewer_core::viewer::Viewer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub viewer: Rc<RefCell<Viewer>>,
    pub gpu: Rc<RefCell<Option<GpuState>>>,
    pub canvas: web::HtmlCanvasElement,
    pub overlay: OverlayDom,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let time_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let out = self.viewer.borrow_mut().frame(time_ms);

        if let Some(gpu) = self.gpu.borrow_mut().as_mut() {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            match gpu.render(out.as_ref()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        }

        let viewer = self.viewer.borrow();
        self.overlay.sync(&viewer.overlay());
        match overlay::status_text(&viewer.status()) {
            Some((text, error)) => self.overlay.set_status(Some(&text), error),
            None => self.overlay.set_status(None, false),
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running `requestAnimationFrame` chain that can be stopped.
pub struct FrameLoop {
    tick: Tick,
    handle: Rc<Cell<Option<i32>>>,
}

fn schedule(tick: &Tick, handle: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::error!("[viewer] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let handle = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let handle_clone = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        handle_clone.set(None);
        frame_ctx.borrow_mut().frame();
        schedule(&tick_clone, &handle_clone);
    }) as Box<dyn FnMut()>));
    schedule(&tick, &handle);
    FrameLoop { tick, handle }
}

impl FrameLoop {
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // Breaks the closure's reference cycle with itself.
        self.tick.borrow_mut().take();
    }
}

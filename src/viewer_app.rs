//! One mounted 3D hotspot viewer: DOM, listeners, frame loop and load task.

use crate::constants::{CANVAS_CLASS, OVERLAY_CLASS, ROOT_CLASS, STATUS_CLASS, WIDGET_CSS};
use crate::dom::{self, ListenerSet};
use crate::events;
use crate::frame::{self, FrameContext, FrameLoop};
use crate::loader::{self, Abortable};
use crate::mesh;
use crate::overlay::OverlayDom;
use crate::render::GpuState;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::catalog::DroneModel;
use viewer_core::error::ViewerError;
use viewer_core::lifecycle::LoadTicket;
use viewer_core::viewer::{Viewer, ViewerConfig, ViewerStatus};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct ViewerApp {
    viewer: Rc<RefCell<Viewer>>,
    gpu: Rc<RefCell<Option<GpuState>>>,
    listeners: ListenerSet,
    frame_loop: FrameLoop,
    fetch: Abortable,
    nodes: Vec<web::Element>,
}

impl ViewerApp {
    pub fn mount(container_id: &str, model: DroneModel) -> anyhow::Result<Self> {
        let config = model.config()?;
        Self::mount_with(container_id, config)
    }

    pub fn mount_with(container_id: &str, config: ViewerConfig) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let container = dom::container(&document, container_id)?;

        let style = dom::append_element(&document, &container, "style", "")?;
        style.set_text_content(Some(WIDGET_CSS));
        let root = dom::append_element(&document, &container, "div", ROOT_CLASS)?;
        let canvas: web::HtmlCanvasElement = dom::append_element(&document, &root, "canvas", CANVAS_CLASS)?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let overlay_root = dom::append_element(&document, &root, "div", OVERLAY_CLASS)?;
        let status = dom::append_element(&document, &root, "div", STATUS_CLASS)?;
        dom::sync_canvas_backing_size(&canvas);

        let url = config.asset_path.clone();
        let mut viewer = Viewer::new(config);
        let ticket = viewer.begin_load()?;
        let viewer = Rc::new(RefCell::new(viewer));
        let gpu: Rc<RefCell<Option<GpuState>>> = Rc::new(RefCell::new(None));

        let mut listeners = ListenerSet::new();
        events::pointer::wire(&mut listeners, &canvas, &viewer);
        events::keyboard::wire(&mut listeners, &document, &viewer);
        events::controls::wire_overlay(&mut listeners, &overlay_root, &viewer);
        log::info!("[viewer] mounted '{}' with {} listeners", url, listeners.len());

        let frame_ctx = Rc::new(RefCell::new(FrameContext {
            viewer: viewer.clone(),
            gpu: gpu.clone(),
            canvas: canvas.clone(),
            overlay: OverlayDom::new(overlay_root, status),
            started: Instant::now(),
        }));
        let frame_loop = frame::start_loop(frame_ctx);

        let fetch = Abortable::new();
        spawn_local(load_model(
            viewer.clone(),
            gpu.clone(),
            canvas,
            ticket,
            url,
            fetch.signal(),
        ));

        Ok(Self {
            viewer,
            gpu,
            listeners,
            frame_loop,
            fetch,
            nodes: vec![style, root],
        })
    }

    pub fn viewer(&self) -> &Rc<RefCell<Viewer>> {
        &self.viewer
    }

    /// Stops rendering, drops listeners and releases GPU resources.
    /// Calling it twice is harmless.
    pub fn destroy(&mut self) {
        self.frame_loop.cancel();
        self.listeners.clear();
        self.fetch.abort();
        self.viewer.borrow_mut().teardown();
        if let Some(gpu) = self.gpu.borrow_mut().take() {
            gpu.destroy();
        }
        for node in self.nodes.drain(..) {
            node.remove();
        }
    }
}

impl Drop for ViewerApp {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn torn_down(viewer: &RefCell<Viewer>) -> bool {
    matches!(viewer.borrow().status(), ViewerStatus::TornDown)
}

async fn load_model(
    viewer: Rc<RefCell<Viewer>>,
    gpu: Rc<RefCell<Option<GpuState>>>,
    canvas: web::HtmlCanvasElement,
    ticket: LoadTicket,
    url: String,
    signal: Option<web::AbortSignal>,
) {
    let state = match GpuState::new(&canvas).await {
        Ok(s) => s,
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            viewer
                .borrow_mut()
                .fail_load(ticket, ViewerError::asset_load("WebGPU", e));
            return;
        }
    };
    if torn_down(&viewer) {
        state.destroy();
        return;
    }
    *gpu.borrow_mut() = Some(state);

    let bytes = match loader::fetch_bytes(&url, signal.as_ref()).await {
        Ok(b) => b,
        Err(e) => {
            log::error!("[load] {}", e);
            viewer.borrow_mut().fail_load(ticket, e);
            return;
        }
    };
    if torn_down(&viewer) {
        return;
    }
    let mesh = match mesh::load_glb(&bytes, &url) {
        Ok(m) => m,
        Err(e) => {
            log::error!("[load] {:#}", e);
            viewer
                .borrow_mut()
                .fail_load(ticket, ViewerError::asset_load(url.as_str(), format!("{e:#}")));
            return;
        }
    };
    if !viewer.borrow_mut().finish_load(ticket, mesh.bounds) {
        return;
    }
    if let Some(g) = gpu.borrow_mut().as_mut() {
        g.upload_model(&mesh);
    }
}

#![cfg(target_arch = "wasm32")]
//! Browser front-end: WebGPU hotspot viewer and WebAudio drone simulator,
//! each mounted into a page element and torn down through its handle.

use viewer_core::catalog::DroneModel;
use wasm_bindgen::prelude::*;

mod audio;
mod constants;
mod dom;
mod dsp;
mod events;
mod frame;
mod input;
mod loader;
mod mesh;
mod overlay;
mod render;
mod simulator_app;
mod simulator_ui;
mod viewer_app;

use simulator_app::SimulatorApp;
use viewer_app::ViewerApp;

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("aalis-viewer starting");
    Ok(())
}

/// Handle to a mounted viewer. `destroy()` releases everything it created.
#[wasm_bindgen]
pub struct ViewerHandle {
    app: Option<ViewerApp>,
}

#[wasm_bindgen]
impl ViewerHandle {
    pub fn destroy(&mut self) {
        if let Some(mut app) = self.app.take() {
            app.destroy();
        }
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.app
            .as_ref()
            .map(|a| a.viewer().borrow().is_ready())
            .unwrap_or(false)
    }

    /// Id of the open hotspot, if any.
    pub fn selection(&self) -> Option<String> {
        let app = self.app.as_ref()?;
        let viewer = app.viewer().borrow();
        viewer.selection().id().map(str::to_owned)
    }
}

/// Mounts a viewer for one of the built-in drone models (`shahed`, `mq9`,
/// `rq170`, `usnt-hawk`) into the element with id `container_id`.
#[wasm_bindgen(js_name = mountViewer)]
pub fn mount_viewer(container_id: &str, model: &str) -> Result<ViewerHandle, JsValue> {
    let model: DroneModel = model
        .parse()
        .map_err(|e: viewer_core::error::ViewerError| JsValue::from_str(&e.to_string()))?;
    let app = ViewerApp::mount(container_id, model).map_err(to_js)?;
    Ok(ViewerHandle { app: Some(app) })
}

#[wasm_bindgen]
pub struct SimulatorHandle {
    app: Option<SimulatorApp>,
}

#[wasm_bindgen]
impl SimulatorHandle {
    pub fn destroy(&mut self) {
        if let Some(mut app) = self.app.take() {
            app.destroy();
        }
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.app.as_ref().map(|a| a.view().playing).unwrap_or(false)
    }
}

/// Mounts the sound simulator; `audio_src` defaults to the bundled loop.
#[wasm_bindgen(js_name = mountSimulator)]
pub fn mount_simulator(
    container_id: &str,
    audio_src: Option<String>,
) -> Result<SimulatorHandle, JsValue> {
    let app = SimulatorApp::mount(container_id, audio_src.as_deref()).map_err(to_js)?;
    Ok(SimulatorHandle { app: Some(app) })
}

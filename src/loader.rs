//! Asset fetching for the viewer and the simulator.

use js_sys::{ArrayBuffer, Uint8Array};
use viewer_core::error::ViewerError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// A fetch that can be cancelled when its owner is torn down.
pub struct Abortable {
    controller: Option<web::AbortController>,
}

impl Abortable {
    pub fn new() -> Self {
        let controller = web::AbortController::new()
            .map_err(|e| log::warn!("[load] AbortController unavailable: {:?}", e))
            .ok();
        Self { controller }
    }

    pub fn signal(&self) -> Option<web::AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }

    pub fn abort(&self) {
        if let Some(c) = &self.controller {
            c.abort();
        }
    }
}

impl Default for Abortable {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_buffer(url: &str, signal: Option<&web::AbortSignal>) -> Result<ArrayBuffer, ViewerError> {
    let window = web::window().ok_or_else(|| ViewerError::asset_load(url, "no window"))?;
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_signal(signal);
    let resp_val = JsFuture::from(window.fetch_with_str_and_init(url, &opts))
        .await
        .map_err(|e| ViewerError::asset_load(url, format!("fetch error: {e:?}")))?;
    let resp: web::Response = resp_val
        .dyn_into()
        .map_err(|_| ViewerError::asset_load(url, "not a Response"))?;
    if !resp.ok() {
        return Err(ViewerError::asset_load(url, format!("HTTP {}", resp.status())));
    }
    let promise = resp
        .array_buffer()
        .map_err(|e| ViewerError::asset_load(url, format!("{e:?}")))?;
    let buf = JsFuture::from(promise)
        .await
        .map_err(|e| ViewerError::asset_load(url, format!("read error: {e:?}")))?;
    buf.dyn_into::<ArrayBuffer>()
        .map_err(|_| ViewerError::asset_load(url, "body is not an ArrayBuffer"))
}

pub async fn fetch_bytes(url: &str, signal: Option<&web::AbortSignal>) -> Result<Vec<u8>, ViewerError> {
    let buf = fetch_buffer(url, signal).await?;
    let bytes = Uint8Array::new(&buf).to_vec();
    log::info!("[load] {} ({} bytes)", url, bytes.len());
    Ok(bytes)
}

/// Fetches and decodes an audio file into `ctx`'s sample rate.
pub async fn fetch_audio(
    ctx: &web::AudioContext,
    url: &str,
    signal: Option<&web::AbortSignal>,
) -> Result<web::AudioBuffer, ViewerError> {
    let buf = fetch_buffer(url, signal).await?;
    let promise = ctx
        .decode_audio_data(&buf)
        .map_err(|e| ViewerError::asset_load(url, format!("{e:?}")))?;
    let decoded = JsFuture::from(promise)
        .await
        .map_err(|e| ViewerError::asset_load(url, format!("decode error: {e:?}")))?;
    let audio: web::AudioBuffer = decoded
        .dyn_into()
        .map_err(|_| ViewerError::asset_load(url, "not an AudioBuffer"))?;
    log::info!(
        "[load] {} decoded: {:.2}s, {} ch",
        url,
        audio.duration(),
        audio.number_of_channels()
    );
    Ok(audio)
}

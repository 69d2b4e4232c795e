// Web front-end constants: colors, lighting, audio graph defaults and DOM ids.
//
// Engine tuning (camera, zoom, markers) lives in `viewer_core::constants`.

// Renderer
pub const CLEAR_COLOR: [f64; 3] = [0.102, 0.102, 0.102]; // #1a1a1a
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const KEY_LIGHT_DIR: [f32; 3] = [10.0, 10.0, 5.0]; // toward the light
pub const KEY_LIGHT_INTENSITY: f32 = 0.8;
pub const FILL_LIGHT_DIR: [f32; 3] = [-10.0, 5.0, -5.0];
pub const FILL_LIGHT_INTENSITY: f32 = 0.4;
pub const MARKER_CAPACITY: usize = 32;

// Audio graph
pub const DEFAULT_AUDIO_SRC: &str = "/drone-fly-short.mp3";
pub const INITIAL_GAIN: f32 = 0.5;
pub const INITIAL_CUTOFF_HZ: f32 = 8000.0;
pub const INITIAL_DISTORTION: f32 = 0.1;
pub const REVERB_DECAY_SEC: f32 = 2.0;
pub const DISTORTION_CURVE_LEN: usize = 4096;
pub const CENTS_PER_SEMITONE: f32 = 100.0;

// DOM
pub const CANVAS_CLASS: &str = "viewer-canvas";
pub const OVERLAY_CLASS: &str = "viewer-overlay";
pub const STATUS_CLASS: &str = "viewer-status";
pub const SIMULATOR_CLASS: &str = "drone-simulator";

/// Layout for the elements a mounted viewer or simulator creates.
pub const WIDGET_CSS: &str = "\
.viewer-root{position:relative;width:100%;height:100%;overflow:hidden;background:#1a1a1a}\
.viewer-canvas{display:block;width:100%;height:100%;touch-action:none}\
.viewer-overlay{position:absolute;inset:0;pointer-events:none;font-family:sans-serif;color:#fff}\
.viewer-overlay button,.hotspot-panel{pointer-events:auto}\
.hotspot-toggle{position:absolute;top:1rem;left:1rem;padding:.5rem 1rem;border:0;border-radius:.5rem;background:rgba(0,0,0,.6);color:#fff;cursor:pointer}\
.hotspot-panel{position:absolute;top:1rem;right:1rem;max-width:24rem;max-height:80%;overflow:auto;padding:1rem;border-radius:.5rem;background:rgba(0,0,0,.75)}\
.hotspot-panel.collapsed{padding:.25rem}\
.panel-header{display:flex;justify-content:space-between;align-items:center}\
.panel-collapse,.panel-close{border:0;background:none;color:#fff;cursor:pointer;font-size:1rem}\
.spec-label{font-weight:bold}\
.viewer-status{position:absolute;left:50%;top:50%;transform:translate(-50%,-50%);color:#ccc;font-family:sans-serif}\
.viewer-status.error{color:#f87171}\
.drone-simulator{padding:1.5rem;border-radius:.5rem;background:rgba(0,0,0,.3);color:#fff;font-family:sans-serif}\
.drone-simulator input[type=range]{width:100%}\
.sim-play{width:4rem;height:4rem;border:0;border-radius:50%;color:#fff;font-size:1.25rem;background:#22c55e;cursor:pointer}\
.sim-play.playing{background:#ef4444}\
.sim-play:disabled{background:#9ca3af;cursor:not-allowed}\
.sim-status.error{color:#f87171}\
.sim-range{display:flex;justify-content:space-between;font-size:.75rem;color:#9ca3af}";

pub const ROOT_CLASS: &str = "viewer-root";

//! Platform-agnostic core for the drone hotspot viewer and sound simulator.
//!
//! Nothing here touches the DOM, WebGPU or WebAudio. The web front-end drives
//! [`viewer::Viewer`] and [`simulator::DroneSoundSimulator`] from its event
//! handlers and animation frame, and renders what they report.

pub mod audio_map;
pub mod camera;
pub mod catalog;
pub mod choreographer;
pub mod constants;
pub mod error;
pub mod hotspot;
pub mod interaction;
pub mod lifecycle;
pub mod markers;
pub mod normalize;
pub mod overlay;
pub mod picking;
pub mod simulator;
pub mod viewer;

pub use audio_map::{AudioGraph, ControlInputs, EffectParam, EffectParams};
pub use camera::{Camera, CameraPose, Ray};
pub use catalog::DroneModel;
pub use choreographer::{CameraChoreographer, CameraState};
pub use error::ViewerError;
pub use hotspot::{Hotspot, HotspotContent, HotspotRegistry, Specification};
pub use lifecycle::{AssetSlot, LoadTicket};
pub use markers::{MarkerId, MarkerInstance};
pub use normalize::{Aabb, Normalization};
pub use overlay::{OverlayView, PanelView, Selection};
pub use simulator::{DroneSoundSimulator, SimulatorStatus, SimulatorView};
pub use viewer::{ClickOutcome, FrameOutput, ViewGeometry, Viewer, ViewerConfig, ViewerStatus};

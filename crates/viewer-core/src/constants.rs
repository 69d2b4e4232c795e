use glam::Vec3;

// Shared interaction/camera tuning constants used by the engine and the web frontend.

// Model normalization
pub const DEFAULT_TARGET_SIZE: f32 = 7.0; // largest model dimension after normalization

// Camera
pub const OVERVIEW_EYE: [f32; 3] = [5.0, 3.0, 5.0];
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// View geometry at DEFAULT_TARGET_SIZE; scaled together via ViewGeometry::for_target_size
pub const ZOOM_MIN_DISTANCE: f32 = 1.0;
pub const ZOOM_MAX_DISTANCE: f32 = 20.0;
pub const FOCUS_OFFSET: f32 = 3.0; // along +z from the selected anchor

// Fly-to animation
pub const FLY_LERP_ALPHA: f32 = 0.05; // per-frame ease toward the target pose
pub const ARRIVAL_EPSILON: f32 = 0.1;

// Pointer / wheel
pub const ROTATE_SENSITIVITY: f32 = 0.01; // radians per pixel
pub const ZOOM_SPEED: f32 = 0.5;
pub const WHEEL_DELTA_SCALE: f32 = 0.001;

// Markers
pub const MARKER_RADIUS: f32 = 0.08;
pub const MARKER_OPACITY: f32 = 0.5;
pub const PULSE_RATE_PER_MS: f64 = 0.003;
pub const PULSE_AMPLITUDE: f32 = 0.2;

#[inline]
pub fn overview_eye_vec3() -> Vec3 {
    Vec3::from(OVERVIEW_EYE)
}

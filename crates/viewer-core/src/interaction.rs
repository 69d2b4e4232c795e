//! Drag-to-rotate and wheel-to-zoom.

use crate::camera::CameraPose;
use crate::constants::{ROTATE_SENSITIVITY, WHEEL_DELTA_SCALE, ZOOM_SPEED};
use crate::viewer::ViewGeometry;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Model orientation as two Euler angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelRotation {
    /// About +Y, driven by horizontal drag.
    pub yaw: f32,
    /// About +X, driven by vertical drag.
    pub pitch: f32,
}

impl ModelRotation {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.quat())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionState {
    pub dragging: bool,
    pub last_pointer: Vec2,
    pub rotation: ModelRotation,
    pub camera_distance: f32,
}

#[derive(Clone, Debug)]
pub struct InteractionController {
    state: InteractionState,
    sensitivity: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ROTATE_SENSITIVITY)
    }
}

impl InteractionController {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            state: InteractionState::default(),
            sensitivity,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn rotation(&self) -> ModelRotation {
        self.state.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    pub fn pointer_down(&mut self, p: Vec2) {
        self.state.dragging = true;
        self.state.last_pointer = p;
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        if !self.state.dragging {
            return;
        }
        let d = p - self.state.last_pointer;
        self.state.rotation.yaw += d.x * self.sensitivity;
        self.state.rotation.pitch += d.y * self.sensitivity;
        self.state.last_pointer = p;
    }

    pub fn pointer_up(&mut self) {
        self.state.dragging = false;
    }

    pub fn pointer_leave(&mut self) {
        self.state.dragging = false;
    }

    /// Dolly the camera along its view axis. Positive `delta_y` moves away
    /// from the target. The resulting distance is clamped to the geometry's
    /// zoom bounds.
    pub fn wheel(&mut self, pose: &mut CameraPose, delta_y: f32, geometry: &ViewGeometry) {
        let offset = pose.position - pose.target;
        let len = offset.length();
        let axis = if len > f32::EPSILON { offset / len } else { Vec3::Z };
        let amount = delta_y * WHEEL_DELTA_SCALE * ZOOM_SPEED;
        // Zooming in stops at the near bound rather than passing through the target.
        let clamped = (len + amount).clamp(geometry.zoom_min, geometry.zoom_max);
        pose.position = pose.target + axis * clamped;
        self.state.camera_distance = clamped;
    }

    pub fn sync_distance(&mut self, pose: &CameraPose) {
        self.state.camera_distance = pose.distance();
    }
}

//! Camera state machine between the overview pose and a focused hotspot.
//!
//! The choreographer is advanced once per frame. It owns no camera of its
//! own; it writes into the [`CameraPose`] handed to [`CameraChoreographer::advance`].
//! In `Overview` it leaves the position alone so wheel zoom persists.

use crate::camera::CameraPose;
use crate::constants::{overview_eye_vec3, ARRIVAL_EPSILON, FLY_LERP_ALPHA};
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub enum CameraState {
    Overview,
    FlyingTo {
        hotspot: String,
        /// Camera destination: anchor + focus offset.
        position: Vec3,
        anchor: Vec3,
    },
    Focused {
        hotspot: String,
        anchor: Vec3,
    },
    FlyingBack,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CameraEvent {
    Arrived(String),
    Returned,
}

#[derive(Clone, Debug)]
pub struct CameraChoreographer {
    state: CameraState,
    overview: Vec3,
    focus_offset: Vec3,
    alpha: f32,
    epsilon: f32,
}

impl CameraChoreographer {
    pub fn new(focus_offset: f32) -> Self {
        Self {
            state: CameraState::Overview,
            overview: overview_eye_vec3(),
            focus_offset: Vec3::new(0.0, 0.0, focus_offset),
            alpha: FLY_LERP_ALPHA,
            epsilon: ARRIVAL_EPSILON,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn is_overview(&self) -> bool {
        matches!(self.state, CameraState::Overview)
    }

    pub fn overview_pose(&self) -> CameraPose {
        CameraPose::new(self.overview, Vec3::ZERO)
    }

    /// Starts a fly-to toward `anchor_world`. Only honoured from `Overview`.
    pub fn focus(&mut self, hotspot: &str, anchor_world: Vec3) -> bool {
        if !self.is_overview() {
            log::debug!("[camera] focus({hotspot}) ignored in {:?}", self.state);
            return false;
        }
        let position = anchor_world + self.focus_offset;
        log::info!("[camera] flying to {hotspot} at {position:?}");
        self.state = CameraState::FlyingTo {
            hotspot: hotspot.to_string(),
            position,
            anchor: anchor_world,
        };
        true
    }

    /// Returns toward the overview pose. Valid while flying to or focused on a hotspot.
    pub fn release(&mut self) -> bool {
        match self.state {
            CameraState::FlyingTo { .. } | CameraState::Focused { .. } => {
                log::info!("[camera] flying back to overview");
                self.state = CameraState::FlyingBack;
                true
            }
            _ => false,
        }
    }

    /// Where the camera should be looking in the current state.
    pub fn look_target(&self) -> Vec3 {
        match &self.state {
            CameraState::FlyingTo { anchor, .. } | CameraState::Focused { anchor, .. } => *anchor,
            CameraState::Overview | CameraState::FlyingBack => Vec3::ZERO,
        }
    }

    /// One frame of interpolation.
    pub fn advance(&mut self, pose: &mut CameraPose) -> Option<CameraEvent> {
        pose.target = self.look_target();
        match &self.state {
            CameraState::Overview => None,
            CameraState::FlyingTo {
                hotspot,
                position,
                anchor,
            } => {
                pose.position = pose.position.lerp(*position, self.alpha);
                if pose.position.distance(*position) < self.epsilon {
                    let hotspot = hotspot.clone();
                    log::info!("[camera] focused on {hotspot}");
                    self.state = CameraState::Focused {
                        hotspot: hotspot.clone(),
                        anchor: *anchor,
                    };
                    return Some(CameraEvent::Arrived(hotspot));
                }
                None
            }
            CameraState::Focused { .. } => None,
            CameraState::FlyingBack => {
                pose.position = pose.position.lerp(self.overview, self.alpha);
                if pose.position.distance(self.overview) < self.epsilon {
                    log::info!("[camera] back at overview");
                    self.state = CameraState::Overview;
                    return Some(CameraEvent::Returned);
                }
                None
            }
        }
    }
}

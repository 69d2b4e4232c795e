//! Centering and uniform scaling of loaded models.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in the asset's native units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// An inverted box that any `include` call will replace.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn include(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }
}

/// Translation and uniform scale that bring a model into the canonical volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalization {
    /// Applied first: moves the box center to the origin.
    pub translation: Vec3,
    pub scale: f32,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Normalization {
    pub fn from_bounds(bounds: &Aabb, target_size: f32) -> Self {
        let translation = -bounds.center();
        let max_dim = bounds.size().max_element();
        let scale = if max_dim.is_finite() && max_dim > f32::EPSILON {
            target_size / max_dim
        } else {
            log::warn!("[viewer] degenerate bounds {:?}; keeping native scale", bounds);
            1.0
        };
        Self { translation, scale }
    }

    /// `scale × translate`, mapping native coordinates into the normalized frame.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_translation(self.translation)
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        (p + self.translation) * self.scale
    }
}

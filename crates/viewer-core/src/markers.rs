//! Marker arena: one transient marker per hotspot, addressed by index.

use crate::constants::{MARKER_OPACITY, MARKER_RADIUS, PULSE_AMPLITUDE, PULSE_RATE_PER_MS};
use crate::hotspot::HotspotRegistry;
use fnv::FnvHashMap;
use glam::{Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Index into the owning registry.
    pub hotspot: usize,
    pub visible: bool,
    pub pulse_scale: f32,
}

/// What the renderer and the picker need for one visible marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerInstance {
    pub id: MarkerId,
    pub position: Vec3,
    pub radius: f32,
    pub color: [f32; 4],
}

pub type MarkerList = SmallVec<[MarkerInstance; 8]>;

#[inline]
pub fn pulse_scale(time_ms: f64) -> f32 {
    1.0 + (time_ms * PULSE_RATE_PER_MS).sin() as f32 * PULSE_AMPLITUDE
}

#[derive(Clone, Debug, Default)]
pub struct MarkerArena {
    markers: Vec<Marker>,
    by_id: FnvHashMap<String, MarkerId>,
}

impl MarkerArena {
    pub fn build(registry: &HotspotRegistry, visible: bool) -> Self {
        let mut markers = Vec::with_capacity(registry.len());
        let mut by_id = FnvHashMap::default();
        for (i, h) in registry.iter().enumerate() {
            markers.push(Marker {
                hotspot: i,
                visible,
                pulse_scale: 1.0,
            });
            by_id.insert(h.id.clone(), MarkerId(i));
        }
        Self { markers, by_id }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.0)
    }

    pub fn lookup(&self, hotspot_id: &str) -> Option<MarkerId> {
        self.by_id.get(hotspot_id).copied()
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        for m in &mut self.markers {
            m.visible = visible;
        }
    }

    pub fn any_visible(&self) -> bool {
        self.markers.iter().any(|m| m.visible)
    }

    pub fn pulse(&mut self, time_ms: f64) {
        let s = pulse_scale(time_ms);
        for m in &mut self.markers {
            m.pulse_scale = s;
        }
    }

    /// Visible markers in world space under the given model rotation.
    pub fn render_list(&self, registry: &HotspotRegistry, rotation: Quat) -> MarkerList {
        let mut out = MarkerList::new();
        for (i, m) in self.markers.iter().enumerate() {
            if !m.visible {
                continue;
            }
            let Some(h) = registry.at(m.hotspot) else {
                continue;
            };
            out.push(MarkerInstance {
                id: MarkerId(i),
                position: rotation * h.anchor,
                radius: MARKER_RADIUS * m.pulse_scale,
                color: h.rgba(MARKER_OPACITY),
            });
        }
        out
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.by_id.clear();
    }
}

//! Static, per-model hotspot data.
//!
//! Anchors are expressed in the model's post-normalization local frame, so the
//! same coordinates work regardless of the asset's native size.

use crate::error::ViewerError;
use fnv::FnvHashMap;
use glam::Vec3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HotspotContent {
    pub overview: String,
    pub specifications: Vec<Specification>,
    pub characteristics: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hotspot {
    pub id: String,
    pub anchor: Vec3,
    /// 0xRRGGBB
    pub color: u32,
    pub title: String,
    pub content: HotspotContent,
}

impl Hotspot {
    pub fn new(id: &str, anchor: [f32; 3], color: u32, title: &str) -> Self {
        Self {
            id: id.to_string(),
            anchor: Vec3::from(anchor),
            color,
            title: title.to_string(),
            content: HotspotContent {
                overview: String::new(),
                specifications: Vec::new(),
                characteristics: String::new(),
            },
        }
    }

    pub fn overview(mut self, text: &str) -> Self {
        self.content.overview = text.to_string();
        self
    }

    pub fn spec(mut self, label: &str, value: &str) -> Self {
        self.content.specifications.push(Specification {
            label: label.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn characteristics(mut self, text: &str) -> Self {
        self.content.characteristics = text.to_string();
        self
    }

    /// Linear RGB in [0, 1] with the given alpha.
    pub fn rgba(&self, alpha: f32) -> [f32; 4] {
        let r = ((self.color >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.color >> 8) & 0xff) as f32 / 255.0;
        let b = (self.color & 0xff) as f32 / 255.0;
        [r, g, b, alpha]
    }
}

/// Immutable list of hotspots for one model, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
    index: FnvHashMap<String, usize>,
}

impl HotspotRegistry {
    pub fn new(hotspots: Vec<Hotspot>) -> Result<Self, ViewerError> {
        let mut index = FnvHashMap::default();
        for (i, h) in hotspots.iter().enumerate() {
            if index.insert(h.id.clone(), i).is_some() {
                return Err(ViewerError::DuplicateHotspot(h.id.clone()));
            }
        }
        Ok(Self { hotspots, index })
    }

    pub fn get(&self, id: &str) -> Option<&Hotspot> {
        self.index.get(id).map(|&i| &self.hotspots[i])
    }

    pub fn at(&self, index: usize) -> Option<&Hotspot> {
        self.hotspots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter()
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }
}

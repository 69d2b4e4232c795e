//! The hotspot viewer engine.
//!
//! `Viewer` is platform-free: the front-end feeds it input in canvas pixels and
//! normalized device coordinates, calls [`Viewer::frame`] once per animation
//! frame and draws whatever [`FrameOutput`] it returns. All state lives here,
//! so every transition can be exercised without a rendering surface.

use crate::camera::{Camera, CameraPose};
use crate::choreographer::{CameraChoreographer, CameraEvent, CameraState};
use crate::constants::{DEFAULT_TARGET_SIZE, FOCUS_OFFSET, ZOOM_MAX_DISTANCE, ZOOM_MIN_DISTANCE};
use crate::error::ViewerError;
use crate::hotspot::HotspotRegistry;
use crate::interaction::{InteractionController, ModelRotation};
use crate::lifecycle::{AssetSlot, LoadTicket};
use crate::markers::{MarkerArena, MarkerList};
use crate::normalize::{Aabb, Normalization};
use crate::overlay::{self, OverlayState, OverlayView, Selection};
use crate::picking::pick_nearest;
use glam::{Mat4, Vec2, Vec3};

/// Zoom bounds and focus offset. These only make sense relative to the
/// normalization target size, so they are scaled together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewGeometry {
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub focus_offset: f32,
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN_DISTANCE,
            zoom_max: ZOOM_MAX_DISTANCE,
            focus_offset: FOCUS_OFFSET,
        }
    }
}

impl ViewGeometry {
    pub fn for_target_size(target_size: f32) -> Self {
        let k = target_size / DEFAULT_TARGET_SIZE;
        Self {
            zoom_min: ZOOM_MIN_DISTANCE * k,
            zoom_max: ZOOM_MAX_DISTANCE * k,
            focus_offset: FOCUS_OFFSET * k,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub asset_path: String,
    pub registry: HotspotRegistry,
    pub target_size: f32,
    pub show_hotspots: bool,
    pub geometry: ViewGeometry,
}

impl ViewerConfig {
    pub fn new(asset_path: impl Into<String>, registry: HotspotRegistry) -> Self {
        Self {
            asset_path: asset_path.into(),
            registry,
            target_size: DEFAULT_TARGET_SIZE,
            show_hotspots: false,
            geometry: ViewGeometry::default(),
        }
    }

    /// Sets the normalization target and rescales the view geometry with it.
    pub fn target_size(mut self, target_size: f32) -> Self {
        self.target_size = target_size;
        self.geometry = ViewGeometry::for_target_size(target_size);
        self
    }

    pub fn show_hotspots(mut self, show: bool) -> Self {
        self.show_hotspots = show;
        self
    }

    pub fn geometry(mut self, geometry: ViewGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(String),
    Missed,
    /// Not ready, torn down, or a hotspot is already active.
    Ignored,
}

#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub camera: CameraPose,
    pub model_matrix: Mat4,
    pub markers: MarkerList,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerStatus<'a> {
    Loading,
    Ready,
    Failed(&'a ViewerError),
    TornDown,
}

pub struct Viewer {
    config: ViewerConfig,
    model: AssetSlot<Normalization>,
    markers: MarkerArena,
    interaction: InteractionController,
    choreographer: CameraChoreographer,
    pose: CameraPose,
    selection: Selection,
    overlay: OverlayState,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let choreographer = CameraChoreographer::new(config.geometry.focus_offset);
        let pose = choreographer.overview_pose();
        let mut interaction = InteractionController::default();
        interaction.sync_distance(&pose);
        let overlay = OverlayState {
            show_hotspots: config.show_hotspots,
            collapsed: false,
        };
        Self {
            model: AssetSlot::new(config.asset_path.clone()),
            config,
            markers: MarkerArena::default(),
            interaction,
            choreographer,
            pose,
            selection: Selection::None,
            overlay,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn registry(&self) -> &HotspotRegistry {
        &self.config.registry
    }

    pub fn status(&self) -> ViewerStatus<'_> {
        if self.model.is_torn_down() {
            ViewerStatus::TornDown
        } else if let Some(e) = self.model.error() {
            ViewerStatus::Failed(e)
        } else if self.model.ready().is_some() {
            ViewerStatus::Ready
        } else {
            ViewerStatus::Loading
        }
    }

    pub fn is_ready(&self) -> bool {
        self.model.ready().is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn camera_state(&self) -> &CameraState {
        self.choreographer.state()
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.pose
    }

    pub fn rotation(&self) -> ModelRotation {
        self.interaction.rotation()
    }

    pub fn normalization(&self) -> Option<&Normalization> {
        self.model.ready()
    }

    pub fn markers(&self) -> &MarkerArena {
        &self.markers
    }

    // ---------------- Loading ----------------

    pub fn begin_load(&mut self) -> Result<LoadTicket, ViewerError> {
        self.model.begin()
    }

    /// Applies a finished model load. Returns false when the result is stale
    /// or arrived after teardown.
    pub fn finish_load(&mut self, ticket: LoadTicket, bounds: Aabb) -> bool {
        let normalization = Normalization::from_bounds(&bounds, self.config.target_size);
        if self.model.resolve(ticket, normalization).is_err() {
            return false;
        }
        let visible = overlay::markers_visible(&self.selection, &self.overlay);
        self.markers = MarkerArena::build(&self.config.registry, visible);
        log::info!(
            "[viewer] {} ready: scale {:.4}, {} markers",
            self.config.asset_path,
            normalization.scale,
            self.markers.len()
        );
        true
    }

    pub fn fail_load(&mut self, ticket: LoadTicket, err: ViewerError) -> bool {
        self.model.fail(ticket, err)
    }

    /// Drops markers and the loaded model. Every later call is a no-op.
    pub fn teardown(&mut self) {
        if self.model.is_torn_down() {
            return;
        }
        self.model.teardown();
        self.markers.clear();
        self.interaction.pointer_up();
        self.selection = Selection::None;
        log::info!("[viewer] torn down");
    }

    // ---------------- Input ----------------

    fn accepts_navigation(&self) -> bool {
        self.is_ready() && self.choreographer.is_overview()
    }

    pub fn pointer_down(&mut self, p: Vec2) {
        if self.accepts_navigation() {
            self.interaction.pointer_down(p);
        }
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        if self.accepts_navigation() {
            self.interaction.pointer_move(p);
        }
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if !self.accepts_navigation() {
            return;
        }
        self.interaction
            .wheel(&mut self.pose, delta_y, &self.config.geometry);
    }

    /// Hit-tests visible markers at `ndc` and selects the nearest one.
    pub fn click(&mut self, ndc: Vec2, aspect: f32) -> ClickOutcome {
        if !self.is_ready() {
            return ClickOutcome::Ignored;
        }
        if !self.selection.is_none() || !self.choreographer.is_overview() {
            log::debug!("[input] click ignored while a hotspot is active");
            return ClickOutcome::Ignored;
        }
        let camera = Camera::from_pose(&self.pose, aspect);
        let ray = camera.ray_from_ndc(ndc);
        let list = self
            .markers
            .render_list(&self.config.registry, self.rotation().quat());
        let Some((hit, t)) = pick_nearest(&ray, list.iter()) else {
            return ClickOutcome::Missed;
        };
        let Some(marker) = self.markers.get(hit.id) else {
            return ClickOutcome::Missed;
        };
        let Some(hotspot) = self.config.registry.at(marker.hotspot) else {
            return ClickOutcome::Missed;
        };
        let id = hotspot.id.clone();
        log::info!("[viewer] selected {id} (t = {t:.3})");
        self.selection = Selection::Selected(id.clone());
        self.markers.set_all_visible(false);
        self.choreographer.focus(&id, hit.position);
        ClickOutcome::Selected(id)
    }

    pub fn toggle_hotspots(&mut self) -> bool {
        if self.model.is_torn_down() {
            return self.overlay.show_hotspots;
        }
        self.overlay.show_hotspots = !self.overlay.show_hotspots;
        self.markers
            .set_all_visible(overlay::markers_visible(&self.selection, &self.overlay));
        log::debug!("[viewer] show hotspots = {}", self.overlay.show_hotspots);
        self.overlay.show_hotspots
    }

    pub fn toggle_collapsed(&mut self) -> bool {
        if self.selection.is_none() {
            return false;
        }
        self.overlay.collapsed = !self.overlay.collapsed;
        true
    }

    /// Closes the info panel and starts the flight back to the overview pose.
    pub fn close_panel(&mut self) -> bool {
        if self.selection.is_none() {
            return false;
        }
        self.selection = Selection::None;
        self.overlay.collapsed = false;
        self.markers
            .set_all_visible(overlay::markers_visible(&self.selection, &self.overlay));
        self.choreographer.release();
        true
    }

    // ---------------- Frame ----------------

    pub fn model_matrix(&self) -> Option<Mat4> {
        let n = self.model.ready()?;
        Some(self.rotation().matrix() * n.matrix())
    }

    /// World-space position of a hotspot anchor under the current rotation.
    pub fn hotspot_world_position(&self, id: &str) -> Option<Vec3> {
        let h = self.config.registry.get(id)?;
        Some(self.rotation().quat() * h.anchor)
    }

    /// Advances animation by one frame. `None` until the model is ready.
    pub fn frame(&mut self, time_ms: f64) -> Option<FrameOutput> {
        let model_matrix = self.model_matrix()?;
        self.markers.pulse(time_ms);
        if let Some(event) = self.choreographer.advance(&mut self.pose) {
            match event {
                CameraEvent::Arrived(id) => log::debug!("[viewer] arrived at {id}"),
                CameraEvent::Returned => log::debug!("[viewer] overview restored"),
            }
        }
        self.interaction.sync_distance(&self.pose);
        Some(FrameOutput {
            camera: self.pose,
            model_matrix,
            markers: self
                .markers
                .render_list(&self.config.registry, self.rotation().quat()),
        })
    }

    pub fn overlay(&self) -> OverlayView<'_> {
        overlay::present(&self.selection, &self.overlay, &self.config.registry)
    }
}

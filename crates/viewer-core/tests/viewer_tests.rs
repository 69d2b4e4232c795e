// End-to-end viewer engine scenarios without a rendering surface.

use glam::{Vec2, Vec3};
use viewer_core::camera::Camera;
use viewer_core::catalog::DroneModel;
use viewer_core::choreographer::{CameraChoreographer, CameraState};
use viewer_core::error::ViewerError;
use viewer_core::hotspot::{Hotspot, HotspotRegistry};
use viewer_core::interaction::ModelRotation;
use viewer_core::normalize::Aabb;
use viewer_core::overlay::{PanelView, Selection};
use viewer_core::viewer::{ClickOutcome, Viewer, ViewerConfig, ViewerStatus};

const ASPECT: f32 = 1.0;

fn unit_bounds() -> Aabb {
    Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

fn loaded_shahed(show_hotspots: bool) -> Viewer {
    let config = DroneModel::Shahed136
        .config()
        .expect("catalog")
        .show_hotspots(show_hotspots);
    let mut v = Viewer::new(config);
    let ticket = v.begin_load().expect("ticket");
    assert!(v.finish_load(ticket, unit_bounds()));
    v.frame(0.0);
    v
}

fn ndc_of(v: &Viewer, world: Vec3) -> Vec2 {
    let cam = Camera::from_pose(&v.camera_pose(), ASPECT);
    let clip = cam.view_proj() * world.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

fn click_hotspot(v: &mut Viewer, id: &str) -> ClickOutcome {
    let world = v.hotspot_world_position(id).expect("hotspot");
    let ndc = ndc_of(v, world);
    v.click(ndc, ASPECT)
}

fn run_frames(v: &mut Viewer, n: usize, mut until: impl FnMut(&Viewer) -> bool) -> usize {
    for i in 0..n {
        v.frame(i as f64 * 16.0);
        if until(v) {
            return i + 1;
        }
    }
    n
}

#[test]
fn selecting_wings_flies_to_offset_pose() {
    let mut v = loaded_shahed(true);
    assert_eq!(click_hotspot(&mut v, "wings"), ClickOutcome::Selected("wings".into()));
    assert_eq!(v.selection(), &Selection::Selected("wings".into()));

    let expected = Vec3::new(0.7, 0.0, 0.56 + 3.0);
    match v.camera_state() {
        CameraState::FlyingTo { hotspot, position, anchor } => {
            assert_eq!(hotspot, "wings");
            assert!((*position - expected).length() < 1e-5);
            assert!((*anchor - Vec3::new(0.7, 0.0, 0.56)).length() < 1e-5);
        }
        other => panic!("unexpected state {other:?}"),
    }
    // Markers hide as soon as a hotspot is selected.
    assert!(!v.markers().any_visible());

    let frames = run_frames(&mut v, 1000, |v| {
        matches!(v.camera_state(), CameraState::Focused { .. })
    });
    assert!(frames < 1000);
    let pose = v.camera_pose();
    assert!((pose.position - expected).length() < 0.1);
    assert!((pose.target - Vec3::new(0.7, 0.0, 0.56)).length() < 1e-5);
    assert_eq!(v.selection(), &Selection::Selected("wings".into()));
}

#[test]
fn clicks_are_ignored_while_a_hotspot_is_active() {
    let mut v = loaded_shahed(true);
    assert!(matches!(click_hotspot(&mut v, "warhead"), ClickOutcome::Selected(_)));

    // During FlyingTo.
    assert_eq!(v.click(Vec2::ZERO, ASPECT), ClickOutcome::Ignored);
    run_frames(&mut v, 1000, |v| matches!(v.camera_state(), CameraState::Focused { .. }));
    // During Focused.
    assert_eq!(click_hotspot(&mut v, "engine"), ClickOutcome::Ignored);
    assert_eq!(v.selection(), &Selection::Selected("warhead".into()));

    // During FlyingBack.
    assert!(v.close_panel());
    assert_eq!(v.camera_state(), &CameraState::FlyingBack);
    assert_eq!(v.click(Vec2::ZERO, ASPECT), ClickOutcome::Ignored);
    assert_eq!(v.selection(), &Selection::None);
}

#[test]
fn close_returns_to_overview() {
    let mut v = loaded_shahed(true);
    click_hotspot(&mut v, "engine");
    run_frames(&mut v, 1000, |v| matches!(v.camera_state(), CameraState::Focused { .. }));
    assert!(v.toggle_collapsed());

    assert!(v.close_panel());
    assert_eq!(v.selection(), &Selection::None);
    assert!(v.markers().any_visible());
    assert_eq!(v.overlay().panel, PanelView::Hidden);

    let frames = run_frames(&mut v, 1000, |v| v.camera_state() == &CameraState::Overview);
    assert!(frames < 1000);
    let pose = v.camera_pose();
    assert!((pose.position - Vec3::new(5.0, 3.0, 5.0)).length() < 0.1);
    assert_eq!(pose.target, Vec3::ZERO);

    // Selection works again once back at the overview.
    assert!(matches!(click_hotspot(&mut v, "engine"), ClickOutcome::Selected(_)));
    assert!(matches!(v.overlay().panel, PanelView::Expanded(_)));
}

#[test]
fn close_during_fly_to_turns_back() {
    let mut v = loaded_shahed(true);
    click_hotspot(&mut v, "wings");
    run_frames(&mut v, 5, |_| false);
    assert!(v.close_panel());
    assert_eq!(v.camera_state(), &CameraState::FlyingBack);
    assert!(!v.close_panel());
}

#[test]
fn hidden_markers_cannot_be_clicked() {
    let mut v = loaded_shahed(false);
    assert!(!v.markers().any_visible());
    assert_eq!(click_hotspot(&mut v, "wings"), ClickOutcome::Missed);
    assert!(v.frame(16.0).map(|f| f.markers.is_empty()).unwrap_or(false));

    assert!(v.toggle_hotspots());
    assert!(v.markers().any_visible());
    assert!(matches!(click_hotspot(&mut v, "wings"), ClickOutcome::Selected(_)));
}

#[test]
fn marker_visibility_follows_toggle_after_close() {
    let mut v = loaded_shahed(true);
    click_hotspot(&mut v, "warhead");
    // Toggle while the panel is open: markers stay hidden until close.
    assert!(!v.toggle_hotspots());
    assert!(!v.markers().any_visible());
    assert!(!v.overlay().toggle_visible);
    v.close_panel();
    assert!(!v.markers().any_visible());
    assert!(v.overlay().toggle_visible);
}

#[test]
fn overlay_panel_tracks_collapse() {
    let mut v = loaded_shahed(true);
    assert!(!v.toggle_collapsed());
    click_hotspot(&mut v, "engine");
    match v.overlay().panel {
        PanelView::Expanded(h) => assert_eq!(h.title, "Engine System"),
        other => panic!("unexpected panel {other:?}"),
    }
    v.toggle_collapsed();
    assert!(matches!(v.overlay().panel, PanelView::Collapsed(_)));
    assert_eq!(v.selection(), &Selection::Selected("engine".into()));
    v.close_panel();
    click_hotspot_after_overview(&mut v, "engine");
    assert!(matches!(v.overlay().panel, PanelView::Expanded(_)));
}

fn click_hotspot_after_overview(v: &mut Viewer, id: &str) {
    run_frames(v, 1000, |v| v.camera_state() == &CameraState::Overview);
    assert!(matches!(click_hotspot(v, id), ClickOutcome::Selected(_)));
}

#[test]
fn navigation_is_locked_outside_overview() {
    let mut v = loaded_shahed(true);
    click_hotspot(&mut v, "wings");
    run_frames(&mut v, 1000, |v| matches!(v.camera_state(), CameraState::Focused { .. }));
    let before = v.camera_pose();
    let rot = v.rotation();
    v.wheel(5000.0);
    v.pointer_down(Vec2::new(10.0, 10.0));
    v.pointer_move(Vec2::new(80.0, 40.0));
    v.pointer_up();
    assert_eq!(v.camera_pose(), before);
    assert_eq!(v.rotation(), rot);
}

#[test]
fn input_before_load_is_ignored() {
    let config = DroneModel::UsntHawk.config().expect("catalog").show_hotspots(true);
    let mut v = Viewer::new(config);
    let start = v.camera_pose();
    let _ticket = v.begin_load().expect("ticket");
    assert_eq!(v.status(), ViewerStatus::Loading);
    assert_eq!(v.click(Vec2::ZERO, ASPECT), ClickOutcome::Ignored);
    v.wheel(1000.0);
    v.pointer_down(Vec2::ZERO);
    v.pointer_move(Vec2::new(50.0, 50.0));
    assert_eq!(v.camera_pose(), start);
    assert_eq!(v.rotation(), ModelRotation::default());
    assert!(v.frame(0.0).is_none());
}

#[test]
fn teardown_while_pending_drops_late_result() {
    let mut v = Viewer::new(DroneModel::Mq9Reaper.config().expect("catalog"));
    let ticket = v.begin_load().expect("ticket");
    v.teardown();
    assert_eq!(v.status(), ViewerStatus::TornDown);

    assert!(!v.finish_load(ticket, unit_bounds()));
    assert!(!v.fail_load(ticket, ViewerError::asset_load("/3D/MQ-9.glb", "late")));
    assert_eq!(v.status(), ViewerStatus::TornDown);
    assert!(v.markers().is_empty());
    assert!(v.frame(0.0).is_none());
    assert_eq!(v.click(Vec2::ZERO, ASPECT), ClickOutcome::Ignored);
    assert_eq!(v.begin_load(), Err(ViewerError::TornDown));
    // Second teardown is harmless.
    v.teardown();
}

#[test]
fn load_failure_is_terminal_and_visible() {
    let mut v = Viewer::new(DroneModel::Rq170Sentinel.config().expect("catalog"));
    let ticket = v.begin_load().expect("ticket");
    let err = ViewerError::asset_load("/3D/RQ-170.glb", "HTTP 404");
    assert!(v.fail_load(ticket, err.clone()));
    assert_eq!(v.status(), ViewerStatus::Failed(&err));
    assert!(!v.finish_load(ticket, unit_bounds()));
    assert!(v.frame(0.0).is_none());
}

#[test]
fn markers_rotate_with_the_model() {
    let mut v = loaded_shahed(true);
    v.pointer_down(Vec2::ZERO);
    v.pointer_move(Vec2::new(std::f32::consts::FRAC_PI_2 / 0.01, 0.0));
    v.pointer_up();
    let out = v.frame(0.0).expect("frame");
    let warhead = v.markers().lookup("warhead").expect("marker");
    let m = out.markers.iter().find(|m| m.id == warhead).expect("visible");
    // +Z anchor rotated 90 degrees about Y lands on +X.
    assert!((m.position - Vec3::new(0.8, 0.0, 0.0)).length() < 1e-4);
    let world = out.model_matrix.transform_point3(Vec3::ZERO);
    assert!(world.length() < 1e-4);
}

#[test]
fn marker_radius_pulses() {
    let mut v = loaded_shahed(true);
    let quarter = std::f64::consts::FRAC_PI_2 / 0.003;
    let out = v.frame(quarter).expect("frame");
    assert!(out.markers.iter().all(|m| (m.radius - 0.08 * 1.2).abs() < 1e-5));
    let out = v.frame(0.0).expect("frame");
    assert!(out.markers.iter().all(|m| (m.radius - 0.08).abs() < 1e-5));
}

#[test]
fn registry_rejects_duplicate_ids() {
    let err = HotspotRegistry::new(vec![
        Hotspot::new("a", [0.0, 0.0, 0.0], 0xffffff, "A"),
        Hotspot::new("a", [1.0, 0.0, 0.0], 0xffffff, "A again"),
    ])
    .unwrap_err();
    assert_eq!(err, ViewerError::DuplicateHotspot("a".into()));
}

#[test]
fn catalog_models_parse_and_build() {
    for model in DroneModel::ALL {
        let name = model.to_string();
        assert_eq!(name.parse::<DroneModel>(), Ok(model));
        let config = model.config().expect("catalog");
        assert!(!config.registry.is_empty());
        assert!(config.asset_path.ends_with(".glb"));
    }
    assert_eq!(
        "F-16".parse::<DroneModel>(),
        Err(ViewerError::UnknownModel("F-16".into()))
    );
    let shahed = HotspotRegistry::new(DroneModel::Shahed136.hotspots()).expect("registry");
    let ids: Vec<_> = shahed.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["warhead", "engine", "wings"]);
    assert_eq!(shahed.get("engine").map(|h| h.color), Some(0xff6600));
}

#[test]
fn custom_target_size_scales_focus_offset() {
    let registry = HotspotRegistry::new(vec![Hotspot::new("tip", [0.0, 0.0, 1.0], 0x00ffff, "Tip")])
        .expect("registry");
    let config = ViewerConfig::new("/3D/test.glb", registry)
        .target_size(3.5)
        .show_hotspots(true);
    let mut v = Viewer::new(config);
    let t = v.begin_load().expect("ticket");
    v.finish_load(t, unit_bounds());
    assert!((v.normalization().expect("ready").scale - 1.75).abs() < 1e-6);
    v.frame(0.0);
    assert!(matches!(click_hotspot(&mut v, "tip"), ClickOutcome::Selected(_)));
    match v.camera_state() {
        CameraState::FlyingTo { position, .. } => {
            assert!((*position - Vec3::new(0.0, 0.0, 2.5)).length() < 1e-5)
        }
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn look_target_follows_the_anchor_until_release() {
    let mut ch = CameraChoreographer::new(3.0);
    let mut pose = ch.overview_pose();
    assert_eq!(ch.look_target(), Vec3::ZERO);

    let anchor = Vec3::new(0.7, 0.0, 0.56);
    assert!(ch.focus("wings", anchor));
    assert_eq!(ch.look_target(), anchor);
    ch.advance(&mut pose);
    assert_eq!(pose.target, anchor);

    assert!(ch.release());
    assert_eq!(ch.look_target(), Vec3::ZERO);
    ch.advance(&mut pose);
    assert_eq!(pose.target, Vec3::ZERO);
}

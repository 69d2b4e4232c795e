// Host-side tests for overlay markup.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod overlay {
    include!("../src/overlay.rs");
}

use overlay::*;
use viewer_core::error::ViewerError;
use viewer_core::hotspot::{Hotspot, HotspotRegistry};
use viewer_core::overlay::{present, OverlayState, OverlayView, PanelView, Selection};
use viewer_core::viewer::ViewerStatus;

fn wings() -> Hotspot {
    Hotspot::new("wings", [0.7, 0.0, 0.56], 0x00ff00, "Wings")
        .overview("Delta <wing> & canards")
        .spec("Span", "2.5 m")
        .spec("Material", "Composite")
        .characteristics("Low \"radar\" return")
}

#[test]
fn escapes_markup_characters() {
    assert_eq!(
        escape_html(r#"<b>"a" & 'b'</b>"#),
        "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
    );
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn expanded_panel_lists_every_section() {
    let html = panel_html(&wings(), false);
    assert!(html.contains("<h2>Wings</h2>"));
    assert!(html.contains("<h3>Overview</h3><p>Delta &lt;wing&gt; &amp; canards</p>"));
    assert!(html.contains("<span class=\"spec-label\">Span:</span> 2.5 m"));
    assert!(html.contains("<span class=\"spec-label\">Material:</span> Composite"));
    assert!(html.contains("Low &quot;radar&quot; return"));
    assert!(html.contains("data-action=\"close\""));
    assert!(html.contains("data-action=\"collapse\""));
}

#[test]
fn collapsed_panel_keeps_only_the_expand_button() {
    let html = panel_html(&wings(), true);
    assert!(html.contains("hotspot-panel collapsed"));
    assert!(html.contains("data-action=\"collapse\""));
    assert!(!html.contains("data-action=\"close\""));
    assert!(!html.contains("Overview"));
}

#[test]
fn toggle_shows_only_without_selection() {
    let registry = HotspotRegistry::new(vec![wings()]).expect("registry");
    let state = OverlayState {
        show_hotspots: true,
        collapsed: false,
    };

    let idle = present(&Selection::None, &state, &registry);
    let html = overlay_html(&idle);
    assert!(html.contains("Hide Hotspots"));
    assert!(!html.contains("hotspot-panel"));

    let selected = present(&Selection::Selected("wings".into()), &state, &registry);
    let html = overlay_html(&selected);
    assert!(!html.contains("hotspot-toggle"));
    assert!(html.contains("<h2>Wings</h2>"));
}

#[test]
fn toggle_label_follows_visibility() {
    assert_eq!(toggle_label(true), "Hide Hotspots");
    assert_eq!(toggle_label(false), "Show Hotspots");
    let view = OverlayView {
        markers_visible: false,
        toggle_visible: true,
        show_hotspots: false,
        panel: PanelView::Hidden,
    };
    assert!(overlay_html(&view).contains("Show Hotspots"));
}

#[test]
fn overlay_actions_parse() {
    assert_eq!(
        OverlayAction::parse("toggle-hotspots"),
        Some(OverlayAction::ToggleHotspots)
    );
    assert_eq!(
        OverlayAction::parse("collapse"),
        Some(OverlayAction::ToggleCollapsed)
    );
    assert_eq!(OverlayAction::parse("close"), Some(OverlayAction::Close));
    assert_eq!(OverlayAction::parse("explode"), None);
}

#[test]
fn status_text_per_state() {
    assert_eq!(
        status_text(&ViewerStatus::Loading),
        Some(("Loading model...".to_owned(), false))
    );
    assert_eq!(status_text(&ViewerStatus::Ready), None);
    let err = ViewerError::asset_load("/3D/Shahed.glb", "HTTP 404");
    let (text, is_error) = status_text(&ViewerStatus::Failed(&err)).expect("shown");
    assert!(is_error);
    assert!(text.contains("HTTP 404"));
    assert_eq!(status_text(&ViewerStatus::TornDown), None);
}

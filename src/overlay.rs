// DOM rendering of the hotspot overlay and the viewer status line.

use std::fmt::Write as _;
use viewer_core::hotspot::Hotspot;
use viewer_core::overlay::{OverlayView, PanelView};
use viewer_core::viewer::ViewerStatus;
use web_sys as web;

/// Actions carried by `data-action` attributes inside the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayAction {
    ToggleHotspots,
    ToggleCollapsed,
    Close,
}

impl OverlayAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "toggle-hotspots" => Some(Self::ToggleHotspots),
            "collapse" => Some(Self::ToggleCollapsed),
            "close" => Some(Self::Close),
            _ => None,
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn toggle_label(show_hotspots: bool) -> &'static str {
    if show_hotspots {
        "Hide Hotspots"
    } else {
        "Show Hotspots"
    }
}

pub fn panel_html(h: &Hotspot, collapsed: bool) -> String {
    let mut html = String::new();
    let class = if collapsed {
        "hotspot-panel collapsed"
    } else {
        "hotspot-panel"
    };
    let arrow = if collapsed { "&#9660;" } else { "&#9650;" };
    _ = write!(
        html,
        "<div class=\"{class}\"><button class=\"panel-collapse\" data-action=\"collapse\">{arrow}</button>"
    );
    if !collapsed {
        _ = write!(
            html,
            "<div class=\"panel-body\"><div class=\"panel-header\"><h2>{}</h2>\
             <button class=\"panel-close\" data-action=\"close\">&#10005;</button></div>",
            escape_html(&h.title)
        );
        _ = write!(
            html,
            "<section><h3>Overview</h3><p>{}</p></section>",
            escape_html(&h.content.overview)
        );
        html.push_str("<section><h3>Specifications</h3><ul>");
        for s in &h.content.specifications {
            _ = write!(
                html,
                "<li><span class=\"spec-label\">{}:</span> {}</li>",
                escape_html(&s.label),
                escape_html(&s.value)
            );
        }
        html.push_str("</ul></section>");
        _ = write!(
            html,
            "<section><h3>Characteristics</h3><p>{}</p></section></div>",
            escape_html(&h.content.characteristics)
        );
    }
    html.push_str("</div>");
    html
}

/// Status line for a viewer; `None` once the model is up.
pub fn status_text(status: &ViewerStatus<'_>) -> Option<(String, bool)> {
    match status {
        ViewerStatus::Loading => Some(("Loading model...".to_owned(), false)),
        ViewerStatus::Ready => None,
        ViewerStatus::Failed(e) => Some((e.to_string(), true)),
        ViewerStatus::TornDown => None,
    }
}

pub fn overlay_html(view: &OverlayView<'_>) -> String {
    let mut html = String::new();
    if view.toggle_visible {
        _ = write!(
            html,
            "<button class=\"hotspot-toggle\" data-action=\"toggle-hotspots\">{}</button>",
            toggle_label(view.show_hotspots)
        );
    }
    match view.panel {
        PanelView::Hidden => {}
        PanelView::Collapsed(h) => html.push_str(&panel_html(h, true)),
        PanelView::Expanded(h) => html.push_str(&panel_html(h, false)),
    }
    html
}

/// The overlay root plus a cache of the last markup written to it.
pub struct OverlayDom {
    root: web::Element,
    status: web::Element,
    last: Option<String>,
    last_status: Option<(Option<String>, bool)>,
}

impl OverlayDom {
    pub fn new(root: web::Element, status: web::Element) -> Self {
        Self {
            root,
            status,
            last: None,
            last_status: None,
        }
    }

    /// Rewrites the overlay only when the markup changed.
    pub fn sync(&mut self, view: &OverlayView<'_>) {
        let html = overlay_html(view);
        if self.last.as_deref() == Some(html.as_str()) {
            return;
        }
        self.root.set_inner_html(&html);
        self.last = Some(html);
    }

    pub fn set_status(&mut self, text: Option<&str>, error: bool) {
        let key = (text.map(str::to_owned), error);
        if self.last_status.as_ref() == Some(&key) {
            return;
        }
        self.last_status = Some(key);
        match text {
            Some(t) => {
                self.status.set_text_content(Some(t));
                let class = if error { "viewer-status error" } else { "viewer-status" };
                self.status.set_class_name(class);
                _ = self.status.set_attribute("style", "");
            }
            None => {
                self.status.set_text_content(None);
                _ = self.status.set_attribute("style", "display:none");
            }
        }
    }
}

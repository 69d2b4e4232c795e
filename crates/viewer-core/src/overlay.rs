//! Overlay presentation derived from selection and user toggles.

use crate::hotspot::{Hotspot, HotspotRegistry};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Selected(String),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(id),
        }
    }
}

/// User-controlled overlay flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub show_hotspots: bool,
    pub collapsed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PanelView<'a> {
    Hidden,
    Collapsed(&'a Hotspot),
    Expanded(&'a Hotspot),
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayView<'a> {
    pub markers_visible: bool,
    /// The show/hide button is offered only while nothing is selected.
    pub toggle_visible: bool,
    pub show_hotspots: bool,
    pub panel: PanelView<'a>,
}

pub fn markers_visible(selection: &Selection, state: &OverlayState) -> bool {
    selection.is_none() && state.show_hotspots
}

pub fn present<'a>(
    selection: &Selection,
    state: &OverlayState,
    registry: &'a HotspotRegistry,
) -> OverlayView<'a> {
    let panel = match selection.id().and_then(|id| registry.get(id)) {
        None => PanelView::Hidden,
        Some(h) if state.collapsed => PanelView::Collapsed(h),
        Some(h) => PanelView::Expanded(h),
    };
    OverlayView {
        markers_visible: markers_visible(selection, state),
        toggle_visible: selection.is_none(),
        show_hotspots: state.show_hotspots,
        panel,
    }
}

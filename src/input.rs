use glam::Vec2;
use web_sys as web;

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_css_px(client_x: f64, client_y: f64, rect: &web::DomRect) -> Vec2 {
    Vec2::new(
        (client_x - rect.left()) as f32,
        (client_y - rect.top()) as f32,
    )
}

/// Map CSS pixels inside a `width` × `height` box to normalized device
/// coordinates (x right, y up). Degenerate boxes map to the center.
#[inline]
pub fn css_to_ndc(p: Vec2, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((p.x / width) * 2.0 - 1.0, -((p.y / height) * 2.0 - 1.0))
}

#[inline]
pub fn aspect_ratio(width: f32, height: f32) -> f32 {
    if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    }
}

/// Click position in NDC plus the canvas aspect used for the pick ray.
pub fn mouse_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, f32) {
    let rect = canvas.get_bounding_client_rect();
    let p = pointer_css_px(ev.client_x() as f64, ev.client_y() as f64, &rect);
    let (w, h) = (rect.width() as f32, rect.height() as f32);
    (css_to_ndc(p, w, h), aspect_ratio(w, h))
}

/// Wheel delta normalized to pixels.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    match delta_mode {
        1 => (delta_y * 16.0) as f32,  // lines
        2 => (delta_y * 800.0) as f32, // pages
        _ => delta_y as f32,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ClosePanel,
    ToggleHotspots,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" | "Esc" => Some(KeyAction::ClosePanel),
        "h" | "H" => Some(KeyAction::ToggleHotspots),
        _ => None,
    }
}

/// Typing into a form field must not trigger shortcuts.
#[inline]
pub fn is_editable_tag(tag: &str) -> bool {
    matches!(tag.to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
}

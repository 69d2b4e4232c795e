// Text shown by the sound simulator widget.

use viewer_core::audio_map::{DISTANCE_MAX, DISTANCE_MIN, ROTOR_SPEED_MAX, ROTOR_SPEED_MIN};
use viewer_core::simulator::{SimulatorStatus, SimulatorView};

/// `3000` -> `"3,000"`.
pub fn thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn distance_label(distance: f32) -> String {
    format!("Distance: {}m", distance.round() as i32)
}

pub fn rotor_label(rpm: f32) -> String {
    format!("Rotor RPM: {}", thousands(rpm.round().max(0.0) as u32))
}

pub fn play_label(view: &SimulatorView) -> &'static str {
    match view.status {
        SimulatorStatus::Ready if view.playing => "\u{23F8}",
        SimulatorStatus::Ready => "\u{25B6}",
        _ => "...",
    }
}

/// Status banner text and whether it is an error.
pub fn status_line(view: &SimulatorView) -> Option<(String, bool)> {
    match &view.status {
        SimulatorStatus::Loading => Some(("Loading audio file...".to_owned(), false)),
        SimulatorStatus::Failed(msg) => Some((msg.clone(), true)),
        SimulatorStatus::Ready if view.blocked => {
            Some(("Click anywhere on the page to enable audio.".to_owned(), false))
        }
        SimulatorStatus::Ready | SimulatorStatus::TornDown => None,
    }
}

/// Filled share of a slider track, in percent.
pub fn fill_percent(value: f32, min: f32, max: f32) -> f32 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

pub fn distance_fill(distance: f32) -> f32 {
    fill_percent(distance, DISTANCE_MIN, DISTANCE_MAX)
}

pub fn rotor_fill(rpm: f32) -> f32 {
    fill_percent(rpm, ROTOR_SPEED_MIN, ROTOR_SPEED_MAX)
}

pub fn track_style(fill: f32, color: &str) -> String {
    format!(
        "background:linear-gradient(to right,{color} 0%,{color} {fill:.1}%,#e5e7eb {fill:.1}%,#e5e7eb 100%)"
    )
}

pub const SIMULATOR_HTML: &str = "\
<h2>Drone Sound Simulator</h2>\
<div class=\"sim-status\" data-role=\"status\"></div>\
<div class=\"sim-controls\">\
<button class=\"sim-play\" data-role=\"play\" disabled>...</button>\
<label data-role=\"distance-label\"></label>\
<input type=\"range\" min=\"1\" max=\"100\" step=\"1\" data-role=\"distance\">\
<div class=\"sim-range\"><span>1m (Close)</span><span>100m (Far)</span></div>\
<label data-role=\"rotor-label\"></label>\
<input type=\"range\" min=\"1000\" max=\"6000\" step=\"1\" data-role=\"rotor\">\
<div class=\"sim-range\"><span>1,000 (Low)</span><span>6,000 (High)</span></div>\
</div>";

//! Control inputs to audio effect parameters.
//!
//! Every curve here is a plain function of the two slider values; the
//! simulator pushes the results through an [`AudioGraph`] with a fixed ramp.

use crate::error::ViewerError;

pub const DISTANCE_MIN: f32 = 1.0;
pub const DISTANCE_MAX: f32 = 100.0;
pub const DEFAULT_DISTANCE: f32 = 50.0;
pub const ROTOR_SPEED_MIN: f32 = 1000.0;
pub const ROTOR_SPEED_MAX: f32 = 6000.0;
pub const DEFAULT_ROTOR_SPEED: f32 = 3000.0;

/// Every parameter write ramps over this many seconds.
pub const PARAM_RAMP_SEC: f64 = 0.1;

pub const GAIN_FLOOR: f32 = 0.1;
pub const CUTOFF_MAX_HZ: f32 = 8000.0;
pub const CUTOFF_FLOOR_HZ: f32 = 1000.0;
pub const PITCH_RANGE_SEMITONES: f32 = 12.0;
pub const DISTORTION_MAX: f32 = 0.3;
pub const REVERB_MIX_MAX: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlInputs {
    /// Meters, 1..=100.
    pub distance: f32,
    /// RPM, 1000..=6000.
    pub rotor_speed: f32,
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            rotor_speed: DEFAULT_ROTOR_SPEED,
        }
    }
}

impl ControlInputs {
    pub fn new(distance: f32, rotor_speed: f32) -> Self {
        Self {
            distance: clamp_distance(distance),
            rotor_speed: clamp_rotor_speed(rotor_speed),
        }
    }
}

fn clamp_or(v: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v.clamp(lo, hi)
    } else {
        fallback
    }
}

pub fn clamp_distance(d: f32) -> f32 {
    clamp_or(d, DISTANCE_MIN, DISTANCE_MAX, DEFAULT_DISTANCE)
}

pub fn clamp_rotor_speed(rpm: f32) -> f32 {
    clamp_or(rpm, ROTOR_SPEED_MIN, ROTOR_SPEED_MAX, DEFAULT_ROTOR_SPEED)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceEffects {
    pub gain: f32,
    pub cutoff_hz: f32,
    pub reverb_mix: f32,
}

impl DistanceEffects {
    pub fn from_distance(distance: f32) -> Self {
        let nd = clamp_distance(distance) / DISTANCE_MAX;
        Self {
            gain: (1.0 - nd * 0.8).max(GAIN_FLOOR),
            cutoff_hz: (CUTOFF_MAX_HZ - nd * 6000.0).max(CUTOFF_FLOOR_HZ),
            reverb_mix: nd * REVERB_MIX_MAX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotorEffects {
    pub pitch_semitones: f32,
    pub distortion: f32,
    pub playback_rate: f32,
}

impl RotorEffects {
    pub fn from_rotor_speed(rpm: f32) -> Self {
        let nr = (clamp_rotor_speed(rpm) - ROTOR_SPEED_MIN) / (ROTOR_SPEED_MAX - ROTOR_SPEED_MIN);
        Self {
            pitch_semitones: (nr - 0.5) * PITCH_RANGE_SEMITONES,
            distortion: nr * DISTORTION_MAX,
            playback_rate: 0.8 + nr * 0.4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectParam {
    Gain,
    LowpassCutoff,
    ReverbMix,
    PitchShift,
    Distortion,
    PlaybackRate,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParams {
    pub distance: DistanceEffects,
    pub rotor: RotorEffects,
}

impl EffectParams {
    pub fn from_inputs(inputs: &ControlInputs) -> Self {
        Self {
            distance: DistanceEffects::from_distance(inputs.distance),
            rotor: RotorEffects::from_rotor_speed(inputs.rotor_speed),
        }
    }
}

impl DistanceEffects {
    pub fn writes(&self) -> [(EffectParam, f32); 3] {
        [
            (EffectParam::Gain, self.gain),
            (EffectParam::LowpassCutoff, self.cutoff_hz),
            (EffectParam::ReverbMix, self.reverb_mix),
        ]
    }
}

impl RotorEffects {
    pub fn writes(&self) -> [(EffectParam, f32); 3] {
        [
            (EffectParam::PitchShift, self.pitch_semitones),
            (EffectParam::Distortion, self.distortion),
            (EffectParam::PlaybackRate, self.playback_rate),
        ]
    }
}

/// The external audio engine as seen by the simulator.
pub trait AudioGraph {
    /// Ramp `param` to `value` over `seconds`.
    fn ramp_to(&mut self, param: EffectParam, value: f32, seconds: f64);
    fn start(&mut self) -> Result<(), ViewerError>;
    fn stop(&mut self);
    /// Whether the context has been resumed by a user gesture.
    fn context_running(&self) -> bool;
    /// Stop everything and free the graph's nodes.
    fn release(&mut self);
}

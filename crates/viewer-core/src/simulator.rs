//! Drone sound simulator state: sliders, playback and the audio graph slot.

use crate::audio_map::{
    clamp_distance, clamp_rotor_speed, AudioGraph, ControlInputs, DistanceEffects, EffectParam,
    EffectParams, RotorEffects, PARAM_RAMP_SEC,
};
use crate::error::ViewerError;
use crate::lifecycle::{AssetSlot, LoadTicket};

#[derive(Clone, Debug, PartialEq)]
pub enum SimulatorStatus {
    Loading,
    Ready,
    Failed(String),
    TornDown,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulatorView {
    pub status: SimulatorStatus,
    pub playing: bool,
    pub controls_enabled: bool,
    pub blocked: bool,
    pub inputs: ControlInputs,
    pub params: EffectParams,
}

pub struct DroneSoundSimulator<G: AudioGraph> {
    inputs: ControlInputs,
    graph: AssetSlot<G>,
    playing: bool,
    blocked: bool,
}

impl<G: AudioGraph> DroneSoundSimulator<G> {
    pub fn new(audio_src: impl Into<String>) -> Self {
        Self {
            inputs: ControlInputs::default(),
            graph: AssetSlot::new(audio_src),
            playing: false,
            blocked: false,
        }
    }

    pub fn inputs(&self) -> ControlInputs {
        self.inputs
    }

    pub fn params(&self) -> EffectParams {
        EffectParams::from_inputs(&self.inputs)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn graph(&self) -> Option<&G> {
        self.graph.ready()
    }

    pub fn begin_load(&mut self) -> Result<LoadTicket, ViewerError> {
        self.graph.begin()
    }

    /// Installs the loaded graph and pushes every parameter once. A stale or
    /// post-teardown graph is released immediately.
    pub fn attach(&mut self, ticket: LoadTicket, graph: G) -> bool {
        if let Err(mut stale) = self.graph.resolve(ticket, graph) {
            stale.release();
            return false;
        }
        let params = self.params();
        self.push(&params.distance.writes());
        self.push(&params.rotor.writes());
        true
    }

    pub fn fail_load(&mut self, ticket: LoadTicket, err: ViewerError) -> bool {
        self.graph.fail(ticket, err)
    }

    fn push(&mut self, writes: &[(EffectParam, f32)]) {
        if let Some(g) = self.graph.ready_mut() {
            for &(param, value) in writes {
                g.ramp_to(param, value, PARAM_RAMP_SEC);
            }
        }
    }

    pub fn set_distance(&mut self, distance: f32) -> DistanceEffects {
        if self.graph.is_torn_down() {
            return DistanceEffects::from_distance(self.inputs.distance);
        }
        self.inputs.distance = clamp_distance(distance);
        let fx = DistanceEffects::from_distance(self.inputs.distance);
        self.push(&fx.writes());
        fx
    }

    pub fn set_rotor_speed(&mut self, rpm: f32) -> RotorEffects {
        if self.graph.is_torn_down() {
            return RotorEffects::from_rotor_speed(self.inputs.rotor_speed);
        }
        self.inputs.rotor_speed = clamp_rotor_speed(rpm);
        let fx = RotorEffects::from_rotor_speed(self.inputs.rotor_speed);
        self.push(&fx.writes());
        fx
    }

    /// A user gesture reached the page; the audio context may run now.
    pub fn notify_gesture(&mut self) {
        if self.blocked {
            log::info!("[audio] user gesture received, controls enabled");
        }
        self.blocked = false;
    }

    /// Starts or stops playback and returns the new playing flag.
    pub fn toggle_playback(&mut self) -> Result<bool, ViewerError> {
        if self.graph.is_torn_down() {
            return Err(ViewerError::TornDown);
        }
        let Some(g) = self.graph.ready_mut() else {
            return Err(ViewerError::NotReady);
        };
        if self.playing {
            g.stop();
            self.playing = false;
            log::info!("[audio] stopped");
            return Ok(false);
        }
        if !g.context_running() {
            log::warn!("[audio] context suspended; waiting for a user gesture");
            self.blocked = true;
            return Err(ViewerError::AudioContextBlocked);
        }
        g.start()?;
        self.playing = true;
        log::info!("[audio] playing");
        Ok(true)
    }

    pub fn view(&self) -> SimulatorView {
        let status = if self.graph.is_torn_down() {
            SimulatorStatus::TornDown
        } else if let Some(e) = self.graph.error() {
            SimulatorStatus::Failed(e.to_string())
        } else if self.graph.ready().is_some() {
            SimulatorStatus::Ready
        } else {
            SimulatorStatus::Loading
        };
        let ready = matches!(status, SimulatorStatus::Ready);
        SimulatorView {
            controls_enabled: ready && !self.blocked,
            status,
            playing: self.playing,
            blocked: self.blocked,
            inputs: self.inputs,
            params: self.params(),
        }
    }

    pub fn teardown(&mut self) {
        if let Some(mut g) = self.graph.teardown() {
            if self.playing {
                g.stop();
            }
            g.release();
        }
        self.playing = false;
        log::info!("[audio] simulator torn down");
    }
}

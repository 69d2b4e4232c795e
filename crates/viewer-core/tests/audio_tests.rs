// Audio parameter curves and simulator behaviour against a recording graph.

use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::audio_map::{
    AudioGraph, ControlInputs, DistanceEffects, EffectParam, EffectParams, RotorEffects,
    PARAM_RAMP_SEC,
};
use viewer_core::error::ViewerError;
use viewer_core::simulator::{DroneSoundSimulator, SimulatorStatus};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn distance_curve_endpoints() {
    let near = DistanceEffects::from_distance(1.0);
    assert!(close(near.gain, 0.992));
    assert!(close(near.cutoff_hz, 7940.0));
    assert!(close(near.reverb_mix, 0.005));

    let far = DistanceEffects::from_distance(100.0);
    assert!(close(far.gain, 0.2));
    assert!(close(far.cutoff_hz, 2000.0));
    assert!(close(far.reverb_mix, 0.5));
}

#[test]
fn rotor_curve_endpoints_and_midpoint() {
    let low = RotorEffects::from_rotor_speed(1000.0);
    assert!(close(low.pitch_semitones, -6.0));
    assert!(close(low.distortion, 0.0));
    assert!(close(low.playback_rate, 0.8));

    let high = RotorEffects::from_rotor_speed(6000.0);
    assert!(close(high.pitch_semitones, 6.0));
    assert!(close(high.distortion, 0.3));
    assert!(close(high.playback_rate, 1.2));

    let mid = RotorEffects::from_rotor_speed(3500.0);
    assert!(close(mid.pitch_semitones, 0.0));
    assert!(close(mid.distortion, 0.15));
    assert!(close(mid.playback_rate, 1.0));
}

#[test]
fn curves_are_monotonic_and_bounded() {
    let mut prev = DistanceEffects::from_distance(1.0);
    for d in 2..=100 {
        let fx = DistanceEffects::from_distance(d as f32);
        assert!(fx.gain <= prev.gain && fx.gain >= 0.1);
        assert!(fx.cutoff_hz <= prev.cutoff_hz && fx.cutoff_hz >= 1000.0);
        assert!(fx.reverb_mix >= prev.reverb_mix && fx.reverb_mix <= 0.5);
        prev = fx;
    }
    let mut prev = RotorEffects::from_rotor_speed(1000.0);
    for rpm in (1100..=6000).step_by(100) {
        let fx = RotorEffects::from_rotor_speed(rpm as f32);
        assert!(fx.pitch_semitones >= prev.pitch_semitones);
        assert!(fx.distortion >= prev.distortion);
        assert!(fx.playback_rate >= prev.playback_rate);
        prev = fx;
    }
}

#[test]
fn inputs_are_clamped() {
    let inputs = ControlInputs::new(500.0, 10.0);
    assert_eq!(inputs.distance, 100.0);
    assert_eq!(inputs.rotor_speed, 1000.0);
    let inputs = ControlInputs::new(f32::NAN, f32::INFINITY);
    assert_eq!(inputs, ControlInputs::default());
    assert_eq!(EffectParams::from_inputs(&inputs).distance, DistanceEffects::from_distance(50.0));
}

#[derive(Default)]
struct Log {
    writes: Vec<(EffectParam, f32, f64)>,
    started: u32,
    stopped: u32,
    released: u32,
}

struct RecordingGraph {
    log: Rc<RefCell<Log>>,
    running: bool,
}

impl RecordingGraph {
    fn new(running: bool) -> (Self, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        (
            Self {
                log: log.clone(),
                running,
            },
            log,
        )
    }
}

impl AudioGraph for RecordingGraph {
    fn ramp_to(&mut self, param: EffectParam, value: f32, seconds: f64) {
        self.log.borrow_mut().writes.push((param, value, seconds));
    }
    fn start(&mut self) -> Result<(), ViewerError> {
        self.log.borrow_mut().started += 1;
        Ok(())
    }
    fn stop(&mut self) {
        self.log.borrow_mut().stopped += 1;
    }
    fn context_running(&self) -> bool {
        self.running
    }
    fn release(&mut self) {
        self.log.borrow_mut().released += 1;
    }
}

#[test]
fn attach_pushes_every_parameter_once() {
    let mut sim = DroneSoundSimulator::new("/drone-fly-short.mp3");
    let ticket = sim.begin_load().expect("ticket");
    let (graph, log) = RecordingGraph::new(true);
    assert!(sim.attach(ticket, graph));

    let log = log.borrow();
    assert_eq!(log.writes.len(), 6);
    assert!(log.writes.iter().all(|&(_, _, s)| s == PARAM_RAMP_SEC));
    let gain = log
        .writes
        .iter()
        .find(|w| w.0 == EffectParam::Gain)
        .map(|w| w.1);
    assert!(close(gain.unwrap_or(0.0), 0.6));
    let rate = log
        .writes
        .iter()
        .find(|w| w.0 == EffectParam::PlaybackRate)
        .map(|w| w.1);
    assert!(close(rate.unwrap_or(0.0), 0.96));
}

#[test]
fn slider_changes_before_load_only_update_inputs() {
    let mut sim: DroneSoundSimulator<RecordingGraph> = DroneSoundSimulator::new("a.mp3");
    let ticket = sim.begin_load().expect("ticket");
    sim.set_distance(10.0);
    sim.set_rotor_speed(6000.0);
    assert_eq!(sim.view().status, SimulatorStatus::Loading);
    assert!(!sim.view().controls_enabled);

    let (graph, log) = RecordingGraph::new(true);
    sim.attach(ticket, graph);
    let log = log.borrow();
    let writes = &log.writes;
    let pitch = writes.iter().find(|w| w.0 == EffectParam::PitchShift).map(|w| w.1);
    assert!(close(pitch.unwrap_or(0.0), 6.0));
    let cutoff = writes.iter().find(|w| w.0 == EffectParam::LowpassCutoff).map(|w| w.1);
    assert!(close(cutoff.unwrap_or(0.0), 7400.0));
}

#[test]
fn each_slider_pushes_its_own_group() {
    let mut sim = DroneSoundSimulator::new("a.mp3");
    let ticket = sim.begin_load().expect("ticket");
    let (graph, log) = RecordingGraph::new(true);
    sim.attach(ticket, graph);
    log.borrow_mut().writes.clear();

    sim.set_distance(100.0);
    let params: Vec<_> = log.borrow().writes.iter().map(|w| w.0).collect();
    assert_eq!(
        params,
        [EffectParam::Gain, EffectParam::LowpassCutoff, EffectParam::ReverbMix]
    );
    log.borrow_mut().writes.clear();

    sim.set_rotor_speed(1000.0);
    let params: Vec<_> = log.borrow().writes.iter().map(|w| w.0).collect();
    assert_eq!(
        params,
        [EffectParam::PitchShift, EffectParam::Distortion, EffectParam::PlaybackRate]
    );
}

#[test]
fn playback_requires_loaded_graph() {
    let mut sim: DroneSoundSimulator<RecordingGraph> = DroneSoundSimulator::new("a.mp3");
    assert_eq!(sim.toggle_playback(), Err(ViewerError::NotReady));
    let _ticket = sim.begin_load().expect("ticket");
    assert_eq!(sim.toggle_playback(), Err(ViewerError::NotReady));
}

#[test]
fn blocked_context_disables_controls_until_gesture() {
    let mut sim = DroneSoundSimulator::new("a.mp3");
    let ticket = sim.begin_load().expect("ticket");
    let (graph, log) = RecordingGraph::new(false);
    sim.attach(ticket, graph);

    assert_eq!(sim.toggle_playback(), Err(ViewerError::AudioContextBlocked));
    let view = sim.view();
    assert!(view.blocked);
    assert!(!view.controls_enabled);
    assert!(!view.playing);
    assert_eq!(log.borrow().started, 0);

    sim.notify_gesture();
    assert!(sim.view().controls_enabled);
}

#[test]
fn toggle_starts_and_stops() {
    let mut sim = DroneSoundSimulator::new("a.mp3");
    let ticket = sim.begin_load().expect("ticket");
    let (graph, log) = RecordingGraph::new(true);
    sim.attach(ticket, graph);

    assert_eq!(sim.toggle_playback(), Ok(true));
    assert!(sim.is_playing());
    assert_eq!(sim.toggle_playback(), Ok(false));
    assert_eq!(log.borrow().started, 1);
    assert_eq!(log.borrow().stopped, 1);
}

#[test]
fn teardown_stops_and_releases() {
    let mut sim = DroneSoundSimulator::new("a.mp3");
    let ticket = sim.begin_load().expect("ticket");
    let (graph, log) = RecordingGraph::new(true);
    sim.attach(ticket, graph);
    sim.toggle_playback().expect("play");

    sim.teardown();
    assert_eq!(log.borrow().stopped, 1);
    assert_eq!(log.borrow().released, 1);
    assert_eq!(sim.view().status, SimulatorStatus::TornDown);
    assert_eq!(sim.toggle_playback(), Err(ViewerError::TornDown));

    let before = log.borrow().writes.len();
    sim.set_distance(3.0);
    assert_eq!(log.borrow().writes.len(), before);
}

#[test]
fn late_graph_after_teardown_is_released() {
    let mut sim = DroneSoundSimulator::new("a.mp3");
    let ticket = sim.begin_load().expect("ticket");
    sim.teardown();

    let (graph, log) = RecordingGraph::new(true);
    assert!(!sim.attach(ticket, graph));
    assert_eq!(log.borrow().released, 1);
    assert!(log.borrow().writes.is_empty());
    assert!(sim.graph().is_none());
}

#[test]
fn load_failure_is_reported() {
    let mut sim: DroneSoundSimulator<RecordingGraph> = DroneSoundSimulator::new("missing.mp3");
    let ticket = sim.begin_load().expect("ticket");
    assert!(sim.fail_load(ticket, ViewerError::asset_load("missing.mp3", "HTTP 404")));
    match sim.view().status {
        SimulatorStatus::Failed(msg) => assert!(msg.contains("HTTP 404")),
        other => panic!("unexpected status {other:?}"),
    }
    assert!(!sim.view().controls_enabled);
}

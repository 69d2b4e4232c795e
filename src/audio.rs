//! WebAudio rendition of the drone sound graph.
//!
//! source -> lowpass -> shaper -> {dry, convolver -> wet} -> master -> destination

use crate::constants::{
    CENTS_PER_SEMITONE, DISTORTION_CURVE_LEN, INITIAL_CUTOFF_HZ, INITIAL_DISTORTION, INITIAL_GAIN,
    REVERB_DECAY_SEC,
};
use crate::dsp::{distortion_curve, impulse_channel};
use viewer_core::audio_map::{AudioGraph, EffectParam};
use viewer_core::error::ViewerError;
use web_sys as web;

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ViewerError> {
    let g = web::GainNode::new(ctx)
        .map_err(|e| ViewerError::asset_load(label, format!("GainNode error: {e:?}")))?;
    g.gain().set_value(value);
    Ok(g)
}

fn build_impulse(ctx: &web::AudioContext) -> Result<web::AudioBuffer, ViewerError> {
    let sr = ctx.sample_rate();
    let len = (sr * REVERB_DECAY_SEC) as u32;
    let ir = ctx
        .create_buffer(2, len.max(1), sr)
        .map_err(|e| ViewerError::asset_load("reverb", format!("{e:?}")))?;
    for (ch, seed) in [0x1234ABCD_u32, 0x7890FEDC].into_iter().enumerate() {
        let mut data = impulse_channel(len as usize, seed);
        _ = ir.copy_to_channel(&mut data, ch as i32);
    }
    Ok(ir)
}

fn ramp(param: &web::AudioParam, value: f32, now: f64, seconds: f64) {
    _ = param.cancel_scheduled_values(now);
    _ = param.set_value_at_time(param.value(), now);
    _ = param.linear_ramp_to_value_at_time(value, now + seconds);
}

pub struct WebAudioGraph {
    ctx: web::AudioContext,
    buffer: web::AudioBuffer,
    source: Option<web::AudioBufferSourceNode>,
    lowpass: web::BiquadFilterNode,
    shaper: web::WaveShaperNode,
    dry: web::GainNode,
    wet: web::GainNode,
    reverb: web::ConvolverNode,
    master: web::GainNode,
    detune_cents: f32,
    playback_rate: f32,
    distortion: f32,
}

impl WebAudioGraph {
    pub fn new(ctx: web::AudioContext, buffer: web::AudioBuffer) -> Result<Self, ViewerError> {
        let lowpass = web::BiquadFilterNode::new(&ctx)
            .map_err(|e| ViewerError::asset_load("lowpass", format!("{e:?}")))?;
        lowpass.set_type(web::BiquadFilterType::Lowpass);
        lowpass.frequency().set_value(INITIAL_CUTOFF_HZ);

        #[allow(deprecated)]
        let shaper = web::WaveShaperNode::new(&ctx)
            .map_err(|e| ViewerError::asset_load("shaper", format!("{e:?}")))?;
        let mut curve = distortion_curve(INITIAL_DISTORTION, DISTORTION_CURVE_LEN);
        #[allow(deprecated)]
        shaper.set_curve(Some(curve.as_mut_slice()));

        let reverb = web::ConvolverNode::new(&ctx)
            .map_err(|e| ViewerError::asset_load("reverb", format!("{e:?}")))?;
        reverb.set_normalize(true);
        reverb.set_buffer(Some(&build_impulse(&ctx)?));

        let dry = create_gain(&ctx, 1.0, "dry")?;
        let wet = create_gain(&ctx, 0.0, "wet")?;
        let master = create_gain(&ctx, INITIAL_GAIN, "master")?;

        _ = lowpass.connect_with_audio_node(&shaper);
        _ = shaper.connect_with_audio_node(&dry);
        _ = shaper.connect_with_audio_node(&reverb);
        _ = reverb.connect_with_audio_node(&wet);
        _ = dry.connect_with_audio_node(&master);
        _ = wet.connect_with_audio_node(&master);
        _ = master.connect_with_audio_node(&ctx.destination());

        Ok(Self {
            ctx,
            buffer,
            source: None,
            lowpass,
            shaper,
            dry,
            wet,
            reverb,
            master,
            detune_cents: 0.0,
            playback_rate: 1.0,
            distortion: INITIAL_DISTORTION,
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    fn set_distortion(&mut self, amount: f32) {
        if (amount - self.distortion).abs() < f32::EPSILON {
            return;
        }
        self.distortion = amount;
        let mut curve = distortion_curve(amount, DISTORTION_CURVE_LEN);
        #[allow(deprecated)]
        self.shaper.set_curve(Some(curve.as_mut_slice()));
    }
}

impl AudioGraph for WebAudioGraph {
    fn ramp_to(&mut self, param: EffectParam, value: f32, seconds: f64) {
        let now = self.ctx.current_time();
        match param {
            EffectParam::Gain => ramp(&self.master.gain(), value, now, seconds),
            EffectParam::LowpassCutoff => ramp(&self.lowpass.frequency(), value, now, seconds),
            EffectParam::ReverbMix => {
                ramp(&self.wet.gain(), value, now, seconds);
                ramp(&self.dry.gain(), 1.0 - value, now, seconds);
            }
            EffectParam::PitchShift => {
                self.detune_cents = value * CENTS_PER_SEMITONE;
                if let Some(src) = &self.source {
                    ramp(&src.detune(), self.detune_cents, now, seconds);
                }
            }
            EffectParam::Distortion => self.set_distortion(value),
            EffectParam::PlaybackRate => {
                self.playback_rate = value;
                if let Some(src) = &self.source {
                    ramp(&src.playback_rate(), value, now, seconds);
                }
            }
        }
    }

    fn start(&mut self) -> Result<(), ViewerError> {
        self.stop();
        let src = self
            .ctx
            .create_buffer_source()
            .map_err(|e| ViewerError::asset_load("source", format!("{e:?}")))?;
        src.set_buffer(Some(&self.buffer));
        src.set_loop(true);
        src.playback_rate().set_value(self.playback_rate);
        src.detune().set_value(self.detune_cents);
        _ = src.connect_with_audio_node(&self.lowpass);
        src.start()
            .map_err(|e| ViewerError::asset_load("source", format!("start: {e:?}")))?;
        self.source = Some(src);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(src) = self.source.take() {
            _ = src.stop();
            _ = src.disconnect();
        }
    }

    fn context_running(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Running
    }

    fn release(&mut self) {
        self.stop();
        _ = self.lowpass.disconnect();
        _ = self.shaper.disconnect();
        _ = self.reverb.disconnect();
        _ = self.dry.disconnect();
        _ = self.wet.disconnect();
        _ = self.master.disconnect();
        _ = self.ctx.close();
        log::info!("[audio] graph released");
    }
}

//! Audio feedback
//!
//! Procedurally generated beeps, no external files needed. Each gameplay event
//! maps to a short list of tones; on wasm32 they play through Web Audio
//! oscillators, natively they are only logged.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{GameEvent, SnackOutcome};
use crate::sink::FeedbackSink;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Triangle,
    Sawtooth,
}

/// One beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub freq: f32,
    /// Seconds until the envelope has decayed
    pub duration: f64,
    pub waveform: Waveform,
    /// Peak gain before master/sfx volume
    pub volume: f32,
    /// Seconds after the event before the tone starts
    pub delay: f64,
}

const fn tone(freq: f32, duration: f64, waveform: Waveform, volume: f32, delay: f64) -> Tone {
    Tone {
        freq,
        duration,
        waveform,
        volume,
        delay,
    }
}

use Waveform::*;

const LANE: &[Tone] = &[tone(392.0, 0.06, Square, 0.05, 0.0)];
const BOOST: &[Tone] = &[tone(784.0, 0.08, Triangle, 0.06, 0.0)];
const SNACK_LIFE: &[Tone] = &[tone(523.0, 0.10, Triangle, 0.06, 0.0)];
const SNACK_WASTED: &[Tone] = &[tone(440.0, 0.08, Triangle, 0.05, 0.0)];
const SNACK_NONE: &[Tone] = &[tone(220.0, 0.06, Square, 0.03, 0.0)];
const COLLECT: &[Tone] = &[tone(659.0, 0.06, Triangle, 0.06, 0.0)];
const SMASH: &[Tone] = &[tone(988.0, 0.05, Square, 0.05, 0.0)];
const IMPACT: &[Tone] = &[tone(160.0, 0.12, Sawtooth, 0.06, 0.0)];
const STOP_CHORD: &[Tone] = &[
    tone(523.25, 0.10, Triangle, 0.06, 0.0),
    tone(659.25, 0.10, Triangle, 0.05, 0.02),
    tone(783.99, 0.12, Triangle, 0.045, 0.04),
];
const VICTORY: &[Tone] = &[
    tone(880.0, 0.16, Triangle, 0.07, 0.0),
    tone(1175.0, 0.20, Triangle, 0.06, 0.14),
    tone(1568.0, 0.24, Triangle, 0.05, 0.28),
];
const GAME_OVER: &[Tone] = &[
    tone(110.0, 0.18, Sawtooth, 0.07, 0.0),
    tone(98.0, 0.24, Sawtooth, 0.06, 0.18),
];

/// Tones for an event (empty for silent events)
pub fn tones_for(event: &GameEvent) -> &'static [Tone] {
    match event {
        GameEvent::LaneChanged { .. } => LANE,
        GameEvent::BoostActivated => BOOST,
        GameEvent::SnackUsed { outcome } => match outcome {
            SnackOutcome::ExtraLife => SNACK_LIFE,
            SnackOutcome::Wasted => SNACK_WASTED,
            SnackOutcome::NoTokens => SNACK_NONE,
        },
        GameEvent::CollectibleHit { .. } => COLLECT,
        GameEvent::ObstacleSmashed { .. } => SMASH,
        GameEvent::ObstacleHit { .. } => IMPACT,
        GameEvent::LevelAnnounced { .. } => STOP_CHORD,
        GameEvent::LevelComplete {
            final_stop: true, ..
        } => VICTORY,
        GameEvent::LevelComplete { .. } => &[],
        GameEvent::GameOver { .. } => GAME_OVER,
        GameEvent::MuteToggled { .. } => &[],
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Tones started since creation
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn played(&self) -> u64 {
        self.played
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play every tone for an event
    pub fn play(&mut self, event: &GameEvent) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for tone in tones_for(event) {
            self.play_tone(tone, vol);
            self.played += 1;
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_tone(&self, tone: &Tone, vol: f32) {
        log::trace!(
            "tone {:.2}Hz {:?} {:.2}s gain {:.3} (+{:.2}s)",
            tone.freq,
            tone.waveform,
            tone.duration,
            tone.volume * vol,
            tone.delay
        );
    }

    /// Resume (or lazily create) the audio context; browsers only allow this
    /// from a user gesture
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&mut self) {
        if self.ctx.is_none() {
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
        }
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn play_tone(&self, tone: &Tone, vol: f32) {
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let osc_type = match tone.waveform {
            Waveform::Square => OscillatorType::Square,
            Waveform::Triangle => OscillatorType::Triangle,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
        };
        let Some((osc, gain)) = create_osc(ctx, tone.freq, osc_type) else {
            return;
        };

        let t = ctx.current_time() + tone.delay;
        let peak = tone.volume * vol;
        gain.gain().set_value_at_time(peak, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + tone.duration)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.duration).ok();
    }
}

/// Create an oscillator routed through a gain node to the speakers
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

impl FeedbackSink for AudioManager {
    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::MuteToggled { muted } = event {
            self.set_muted(*muted);
            return;
        }
        self.play(event);
    }
}

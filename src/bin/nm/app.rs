//! Audio stream setup and the terminal key loop.

use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use rtrb::RingBuffer;

use noisemachine_dsp::dsp::{LfoShape, VcoShape};
use noisemachine_dsp::voice::{
    FilterInput, MessageReceiver, ModSource, NoiseMachineVoice, VoiceMessage, VoiceParams,
};
use noisemachine_dsp::{FrameCtx, MAX_VOLTS};

/// Ring buffer depth for key-press control messages.
const MESSAGE_CAPACITY: usize = 256;

pub struct NoiseMachineApp {
    params: VoiceParams,
}

impl NoiseMachineApp {
    pub fn new() -> Self {
        Self {
            params: VoiceParams::default(),
        }
    }

    /// Run the application (takes over, plays audio until `q`).
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        println!("=== NoiseMachine ===");
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);
        println!();
        println!("  space      trigger envelope     r  toggle repeat");
        println!("  up/down    VCO pitch            s  VCO ramp/square");
        println!("  left/right filter cutoff        [] resonance");
        println!("  1/2/3      LFO tri/sqr/pulse    n  VCO/noise input");
        println!("  m          cutoff mod LFO/AR    v  toggle VCA");
        println!("  -/=        volume               q  quit");
        println!();

        let (mut tx, rx) = RingBuffer::<VoiceMessage>::new(MESSAGE_CAPACITY);

        // Everything past this point on the audio thread is allocation-free.
        let mut voice = NoiseMachineVoice::new();
        let mut params = self.params;
        let mut rx = rx;
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    drain_messages(&mut rx, &mut params);

                    let ctx = FrameCtx::from_rate(sample_rate);
                    let frames = data.len() / channels;
                    for i in 0..frames {
                        let frame = voice.process(&params, 0.0, &ctx);
                        // A trigger message arms manual for exactly one frame.
                        params.ar_manual = false;

                        let sample = frame.mix / MAX_VOLTS;
                        for ch in 0..channels {
                            data[i * channels + ch] = sample;
                        }
                    }
                },
                |err| eprintln!("audio error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        terminal::enable_raw_mode()?;
        let result = key_loop(&mut tx, self.params);
        terminal::disable_raw_mode()?;
        result
    }
}

impl Default for NoiseMachineApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll key events and translate them into voice messages.
///
/// Keeps a local mirror of the panel state so toggles and knob nudges can be
/// computed without asking the audio thread.
fn key_loop(tx: &mut rtrb::Producer<VoiceMessage>, mut panel: VoiceParams) -> EyreResult<()> {
    loop {
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let msg = match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char(' ') => Some(VoiceMessage::Trigger),
            KeyCode::Char('r') => {
                panel.ar_repeat = !panel.ar_repeat;
                Some(VoiceMessage::SetRepeat(panel.ar_repeat))
            }
            KeyCode::Up => {
                panel.vco_pitch = (panel.vco_pitch + 0.1).min(2.0);
                Some(VoiceMessage::SetVcoPitch(panel.vco_pitch))
            }
            KeyCode::Down => {
                panel.vco_pitch = (panel.vco_pitch - 0.1).max(-1.0);
                Some(VoiceMessage::SetVcoPitch(panel.vco_pitch))
            }
            KeyCode::Right => {
                panel.vcf_cutoff = (panel.vcf_cutoff + 0.05).min(1.0);
                Some(VoiceMessage::SetCutoff(panel.vcf_cutoff))
            }
            KeyCode::Left => {
                panel.vcf_cutoff = (panel.vcf_cutoff - 0.05).max(0.0);
                Some(VoiceMessage::SetCutoff(panel.vcf_cutoff))
            }
            KeyCode::Char(']') => {
                panel.vcf_resonance = (panel.vcf_resonance + 5.0).min(100.0);
                Some(VoiceMessage::SetResonance(panel.vcf_resonance))
            }
            KeyCode::Char('[') => {
                panel.vcf_resonance = (panel.vcf_resonance - 5.0).max(1.0);
                Some(VoiceMessage::SetResonance(panel.vcf_resonance))
            }
            KeyCode::Char('1') => Some(VoiceMessage::SetLfoShape(LfoShape::Triangle)),
            KeyCode::Char('2') => Some(VoiceMessage::SetLfoShape(LfoShape::Square)),
            KeyCode::Char('3') => Some(VoiceMessage::SetLfoShape(LfoShape::Pulse)),
            KeyCode::Char('s') => {
                panel.vco_shape = match panel.vco_shape {
                    VcoShape::Ramp => VcoShape::Square,
                    VcoShape::Square => VcoShape::Ramp,
                };
                Some(VoiceMessage::SetVcoShape(panel.vco_shape))
            }
            KeyCode::Char('n') => {
                panel.vcf_input = match panel.vcf_input {
                    FilterInput::Vco => FilterInput::Noise,
                    FilterInput::Noise => FilterInput::Vco,
                };
                Some(VoiceMessage::SetFilterInput(panel.vcf_input))
            }
            KeyCode::Char('m') => {
                panel.vcf_mod_source = match panel.vcf_mod_source {
                    ModSource::Lfo => ModSource::Ar,
                    ModSource::Ar => ModSource::Lfo,
                };
                Some(VoiceMessage::SetModSource(panel.vcf_mod_source))
            }
            KeyCode::Char('v') => {
                panel.vca_on = !panel.vca_on;
                Some(VoiceMessage::SetVcaOn(panel.vca_on))
            }
            KeyCode::Char('=') => {
                panel.output_volume = (panel.output_volume + 0.05).min(1.0);
                Some(VoiceMessage::SetVolume(panel.output_volume))
            }
            KeyCode::Char('-') => {
                panel.output_volume = (panel.output_volume - 0.05).max(0.0);
                Some(VoiceMessage::SetVolume(panel.output_volume))
            }
            _ => None,
        };

        if let Some(msg) = msg {
            // Dropped messages just mean a missed key press.
            let _ = tx.push(msg);
        }
    }
}

/// Drain pending control messages into the audio thread's parameter snapshot.
fn drain_messages<R: MessageReceiver>(rx: &mut R, params: &mut VoiceParams) {
    while let Some(msg) = MessageReceiver::pop(rx) {
        apply_message(params, msg);
    }
}

/// Apply a control message to the audio thread's parameter snapshot.
fn apply_message(params: &mut VoiceParams, msg: VoiceMessage) {
    match msg {
        VoiceMessage::Trigger => params.ar_manual = true,
        VoiceMessage::SetRepeat(on) => params.ar_repeat = on,
        VoiceMessage::SetVcoPitch(pitch) => params.vco_pitch = pitch,
        VoiceMessage::SetVcoShape(shape) => params.vco_shape = shape,
        VoiceMessage::SetLfoRate(rate) => params.lfo_rate = rate,
        VoiceMessage::SetLfoShape(shape) => params.lfo_shape = shape,
        VoiceMessage::SetCutoff(cutoff) => params.vcf_cutoff = cutoff,
        VoiceMessage::SetResonance(resonance) => params.vcf_resonance = resonance,
        VoiceMessage::SetFilterInput(input) => params.vcf_input = input,
        VoiceMessage::SetModSource(source) => params.vcf_mod_source = source,
        VoiceMessage::SetVcaOn(on) => params.vca_on = on,
        VoiceMessage::SetVolume(volume) => params.output_volume = volume,
    }
}

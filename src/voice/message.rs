#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::{LfoShape, VcoShape};
use crate::voice::params::{FilterInput, ModSource};

/// Control changes delivered to the audio thread between frames.
#[derive(Debug, Copy, Clone)]
pub enum VoiceMessage {
    Trigger,
    SetRepeat(bool),
    SetVcoPitch(f32),
    SetVcoShape(VcoShape),
    SetLfoRate(f32),
    SetLfoShape(LfoShape),
    SetCutoff(f32),
    SetResonance(f32),
    SetFilterInput(FilterInput),
    SetModSource(ModSource),
    SetVcaOn(bool),
    SetVolume(f32),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<VoiceMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        Consumer::pop(self).ok()
    }
}

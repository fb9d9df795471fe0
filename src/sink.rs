use crate::model::{AnimationId, ButtonRole};

pub(crate) const PRESS_FEEDBACK_TICKS: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FrameUpdate {
    pub(crate) animation: AnimationId,
    pub(crate) frame: usize,
}

impl FrameUpdate {
    pub(crate) fn glyph(&self) -> &'static str {
        self.animation.glyph(self.frame)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SoundCue {
    ButtonPressed,
    AnimationTick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ButtonPulse {
    pub(crate) role: ButtonRole,
    pub(crate) remaining_ticks: u8,
}

/// Fire-and-forget outputs. Implementations must not fail or block.
pub(crate) trait DisplaySink {
    fn frame(&mut self, update: FrameUpdate);
    fn sound(&mut self, cue: SoundCue);
    fn pulse(&mut self, pulse: ButtonPulse);
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) frames: Vec<FrameUpdate>,
    pub(crate) sounds: Vec<SoundCue>,
    pub(crate) pulses: Vec<ButtonPulse>,
}

#[cfg(test)]
impl RecordingSink {
    pub(crate) fn last_frame(&self) -> Option<FrameUpdate> {
        self.frames.last().copied()
    }

    pub(crate) fn ticks(&self) -> usize {
        self.sounds
            .iter()
            .filter(|c| **c == SoundCue::AnimationTick)
            .count()
    }
}

#[cfg(test)]
impl DisplaySink for RecordingSink {
    fn frame(&mut self, update: FrameUpdate) {
        self.frames.push(update);
    }
    fn sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }
    fn pulse(&mut self, pulse: ButtonPulse) {
        self.pulses.push(pulse);
    }
}

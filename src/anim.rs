use crate::model::{AnimationId, Needs, FRAME_COUNT};
use crate::mood::resolve;
use crate::sink::{DisplaySink, FrameUpdate, SoundCue};

pub(crate) const FRAME_DWELL_MS: u64 = 700;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayMode {
    Idle,
    Reactive,
}

#[derive(Clone, Debug)]
pub(crate) struct AnimationPlayer {
    animation: AnimationId,
    frame: usize,
    mode: PlayMode,
    last_advance_ms: u64,
}

impl AnimationPlayer {
    pub(crate) fn new(now_ms: u64) -> Self {
        Self {
            animation: AnimationId::Idle,
            frame: 0,
            mode: PlayMode::Idle,
            last_advance_ms: now_ms,
        }
    }

    pub(crate) fn animation(&self) -> AnimationId {
        self.animation
    }

    #[cfg(test)]
    pub(crate) fn frame(&self) -> usize {
        self.frame
    }

    pub(crate) fn is_reactive(&self) -> bool {
        self.mode == PlayMode::Reactive
    }

    pub(crate) fn current(&self) -> FrameUpdate {
        FrameUpdate {
            animation: self.animation,
            frame: self.frame,
        }
    }

    pub(crate) fn glyph(&self) -> &'static str {
        self.animation.glyph(self.frame)
    }

    fn show<S: DisplaySink + ?Sized>(&mut self, animation: AnimationId, sink: &mut S) {
        self.animation = animation;
        self.frame = 0;
        sink.frame(self.current());
    }

    pub(crate) fn trigger<S: DisplaySink + ?Sized>(
        &mut self,
        animation: AnimationId,
        now_ms: u64,
        sink: &mut S,
    ) {
        self.mode = PlayMode::Reactive;
        self.last_advance_ms = now_ms;
        self.show(animation, sink);
    }

    /// A finished reaction hands over to the current mood.
    pub(crate) fn advance<S: DisplaySink + ?Sized>(
        &mut self,
        now_ms: u64,
        needs: &Needs,
        dead: bool,
        sink: &mut S,
    ) -> bool {
        if now_ms.saturating_sub(self.last_advance_ms) < FRAME_DWELL_MS {
            return false;
        }
        self.frame += 1;
        self.last_advance_ms = now_ms;
        if self.is_reactive() {
            sink.sound(SoundCue::AnimationTick);
        }

        if self.frame >= FRAME_COUNT {
            self.frame = 0;
            if self.is_reactive() {
                self.mode = PlayMode::Idle;
                self.animation = resolve(needs, dead).animation();
                tracing::debug!(next = %self.animation, "reaction finished");
            }
        }
        sink.frame(self.current());
        true
    }

    // swaps mid-loop, never mid-reaction
    pub(crate) fn follow_mood<S: DisplaySink + ?Sized>(
        &mut self,
        needs: &Needs,
        dead: bool,
        sink: &mut S,
    ) -> bool {
        if self.is_reactive() || dead {
            return false;
        }
        let mood = resolve(needs, dead);
        let target = mood.animation();
        if target == self.animation {
            return false;
        }
        tracing::debug!(from = %self.animation, mood = mood.as_str(), "mood changed");
        self.show(target, sink);
        true
    }

    pub(crate) fn force_dead<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) {
        self.mode = PlayMode::Idle;
        self.show(AnimationId::Dead, sink);
    }
}

use crate::model::{ButtonEffect, ButtonRole, Needs, NEED_MAX};
use crate::sim::PetState;
use crate::sink::{ButtonPulse, DisplaySink, SoundCue, PRESS_FEEDBACK_TICKS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PressOutcome {
    Rewarded,
    Penalized,
    Neutral,
}

/// Judges a press against the needs as they were before it lands.
pub(crate) fn score_press(needs: &Needs, effect: ButtonEffect) -> PressOutcome {
    let any_good = effect
        .targets
        .iter()
        .any(|&k| needs.value(k) as u16 + effect.amount as u16 <= NEED_MAX as u16);
    let all_overfull = effect.targets.iter().all(|&k| needs.value(k) >= NEED_MAX);

    if any_good {
        PressOutcome::Rewarded
    } else if all_overfull {
        PressOutcome::Penalized
    } else {
        PressOutcome::Neutral
    }
}

impl PetState {
    /// A dead pet still takes presses; only decay and the mood stay frozen.
    pub(crate) fn on_button<S: DisplaySink + ?Sized>(
        &mut self,
        role: ButtonRole,
        now_ms: u64,
        sink: &mut S,
    ) -> PressOutcome {
        let effect = role.effect();
        let outcome = score_press(&self.needs, effect);
        match outcome {
            PressOutcome::Rewarded => self.care_points = self.care_points.saturating_add(1),
            PressOutcome::Penalized => self.care_points = self.care_points.saturating_sub(1),
            PressOutcome::Neutral => {}
        }
        self.needs.apply_care(effect.amount, effect.targets);

        sink.sound(SoundCue::ButtonPressed);
        self.player.trigger(role.reaction(), now_ms, sink);
        sink.pulse(ButtonPulse {
            role,
            remaining_ticks: PRESS_FEEDBACK_TICKS,
        });

        tracing::debug!(
            role = %role,
            ?outcome,
            care_points = self.care_points,
            needs = ?self.needs.values(),
            dead = self.dead,
            "button pressed"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::FRAME_DWELL_MS;
    use crate::model::{AnimationId, FRAME_COUNT};
    use crate::sink::RecordingSink;
    use rand::{rngs::StdRng, SeedableRng};

    fn pet_with(h: u8, c: u8, s: u8) -> PetState {
        let mut rng = StdRng::seed_from_u64(11);
        let mut p = PetState::new("Bean", 0, &mut rng);
        p.needs = Needs::with_values(h, c, s);
        p
    }

    #[test]
    fn test_press_on_full_need_costs_but_floors_at_zero() {
        let mut p = pet_with(100, 100, 100);
        let mut sink = RecordingSink::default();
        assert_eq!(
            p.on_button(ButtonRole::Bath, 0, &mut sink),
            PressOutcome::Penalized
        );
        assert_eq!(p.care_points, 0);
        assert_eq!(p.needs.values(), [100, 100, 100]);

        p.care_points = 3;
        p.on_button(ButtonRole::Bath, 0, &mut sink);
        assert_eq!(p.care_points, 2);
    }

    #[test]
    fn test_press_that_exactly_fills_is_rewarded() {
        let mut p = pet_with(95, 100, 100);
        let mut sink = RecordingSink::default();
        assert_eq!(
            p.on_button(ButtonRole::Love, 0, &mut sink),
            PressOutcome::Rewarded
        );
        assert_eq!(p.care_points, 1);
        assert_eq!(p.needs.values(), [100, 100, 100]);
    }

    #[test]
    fn test_partial_overfill_is_neutral() {
        // no target has room for +5, but not every target is full either
        let mut p = pet_with(100, 100, 96);
        p.care_points = 4;
        let mut sink = RecordingSink::default();
        assert_eq!(
            p.on_button(ButtonRole::Cheer, 0, &mut sink),
            PressOutcome::Neutral
        );
        assert_eq!(p.care_points, 4);
        assert_eq!(p.needs.values(), [100, 100, 100]);
    }

    #[test]
    fn test_single_target_with_partial_room_is_neutral() {
        let mut p = pet_with(95, 50, 50);
        let mut sink = RecordingSink::default();
        assert_eq!(
            p.on_button(ButtonRole::Food, 0, &mut sink),
            PressOutcome::Neutral
        );
        assert_eq!(p.needs.values(), [100, 50, 50]);
    }

    #[test]
    fn test_any_good_takes_precedence() {
        let needs = Needs::with_values(100, 100, 20);
        assert_eq!(
            score_press(&needs, ButtonRole::Treat.effect()),
            PressOutcome::Rewarded
        );
    }

    #[test]
    fn test_press_emits_feedback_and_reaction() {
        let mut p = pet_with(50, 50, 50);
        let mut sink = RecordingSink::default();
        p.on_button(ButtonRole::Sleep, 1_234, &mut sink);
        assert_eq!(p.needs.values(), [50, 50, 60]);
        assert!(p.player.is_reactive());
        assert_eq!(p.player.animation(), AnimationId::Snooze);
        assert_eq!(sink.sounds, vec![SoundCue::ButtonPressed]);
        assert_eq!(
            sink.pulses,
            vec![ButtonPulse {
                role: ButtonRole::Sleep,
                remaining_ticks: 3
            }]
        );
    }

    #[test]
    fn test_dead_pet_still_takes_presses() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut sink = RecordingSink::default();
        let mut p = pet_with(0, 0, 0);
        p.tick(10, &mut rng, &mut sink);
        assert!(p.dead);

        assert_eq!(
            p.on_button(ButtonRole::Food, 100, &mut sink),
            PressOutcome::Rewarded
        );
        assert_eq!(p.needs.values(), [10, 0, 0]);
        assert_eq!(p.care_points, 1);
        assert_eq!(p.player.animation(), AnimationId::Munch);

        // the reaction plays out, then the dead face comes back
        let mut now = 100;
        for _ in 0..FRAME_COUNT {
            now += FRAME_DWELL_MS;
            p.tick(now, &mut rng, &mut sink);
        }
        assert!(p.dead);
        assert!(!p.player.is_reactive());
        assert_eq!(p.player.animation(), AnimationId::Dead);
        // no decay once dead
        assert_eq!(p.needs.values(), [10, 0, 0]);
    }

    #[test]
    fn test_care_points_never_negative_under_spam() {
        let mut p = pet_with(100, 100, 100);
        let mut sink = RecordingSink::default();
        for role in ButtonRole::ALL.into_iter().cycle().take(60) {
            p.on_button(role, 0, &mut sink);
            for v in p.needs.values() {
                assert!(v <= 100);
            }
        }
        assert_eq!(p.care_points, 0);
    }
}

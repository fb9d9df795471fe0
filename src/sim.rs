use crate::anim::AnimationPlayer;
use crate::model::{NeedKind, Needs};
use crate::mood::happiness_percent;
use crate::sink::DisplaySink;
use rand::Rng;

#[derive(Clone, Debug)]
pub(crate) struct PetState {
    pub(crate) name: String,
    pub(crate) needs: Needs,
    pub(crate) care_points: u32,
    pub(crate) dead: bool,
    pub(crate) player: AnimationPlayer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bars {
    pub(crate) hunger: u8,
    pub(crate) cleanliness: u8,
    pub(crate) sleepiness: u8,
    pub(crate) happiness: u8,
}

pub(crate) fn check_death(needs: &Needs) -> bool {
    needs.all_empty()
}

impl PetState {
    pub(crate) fn new<R: Rng + ?Sized>(name: impl Into<String>, now_ms: u64, rng: &mut R) -> Self {
        Self {
            name: name.into(),
            needs: Needs::full(now_ms, rng),
            care_points: 0,
            dead: false,
            player: AnimationPlayer::new(now_ms),
        }
    }

    // decay, death check, frame advance, mood follow
    pub(crate) fn tick<R, S>(&mut self, now_ms: u64, rng: &mut R, sink: &mut S)
    where
        R: Rng + ?Sized,
        S: DisplaySink + ?Sized,
    {
        if !self.dead {
            self.needs.decay(now_ms, rng);
            if check_death(&self.needs) {
                self.dead = true;
                self.player.force_dead(sink);
                tracing::info!(
                    name = %self.name,
                    care_points = self.care_points,
                    "pet died"
                );
            }
        }

        self.player.advance(now_ms, &self.needs, self.dead, sink);
        self.player.follow_mood(&self.needs, self.dead, sink);
    }

    pub(crate) fn bars(&self) -> Bars {
        Bars {
            hunger: self.needs.value(NeedKind::Hunger),
            cleanliness: self.needs.value(NeedKind::Cleanliness),
            sleepiness: self.needs.value(NeedKind::Sleepiness),
            happiness: happiness_percent(&self.needs),
        }
    }
}

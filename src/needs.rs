use crate::model::{Need, NeedKind, Needs, NEED_MAX};
use rand::Rng;

const DECAY_STEP: std::ops::RangeInclusive<u8> = 1..=3;

impl Need {
    fn scheduled<R: Rng + ?Sized>(kind: NeedKind, now_ms: u64, rng: &mut R) -> Self {
        Self {
            value: NEED_MAX,
            next_due_ms: now_ms + rng.gen_range(kind.decay_interval_ms()),
        }
    }

    fn decay_if_due<R: Rng + ?Sized>(&mut self, kind: NeedKind, now_ms: u64, rng: &mut R) -> bool {
        if now_ms < self.next_due_ms || self.value == 0 {
            return false;
        }
        let step = rng.gen_range(DECAY_STEP);
        self.value = self.value.saturating_sub(step);
        self.next_due_ms = now_ms + rng.gen_range(kind.decay_interval_ms());
        true
    }
}

impl Needs {
    pub(crate) fn full<R: Rng + ?Sized>(now_ms: u64, rng: &mut R) -> Self {
        Self {
            hunger: Need::scheduled(NeedKind::Hunger, now_ms, rng),
            cleanliness: Need::scheduled(NeedKind::Cleanliness, now_ms, rng),
            sleepiness: Need::scheduled(NeedKind::Sleepiness, now_ms, rng),
        }
    }

    /// Needs already at zero keep their schedule.
    pub(crate) fn decay<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> bool {
        let mut changed = false;
        for kind in NeedKind::ALL {
            if self.get_mut(kind).decay_if_due(kind, now_ms, rng) {
                tracing::trace!(need = kind.label(), value = self.value(kind), "decayed");
                changed = true;
            }
        }
        changed
    }

    pub(crate) fn apply_care(&mut self, amount: u8, targets: &[NeedKind]) {
        for &kind in targets {
            let need = self.get_mut(kind);
            need.value = need.value.saturating_add(amount).min(NEED_MAX);
        }
    }

    pub(crate) fn all_empty(&self) -> bool {
        self.values().iter().all(|&v| v == 0)
    }
}

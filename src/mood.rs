use crate::model::{Mood, NeedKind, Needs};

const LOW_THRESHOLD: f32 = 50.0;

pub(crate) fn happiness(needs: &Needs) -> f32 {
    let sum: u32 = needs.values().iter().map(|&v| v as u32).sum();
    (sum as f32 / 3.0).clamp(0.0, 100.0)
}

pub(crate) fn happiness_percent(needs: &Needs) -> u8 {
    happiness(needs) as u8
}

/// The most neglected need; ties go to the earlier need in `NeedKind::ALL`.
pub(crate) fn lowest(needs: &Needs) -> (NeedKind, u8) {
    let mut best = (NeedKind::Hunger, needs.value(NeedKind::Hunger));
    for kind in NeedKind::ALL {
        let v = needs.value(kind);
        if v < best.1 {
            best = (kind, v);
        }
    }
    best
}

pub(crate) fn resolve(needs: &Needs, dead: bool) -> Mood {
    if dead {
        return Mood::Dead;
    }
    let happy = happiness(needs);
    let (kind, low) = lowest(needs);
    let low = low as f32;
    if happy < LOW_THRESHOLD && low < LOW_THRESHOLD {
        Mood::Sad
    } else if low < LOW_THRESHOLD {
        Mood::low(kind)
    } else {
        Mood::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_full_is_idle() {
        assert_eq!(resolve(&Needs::with_values(100, 100, 100), false), Mood::Idle);
    }

    #[test]
    fn test_single_low_need_picks_specific_mood() {
        let n = Needs::with_values(40, 90, 90);
        assert!((happiness(&n) - 73.333).abs() < 0.01);
        assert_eq!(resolve(&n, false), Mood::Hungry);
        assert_eq!(resolve(&Needs::with_values(90, 49, 90), false), Mood::Dirty);
        assert_eq!(resolve(&Needs::with_values(90, 90, 0), false), Mood::Sleepy);
    }

    #[test]
    fn test_low_happiness_is_sad() {
        let n = Needs::with_values(30, 20, 10);
        assert!((happiness(&n) - 20.0).abs() < 0.01);
        assert_eq!(lowest(&n), (NeedKind::Sleepiness, 10));
        assert_eq!(resolve(&n, false), Mood::Sad);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(resolve(&Needs::with_values(50, 50, 50), false), Mood::Idle);
        // mean exactly 50 is not sad
        assert_eq!(resolve(&Needs::with_values(49, 51, 50), false), Mood::Hungry);
        // mean just under 50 is
        assert_eq!(resolve(&Needs::with_values(49, 50, 50), false), Mood::Sad);
    }

    #[test]
    fn test_tie_break_order() {
        assert_eq!(lowest(&Needs::with_values(20, 20, 20)).0, NeedKind::Hunger);
        assert_eq!(lowest(&Needs::with_values(90, 20, 20)).0, NeedKind::Cleanliness);
        assert_eq!(resolve(&Needs::with_values(90, 30, 30), false), Mood::Dirty);
    }

    #[test]
    fn test_dead_wins() {
        assert_eq!(resolve(&Needs::with_values(100, 100, 100), true), Mood::Dead);
        assert_eq!(resolve(&Needs::with_values(0, 0, 0), true), Mood::Dead);
    }

    #[test]
    fn test_resolve_is_pure() {
        let n = Needs::with_values(12, 77, 45);
        let first = resolve(&n, false);
        for _ in 0..10 {
            assert_eq!(resolve(&n, false), first);
        }
    }

    #[test]
    fn test_happiness_percent_rounds_down() {
        assert_eq!(happiness_percent(&Needs::with_values(40, 90, 90)), 73);
        assert_eq!(happiness_percent(&Needs::with_values(100, 100, 100)), 100);
        assert_eq!(happiness_percent(&Needs::with_values(0, 0, 1)), 0);
    }
}

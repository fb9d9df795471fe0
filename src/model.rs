use std::{fmt, ops::Range, str::FromStr};
use thiserror::Error;

pub(crate) const NEED_MAX: u8 = 100;

pub(crate) const FRAME_COUNT: usize = 5;

pub(crate) const PET_NAMES: [&str; 15] = [
    "Mochi", "Pixel", "Noodle", "Sprout", "Ziggy", "Pebble", "Gizmo", "Biscuit", "Miso", "Pip",
    "Nova", "Bean", "Puddle", "Sushi", "Tater",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum NeedKind {
    Hunger,
    Cleanliness,
    Sleepiness,
}

impl NeedKind {
    /// Fixed order; also the tie-break order when looking for the lowest need.
    pub(crate) const ALL: [NeedKind; 3] =
        [NeedKind::Hunger, NeedKind::Cleanliness, NeedKind::Sleepiness];

    pub(crate) fn label(self) -> &'static str {
        match self {
            NeedKind::Hunger => "hunger",
            NeedKind::Cleanliness => "cleanliness",
            NeedKind::Sleepiness => "sleepiness",
        }
    }

    pub(crate) fn decay_interval_ms(self) -> Range<u64> {
        match self {
            NeedKind::Hunger => 5_000..10_000,
            NeedKind::Cleanliness => 8_000..12_000,
            NeedKind::Sleepiness => 10_000..15_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Need {
    pub(crate) value: u8,
    pub(crate) next_due_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Needs {
    pub(crate) hunger: Need,
    pub(crate) cleanliness: Need,
    pub(crate) sleepiness: Need,
}

impl Needs {
    pub(crate) fn get(&self, kind: NeedKind) -> &Need {
        match kind {
            NeedKind::Hunger => &self.hunger,
            NeedKind::Cleanliness => &self.cleanliness,
            NeedKind::Sleepiness => &self.sleepiness,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: NeedKind) -> &mut Need {
        match kind {
            NeedKind::Hunger => &mut self.hunger,
            NeedKind::Cleanliness => &mut self.cleanliness,
            NeedKind::Sleepiness => &mut self.sleepiness,
        }
    }

    pub(crate) fn value(&self, kind: NeedKind) -> u8 {
        self.get(kind).value
    }

    pub(crate) fn values(&self) -> [u8; 3] {
        [
            self.hunger.value,
            self.cleanliness.value,
            self.sleepiness.value,
        ]
    }

    #[cfg(test)]
    pub(crate) fn with_values(hunger: u8, cleanliness: u8, sleepiness: u8) -> Self {
        let need = |value: u8| Need {
            value: value.min(NEED_MAX),
            next_due_ms: 0,
        };
        Self {
            hunger: need(hunger),
            cleanliness: need(cleanliness),
            sleepiness: need(sleepiness),
        }
    }
}

/* -----------------------------
   Animation registry
------------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum AnimationId {
    Idle,
    Hungry,
    Dirty,
    Sleepy,
    Sad,
    Dead,
    Munch,
    Splash,
    Hearts,
    Sparkle,
    Snooze,
    Sugar,
}

const IDLE: [&str; FRAME_COUNT] = ["(O ◡ O)"; FRAME_COUNT];
const HUNGRY: [&str; FRAME_COUNT] = [
    "(O . O)🍖",
    "(O o O)🍖",
    "(O . O)🍖",
    "(O o O)🍖",
    "(O . O)🍖",
];
const DIRTY: [&str; FRAME_COUNT] = [
    "(O . O)💩",
    "(O o O)💩",
    "(O . O)💩",
    "(O o O)💩",
    "(O . O)💩",
];
const SLEEPY: [&str; FRAME_COUNT] = [
    "(O . O)💤",
    "(- . -)💤",
    "(O . O)💤",
    "(- . -)💤",
    "(- - -)💤",
];
const SAD: [&str; FRAME_COUNT] = ["(- . -)", "(T . T)", "(- . -)", "(T . T)", "(- . -)"];
const DEAD: [&str; FRAME_COUNT] = ["(x . x)"; FRAME_COUNT];
const MUNCH: [&str; FRAME_COUNT] = [
    "(O = O)🍖",
    "(O 0 O)🍖",
    "(O = O)🍖",
    "(O 0 O)🍖",
    "(O = O)🍖",
];
const SPLASH: [&str; FRAME_COUNT] = [
    "🫧(O o O)",
    "(O o O)🫧",
    "🫧(O o O)",
    "(O o O)🫧",
    "🫧(O o O)",
];
const HEARTS: [&str; FRAME_COUNT] = ["(O v O)", "(❤ v ❤)", "(O v O)", "(❤ v ❤)", "(O v O)"];
const SPARKLE: [&str; FRAME_COUNT] = [
    "(⭐ o ⭐)",
    "(🌟 v 🌟)",
    "(⭐ o ⭐)",
    "(🌟 o 🌟)",
    "(⭐ o ⭐)",
];
const SNOOZE: [&str; FRAME_COUNT] = [
    "💤(- 0 -)💤",
    "💤(- o -)💤",
    "💤(- 0 -)💤",
    "💤(- o -)💤",
    "💤(- 0 -)💤",
];
const SUGAR: [&str; FRAME_COUNT] = [
    "(O = O)🍬",
    "(O 0 O)🍬",
    "(O = O)🍬",
    "(⭐ v ⭐)",
    "(⭐ v ⭐)",
];

impl AnimationId {
    #[cfg(test)]
    pub(crate) const ALL: [AnimationId; 12] = [
        AnimationId::Idle,
        AnimationId::Hungry,
        AnimationId::Dirty,
        AnimationId::Sleepy,
        AnimationId::Sad,
        AnimationId::Dead,
        AnimationId::Munch,
        AnimationId::Splash,
        AnimationId::Hearts,
        AnimationId::Sparkle,
        AnimationId::Snooze,
        AnimationId::Sugar,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            AnimationId::Idle => "idle",
            AnimationId::Hungry => "hungry",
            AnimationId::Dirty => "dirty",
            AnimationId::Sleepy => "sleepy",
            AnimationId::Sad => "sad",
            AnimationId::Dead => "dead",
            AnimationId::Munch => "munch",
            AnimationId::Splash => "splash",
            AnimationId::Hearts => "hearts",
            AnimationId::Sparkle => "sparkle",
            AnimationId::Snooze => "snooze",
            AnimationId::Sugar => "sugar",
        }
    }

    pub(crate) fn frames(self) -> &'static [&'static str; FRAME_COUNT] {
        match self {
            AnimationId::Idle => &IDLE,
            AnimationId::Hungry => &HUNGRY,
            AnimationId::Dirty => &DIRTY,
            AnimationId::Sleepy => &SLEEPY,
            AnimationId::Sad => &SAD,
            AnimationId::Dead => &DEAD,
            AnimationId::Munch => &MUNCH,
            AnimationId::Splash => &SPLASH,
            AnimationId::Hearts => &HEARTS,
            AnimationId::Sparkle => &SPARKLE,
            AnimationId::Snooze => &SNOOZE,
            AnimationId::Sugar => &SUGAR,
        }
    }

    /// Out-of-range frames wrap rather than panic.
    pub(crate) fn glyph(self, frame: usize) -> &'static str {
        self.frames()[frame % FRAME_COUNT]
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/* -----------------------------
   Moods
------------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mood {
    Idle,
    Hungry,
    Dirty,
    Sleepy,
    Sad,
    Dead,
}

impl Mood {
    pub(crate) fn as_str(self) -> &'static str {
        self.animation().name()
    }

    pub(crate) fn animation(self) -> AnimationId {
        match self {
            Mood::Idle => AnimationId::Idle,
            Mood::Hungry => AnimationId::Hungry,
            Mood::Dirty => AnimationId::Dirty,
            Mood::Sleepy => AnimationId::Sleepy,
            Mood::Sad => AnimationId::Sad,
            Mood::Dead => AnimationId::Dead,
        }
    }

    pub(crate) fn low(kind: NeedKind) -> Self {
        match kind {
            NeedKind::Hunger => Mood::Hungry,
            NeedKind::Cleanliness => Mood::Dirty,
            NeedKind::Sleepiness => Mood::Sleepy,
        }
    }
}

/* -----------------------------
   Buttons
------------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ButtonRole {
    Food,
    Bath,
    Love,
    Cheer,
    Sleep,
    Treat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ButtonEffect {
    pub(crate) amount: u8,
    pub(crate) targets: &'static [NeedKind],
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown button role `{0}`")]
pub(crate) struct UnknownRole(pub(crate) String);

impl ButtonRole {
    /// On-screen order: the first three sit in the left column, the rest on the right.
    pub(crate) const ALL: [ButtonRole; 6] = [
        ButtonRole::Food,
        ButtonRole::Bath,
        ButtonRole::Love,
        ButtonRole::Cheer,
        ButtonRole::Sleep,
        ButtonRole::Treat,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            ButtonRole::Food => "food",
            ButtonRole::Bath => "bath",
            ButtonRole::Love => "love",
            ButtonRole::Cheer => "cheer",
            ButtonRole::Sleep => "sleep",
            ButtonRole::Treat => "treat",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ButtonRole::Food => 0,
            ButtonRole::Bath => 1,
            ButtonRole::Love => 2,
            ButtonRole::Cheer => 3,
            ButtonRole::Sleep => 4,
            ButtonRole::Treat => 5,
        }
    }

    pub(crate) fn effect(self) -> ButtonEffect {
        const ALL_NEEDS: &[NeedKind] = &NeedKind::ALL;
        match self {
            ButtonRole::Food => ButtonEffect {
                amount: 10,
                targets: &[NeedKind::Hunger],
            },
            ButtonRole::Bath => ButtonEffect {
                amount: 10,
                targets: &[NeedKind::Cleanliness],
            },
            ButtonRole::Sleep => ButtonEffect {
                amount: 10,
                targets: &[NeedKind::Sleepiness],
            },
            ButtonRole::Love | ButtonRole::Cheer | ButtonRole::Treat => ButtonEffect {
                amount: 5,
                targets: ALL_NEEDS,
            },
        }
    }

    pub(crate) fn reaction(self) -> AnimationId {
        match self {
            ButtonRole::Food => AnimationId::Munch,
            ButtonRole::Bath => AnimationId::Splash,
            ButtonRole::Love => AnimationId::Hearts,
            ButtonRole::Cheer => AnimationId::Sparkle,
            ButtonRole::Sleep => AnimationId::Snooze,
            ButtonRole::Treat => AnimationId::Sugar,
        }
    }

    pub(crate) fn emoji(self) -> &'static str {
        match self {
            ButtonRole::Food => "🍖",
            ButtonRole::Bath => "🛁",
            ButtonRole::Love => "❤",
            ButtonRole::Cheer => "🌟",
            ButtonRole::Sleep => "💤",
            ButtonRole::Treat => "🍬",
        }
    }

    pub(crate) fn hotkey(self) -> char {
        match self {
            ButtonRole::Food => 'f',
            ButtonRole::Bath => 'b',
            ButtonRole::Love => 'l',
            ButtonRole::Cheer => 'c',
            ButtonRole::Sleep => 's',
            ButtonRole::Treat => 't',
        }
    }
}

impl FromStr for ButtonRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ButtonRole::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRole(wanted.to_string()))
    }
}

impl fmt::Display for ButtonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_animation_has_five_frames() {
        for id in AnimationId::ALL {
            assert_eq!(id.frames().len(), FRAME_COUNT, "{id}");
            assert!(id.frames().iter().all(|f| !f.is_empty()), "{id}");
        }
    }

    #[test]
    fn test_glyph_wraps_frame_index() {
        assert_eq!(AnimationId::Sad.glyph(1), "(T . T)");
        assert_eq!(AnimationId::Sad.glyph(6), "(T . T)");
    }

    #[test]
    fn test_button_effect_table() {
        let food = ButtonRole::Food.effect();
        assert_eq!(food.amount, 10);
        assert_eq!(food.targets, &[NeedKind::Hunger]);
        assert_eq!(ButtonRole::Bath.effect().targets, &[NeedKind::Cleanliness]);
        assert_eq!(ButtonRole::Sleep.effect().targets, &[NeedKind::Sleepiness]);
        for role in [ButtonRole::Love, ButtonRole::Cheer, ButtonRole::Treat] {
            let e = role.effect();
            assert_eq!(e.amount, 5);
            assert_eq!(e.targets, &NeedKind::ALL);
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("food".parse::<ButtonRole>(), Ok(ButtonRole::Food));
        assert_eq!(" Treat ".parse::<ButtonRole>(), Ok(ButtonRole::Treat));
        assert_eq!(
            "pet".parse::<ButtonRole>(),
            Err(UnknownRole("pet".to_string()))
        );
    }

    #[test]
    fn test_role_index_matches_order() {
        for (i, role) in ButtonRole::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_mood_names() {
        assert_eq!(Mood::Idle.as_str(), "idle");
        assert_eq!(Mood::Sad.as_str(), "sad");
        assert_eq!(Mood::Dead.as_str(), "dead");
        assert_eq!(Mood::low(NeedKind::Cleanliness).as_str(), "dirty");
    }
}

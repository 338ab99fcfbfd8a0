//! Side-effect requests emitted by the state machine.
//!
//! The core never plays audio or draws anything. Every transition returns the
//! sounds and notifications it wants the presentation layer to realize.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::constants::NOTICE_DEFAULT;

/// Sound cue identifiers understood by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    Ambient,
    StartPress,
    Success,
    Fail,
    Hit,
    Heal,
    Blaster,
    Win,
    Congratulations,
    BossBefore,
    BossFight,
    Paradox,
    TutorialOne,
    TutorialTwo,
    NarrationMajor,
    NarrationDoctor,
    NarrationUnit,
}

impl Sound {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::StartPress => "start_press",
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Hit => "hit",
            Self::Heal => "heal",
            Self::Blaster => "blaster",
            Self::Win => "win",
            Self::Congratulations => "congratulations",
            Self::BossBefore => "boss_before",
            Self::BossFight => "boss_fight",
            Self::Paradox => "paradox",
            Self::TutorialOne => "tutorial_one",
            Self::TutorialTwo => "tutorial_two",
            Self::NarrationMajor => "narration_major",
            Self::NarrationDoctor => "narration_doctor",
            Self::NarrationUnit => "narration_unit",
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GREEN: Self = Self(0, 255, 0);
    pub const RED: Self = Self(255, 0, 0);
    pub const CYAN: Self = Self(0, 255, 255);
    pub const MINT: Self = Self(0, 255, 150);
    pub const AMBER: Self = Self(255, 150, 0);
    pub const YELLOW: Self = Self(255, 255, 0);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub detail: String,
    pub color: Rgb,
    pub duration_ticks: u32,
}

impl Notification {
    #[must_use]
    pub fn new(title: impl Into<String>, detail: impl Into<String>, color: Rgb) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            color,
            duration_ticks: NOTICE_DEFAULT,
        }
    }

    #[must_use]
    pub const fn lasting(mut self, duration_ticks: u32) -> Self {
        self.duration_ticks = duration_ticks;
        self
    }
}

/// A single fire-and-forget request for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    PlaySound { sound: Sound },
    StopSound { sound: Sound },
    /// Silence any character or tutorial narration still playing.
    StopNarration,
    Notify { notification: Notification },
}

/// Effects produced by one transition, in emission order.
pub type Effects = SmallVec<[Effect; 4]>;

/// Convenience pushes so call sites stay one line.
pub trait EffectSink {
    fn sound(&mut self, sound: Sound);
    fn stop(&mut self, sound: Sound);
    fn notify(&mut self, notification: Notification);
}

impl EffectSink for Effects {
    fn sound(&mut self, sound: Sound) {
        self.push(Effect::PlaySound { sound });
    }

    fn stop(&mut self, sound: Sound) {
        self.push(Effect::StopSound { sound });
    }

    fn notify(&mut self, notification: Notification) {
        self.push(Effect::Notify { notification });
    }
}

/// Titles of every notification in `effects`, for logs and assertions.
#[must_use]
pub fn notification_titles(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify { notification } => Some(notification.title.as_str()),
            _ => None,
        })
        .collect()
}

/// Whether `effects` contains a request to play `sound`.
#[must_use]
pub fn plays(effects: &[Effect], sound: Sound) -> bool {
    effects
        .iter()
        .any(|effect| matches!(effect, Effect::PlaySound { sound: s } if *s == sound))
}

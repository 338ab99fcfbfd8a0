//! Timed stabilization key sequence.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::StabilizationConfig;
use crate::constants::{NOTICE_ALERT, NOTICE_FLASH, QTE_STEPS, TICKS_PER_SECOND};
use crate::effects::{EffectSink, Effects, Notification, Rgb, Sound};
use crate::input::Key;
use crate::rng::RandomSource;

/// Keys the sequence draws its targets from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QteKey {
    F,
    P,
    R,
    K,
    G,
}

impl QteKey {
    pub const ALL: [Self; 5] = [Self::F, Self::P, Self::R, Self::K, Self::G];

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::F => 'f',
            Self::P => 'p',
            Self::R => 'r',
            Self::K => 'k',
            Self::G => 'g',
        }
    }

    #[must_use]
    pub const fn key(self) -> Key {
        Key::Letter(self.as_char())
    }

    fn pick<R: RandomSource + ?Sized>(rng: &mut R, exclude: Option<Self>) -> Self {
        let pool: Vec<Self> = Self::ALL
            .into_iter()
            .filter(|key| Some(*key) != exclude)
            .collect();
        let last = i32::try_from(pool.len()).unwrap_or(1) - 1;
        let index = usize::try_from(rng.uniform_int(0, last)).unwrap_or(0);
        pool.get(index).copied().unwrap_or(Self::F)
    }
}

impl fmt::Display for QteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char().to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QteFailure {
    Timeout,
    WrongKey,
}

impl QteFailure {
    /// Notice shown when the entity recovers from a broken sequence.
    #[must_use]
    pub fn notice(self) -> Notification {
        let notice = match self {
            Self::Timeout => Notification::new(
                "TIME FAILURE!",
                "Sequence incomplete! Paradox regained power!",
                Rgb::RED,
            ),
            Self::WrongKey => Notification::new(
                "SEQUENCE ABORTED!",
                "Incorrect key input! Paradox regained strength!",
                Rgb::RED,
            ),
        };
        notice.lasting(NOTICE_ALERT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QteProgress {
    /// Not a symbol the sequence reacts to.
    Ignored,
    Advanced,
    Completed,
    Failed(QteFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QteState {
    pub target: QteKey,
    pub step: usize,
    pub time_remaining: u32,
    pub time_budget: u32,
    pub bonus_ticks: u32,
}

impl QteState {
    pub fn start<R: RandomSource + ?Sized>(
        cfg: &StabilizationConfig,
        int_specialist: bool,
        rng: &mut R,
    ) -> Self {
        let budget = cfg.budget_for(0, int_specialist);
        let state = Self {
            target: QteKey::pick(rng, None),
            step: 0,
            time_remaining: budget,
            time_budget: budget,
            bonus_ticks: if int_specialist { cfg.int_bonus_ticks } else { 0 },
        };
        log::debug!(
            "stabilization sequence started: target {} with {budget} ticks",
            state.target
        );
        state
    }

    /// Burn one tick of the current step.
    pub fn tick(&mut self) -> Option<QteFailure> {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        (self.time_remaining == 0).then_some(QteFailure::Timeout)
    }

    pub fn press<R: RandomSource + ?Sized>(
        &mut self,
        key: Key,
        cfg: &StabilizationConfig,
        rng: &mut R,
        fx: &mut Effects,
    ) -> QteProgress {
        if !key.is_symbol() {
            return QteProgress::Ignored;
        }
        if key != self.target.key() {
            return QteProgress::Failed(QteFailure::WrongKey);
        }
        if self.step + 1 >= QTE_STEPS {
            return QteProgress::Completed;
        }

        self.step += 1;
        self.target = QteKey::pick(rng, Some(self.target));
        self.time_budget = cfg.budget_for(self.step, self.bonus_ticks > 0);
        self.time_remaining = self.time_budget;
        fx.sound(Sound::Success);
        fx.notify(
            Notification::new("SUCCESS!", format!("Next target: {}", self.target), Rgb::MINT)
                .lasting(NOTICE_FLASH),
        );
        QteProgress::Advanced
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> f64 {
        f64::from(self.time_remaining) / f64::from(TICKS_PER_SECOND)
    }

    /// Fraction of the current step's budget still left, `0.0..=1.0`.
    #[must_use]
    pub fn time_fraction(&self) -> f64 {
        if self.time_budget == 0 {
            return 0.0;
        }
        f64::from(self.time_remaining) / f64::from(self.time_budget)
    }
}

//! Player health, equipment, and stabilizer tracking.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::characters::Stat;
use crate::constants::{
    DC_EQUIPMENT, DC_FIRST_STABILIZER, DC_SECOND_STABILIZER, NOTICE_HEAL, NOTICE_ITEM,
};
use crate::effects::{EffectSink, Effects, Notification, Rgb, Sound};
use crate::skill::SkillCheck;
use crate::state::GameState;

/// Collectible items. Stabilizers are tracked as slots rather than flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Shield,
    Capacitor,
    Amplifier,
    FirstStabilizer,
    SecondStabilizer,
}

impl ItemKind {
    pub const ALL: [Self; 5] = [
        Self::Shield,
        Self::Capacitor,
        Self::Amplifier,
        Self::FirstStabilizer,
        Self::SecondStabilizer,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shield => "Quantum Shield",
            Self::Capacitor => "Flux Capacitor",
            Self::Amplifier => "Temporal Amplifier",
            Self::FirstStabilizer => "Stabilizer 1",
            Self::SecondStabilizer => "Stabilizer 2",
        }
    }

    #[must_use]
    pub const fn skill_check(self) -> SkillCheck {
        match self {
            Self::Shield | Self::Capacitor | Self::Amplifier => {
                SkillCheck::new(Stat::Intelligence, DC_EQUIPMENT)
            }
            Self::FirstStabilizer => SkillCheck::new(Stat::Strength, DC_FIRST_STABILIZER),
            Self::SecondStabilizer => SkillCheck::new(Stat::Intelligence, DC_SECOND_STABILIZER),
        }
    }

    /// Room where the item is found.
    #[must_use]
    pub const fn home(self) -> GameState {
        match self {
            Self::Shield => GameState::Room1A,
            Self::Capacitor => GameState::Room1B,
            Self::FirstStabilizer => GameState::Room2A,
            Self::SecondStabilizer => GameState::Room2B,
            Self::Amplifier => GameState::Room3A,
        }
    }

    #[must_use]
    pub fn found_in(room: GameState) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.home() == room)
    }

    /// Stabilizer count reached once this slot is collected.
    const fn stabilizer_level(self) -> Option<u8> {
        match self {
            Self::FirstStabilizer => Some(1),
            Self::SecondStabilizer => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// May drop below zero; the owner ends the game at `<= 0`.
    pub health: i32,
    pub max_health: i32,
    pub stabilizers: u8,
    pub has_shield: bool,
    pub has_amplifier: bool,
    pub has_capacitor: bool,
    pub capacitor_consumed: bool,
}

impl Progress {
    #[must_use]
    pub const fn new(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            stabilizers: 0,
            has_shield: false,
            has_amplifier: false,
            has_capacitor: false,
            capacitor_consumed: false,
        }
    }

    #[must_use]
    pub const fn has(&self, item: ItemKind) -> bool {
        match item {
            ItemKind::Shield => self.has_shield,
            ItemKind::Capacitor => self.has_capacitor,
            ItemKind::Amplifier => self.has_amplifier,
            ItemKind::FirstStabilizer => self.stabilizers >= 1,
            ItemKind::SecondStabilizer => self.stabilizers >= 2,
        }
    }

    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.health <= 0
    }

    #[must_use]
    pub const fn capacitor_ready(&self) -> bool {
        self.has_capacitor && !self.capacitor_consumed
    }

    #[must_use]
    pub const fn can_heal_trade(&self) -> bool {
        self.stabilizers >= 1 && self.health < self.max_health
    }

    /// Marks `item` as held. Returns `false` (and emits nothing) when it
    /// already was.
    pub fn grant_item(&mut self, item: ItemKind, fx: &mut Effects) -> bool {
        if self.has(item) {
            return false;
        }
        match item.stabilizer_level() {
            Some(level) => self.stabilizers = level,
            None => match item {
                ItemKind::Shield => self.has_shield = true,
                ItemKind::Capacitor => self.has_capacitor = true,
                ItemKind::Amplifier => self.has_amplifier = true,
                ItemKind::FirstStabilizer | ItemKind::SecondStabilizer => {}
            },
        }
        fx.notify(
            Notification::new(
                "ITEM SECURED",
                format!("{} added to inventory.", item.name()),
                Rgb::CYAN,
            )
            .lasting(NOTICE_ITEM),
        );
        true
    }

    /// Trade one stabilizer for a full heal.
    pub fn heal_trade(&mut self, fx: &mut Effects) -> bool {
        if !self.can_heal_trade() {
            log::warn!(
                "heal trade refused (stabilizers {}, health {})",
                self.stabilizers,
                self.health
            );
            return false;
        }
        self.stabilizers -= 1;
        self.health = self.max_health;
        fx.sound(Sound::Heal);
        fx.notify(
            Notification::new(
                "ANCHOR ACTIVATED",
                format!(
                    "Health fully restored (Max {} HP). Stabilizer sacrificed.",
                    self.max_health
                ),
                Rgb::MINT,
            )
            .lasting(NOTICE_HEAL),
        );
        true
    }

    pub fn apply_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// One-shot heal from the flux capacitor.
    pub fn discharge_capacitor(&mut self, heal: i32, fx: &mut Effects) -> bool {
        if !self.capacitor_ready() {
            return false;
        }
        self.health = (self.health + heal).min(self.max_health);
        self.capacitor_consumed = true;
        fx.sound(Sound::Heal);
        fx.notify(
            Notification::new(
                "CAPACITOR FIRED",
                format!("{heal} HP restored. Capacitor depleted."),
                Rgb::MINT,
            )
            .lasting(NOTICE_ITEM),
        );
        true
    }
}

//! Random encounter selection on room entry.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EncounterConfig;
use crate::rng::RandomSource;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    #[default]
    None,
    /// A harmless trader that only has to be dismissed.
    Merchant,
    /// A minor wraith fight.
    Battle,
}

impl EncounterKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Merchant => "merchant",
            Self::Battle => "battle",
        }
    }
}

impl fmt::Display for EncounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterState {
    pub kind: EncounterKind,
    pub minor_enemy_health: i32,
    pub minor_enemy_defeated: bool,
    pub battle_engaged: bool,
    /// Ticks since the wraith last struck.
    pub damage_clock: u32,
}

impl EncounterState {
    #[must_use]
    pub const fn new(wraith_health: i32) -> Self {
        Self {
            kind: EncounterKind::None,
            minor_enemy_health: wraith_health,
            minor_enemy_defeated: false,
            battle_engaged: false,
            damage_clock: 0,
        }
    }

    /// Whether an encounter currently owns the room's input.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.kind, EncounterKind::None)
    }

    /// Reset and roll for a fresh encounter as the player walks into `room`.
    ///
    /// Rooms past the exploration stage neither reset nor draw.
    pub fn enter_room<R: RandomSource + ?Sized>(
        &mut self,
        room: GameState,
        cfg: &EncounterConfig,
        rng: &mut R,
    ) -> EncounterKind {
        if !room.is_mid_game_room() {
            return EncounterKind::None;
        }
        *self = Self::new(cfg.wraith_health);
        self.kind = roll_encounter(room, cfg, rng);
        if self.is_active() {
            log::debug!("{} encounter in {room}", self.kind);
        }
        self.kind
    }
}

/// Decide what, if anything, interrupts entry into `room`.
pub fn roll_encounter<R: RandomSource + ?Sized>(
    room: GameState,
    cfg: &EncounterConfig,
    rng: &mut R,
) -> EncounterKind {
    if !room.is_mid_game_room() {
        return EncounterKind::None;
    }
    let roll = rng.uniform_float();
    if roll < cfg.merchant_chance {
        EncounterKind::Merchant
    } else if roll < cfg.encounter_chance {
        EncounterKind::Battle
    } else {
        EncounterKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn roll_thresholds() {
        let cfg = EncounterConfig::default();
        let mut rng = ScriptedRng::new().with_floats([0.0, 0.074, 0.075, 0.149, 0.15, 0.9]);
        let kinds: Vec<_> = (0..6)
            .map(|_| roll_encounter(GameState::Room1A, &cfg, &mut rng))
            .collect();
        assert_eq!(
            kinds,
            vec![
                EncounterKind::Merchant,
                EncounterKind::Merchant,
                EncounterKind::Battle,
                EncounterKind::Battle,
                EncounterKind::None,
                EncounterKind::None,
            ]
        );
    }

    #[test]
    fn final_chamber_never_draws() {
        let cfg = EncounterConfig::default();
        let mut rng = ScriptedRng::new().with_floats([0.01]);
        assert_eq!(
            roll_encounter(GameState::FinalChamber, &cfg, &mut rng),
            EncounterKind::None
        );
        assert_eq!(rng.remaining(), (1, 0));
    }

    #[test]
    fn entering_a_room_resets_previous_fight() {
        let cfg = EncounterConfig::default();
        let mut state = EncounterState {
            kind: EncounterKind::None,
            minor_enemy_health: 0,
            minor_enemy_defeated: true,
            battle_engaged: true,
            damage_clock: 77,
        };
        let mut rng = ScriptedRng::new().with_floats([0.1]);
        assert_eq!(
            state.enter_room(GameState::Room3A, &cfg, &mut rng),
            EncounterKind::Battle
        );
        assert_eq!(state.minor_enemy_health, 3);
        assert!(!state.minor_enemy_defeated);
        assert!(!state.battle_engaged);
        assert_eq!(state.damage_clock, 0);
        assert!(state.is_active());
    }
}

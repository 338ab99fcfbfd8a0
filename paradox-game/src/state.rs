//! Screens, endings, and the causes behind them.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every screen the adventure can be on. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    LoreScreen,
    CharacterSelect,
    Narration,
    Explain1,
    Explain2,
    ConfirmAction,
    #[serde(rename = "room1a")]
    Room1A,
    #[serde(rename = "room1b")]
    Room1B,
    #[serde(rename = "room2a")]
    Room2A,
    #[serde(rename = "room2b")]
    Room2B,
    #[serde(rename = "room3a")]
    Room3A,
    #[serde(rename = "room3b")]
    Room3B,
    FinalChamber,
    BossPreview,
    StabilizationPhase,
    BossRoom,
    GameWin,
    GameOver,
}

impl GameState {
    pub const ALL: [Self; 18] = [
        Self::LoreScreen,
        Self::CharacterSelect,
        Self::Narration,
        Self::Explain1,
        Self::Explain2,
        Self::ConfirmAction,
        Self::Room1A,
        Self::Room1B,
        Self::Room2A,
        Self::Room2B,
        Self::Room3A,
        Self::Room3B,
        Self::FinalChamber,
        Self::BossPreview,
        Self::StabilizationPhase,
        Self::BossRoom,
        Self::GameWin,
        Self::GameOver,
    ];

    /// The six explorable rooms before the final chamber.
    pub const ROOMS: [Self; 6] = [
        Self::Room1A,
        Self::Room1B,
        Self::Room2A,
        Self::Room2B,
        Self::Room3A,
        Self::Room3B,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoreScreen => "lore_screen",
            Self::CharacterSelect => "character_select",
            Self::Narration => "narration",
            Self::Explain1 => "explain1",
            Self::Explain2 => "explain2",
            Self::ConfirmAction => "confirm_action",
            Self::Room1A => "room1a",
            Self::Room1B => "room1b",
            Self::Room2A => "room2a",
            Self::Room2B => "room2b",
            Self::Room3A => "room3a",
            Self::Room3B => "room3b",
            Self::FinalChamber => "final_chamber",
            Self::BossPreview => "boss_preview",
            Self::StabilizationPhase => "stabilization_phase",
            Self::BossRoom => "boss_room",
            Self::GameWin => "game_win",
            Self::GameOver => "game_over",
        }
    }

    /// Rooms that roll for a random encounter on entry.
    #[must_use]
    pub const fn is_mid_game_room(self) -> bool {
        matches!(
            self,
            Self::Room1A | Self::Room1B | Self::Room2A | Self::Room2B | Self::Room3A | Self::Room3B
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameWin | Self::GameOver)
    }

    /// Screens where the HUD is shown.
    #[must_use]
    pub const fn shows_status(self) -> bool {
        !matches!(
            self,
            Self::LoreScreen | Self::CharacterSelect | Self::Narration
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryKind {
    /// The entity was blasted from above the stun threshold straight to zero.
    BossDestroyed,
    /// The stabilization sequence was completed.
    RealityStabilized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatCause {
    HealthDepleted,
    /// Walked into the boss room without the quantum shield.
    MissingShield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Ending {
    Victory { kind: VictoryKind },
    Defeat { cause: DefeatCause },
}

impl Ending {
    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Victory { .. })
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Victory {
                kind: VictoryKind::BossDestroyed,
            } => "victory_boss_destroyed",
            Self::Victory {
                kind: VictoryKind::RealityStabilized,
            } => "victory_reality_stabilized",
            Self::Defeat {
                cause: DefeatCause::HealthDepleted,
            } => "defeat_health_depleted",
            Self::Defeat {
                cause: DefeatCause::MissingShield,
            } => "defeat_missing_shield",
        }
    }

    /// Screen the adventure moves to once this ending is recorded.
    #[must_use]
    pub const fn screen(self) -> GameState {
        if self.is_victory() {
            GameState::GameWin
        } else {
            GameState::GameOver
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for state in GameState::ALL {
            assert_eq!(state.as_str().parse::<GameState>(), Ok(state));
        }
        assert!("room4a".parse::<GameState>().is_err());
    }

    #[test]
    fn only_rooms_roll_encounters() {
        let rolling: Vec<_> = GameState::ALL
            .into_iter()
            .filter(|state| state.is_mid_game_room())
            .collect();
        assert_eq!(rolling, GameState::ROOMS.to_vec());
        assert!(!GameState::FinalChamber.is_mid_game_room());
    }

    #[test]
    fn serde_uses_snake_case_ids() {
        let json = serde_json::to_string(&GameState::StabilizationPhase).unwrap();
        assert_eq!(json, "\"stabilization_phase\"");
        for state in GameState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json.trim_matches('"'), state.as_str());
        }
        let ending = Ending::Defeat {
            cause: DefeatCause::MissingShield,
        };
        let json = serde_json::to_string(&ending).unwrap();
        assert_eq!(json, r#"{"type":"defeat","cause":"missing_shield"}"#);
    }

    #[test]
    fn endings_pick_their_screen() {
        let win = Ending::Victory {
            kind: VictoryKind::RealityStabilized,
        };
        assert_eq!(win.screen(), GameState::GameWin);
        assert_eq!(win.to_string(), "victory_reality_stabilized");
        let loss = Ending::Defeat {
            cause: DefeatCause::HealthDepleted,
        };
        assert_eq!(loss.screen(), GameState::GameOver);
        assert!(GameState::GameOver.is_terminal());
        assert!(!GameState::BossRoom.is_terminal());
    }
}

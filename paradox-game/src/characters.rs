//! The three playable characters and their stats.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::effects::Sound;

/// Which stat a skill check rolls against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Strength,
    Intelligence,
}

impl Stat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Intelligence => "INT",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Soldier,
    Doctor,
    Robot,
}

impl CharacterClass {
    pub const ALL: [Self; 3] = [Self::Soldier, Self::Doctor, Self::Robot];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Soldier => "soldier",
            Self::Doctor => "doctor",
            Self::Robot => "robot",
        }
    }

    #[must_use]
    pub fn profile(self) -> &'static Character {
        match self {
            Self::Soldier => &SOLDIER,
            Self::Doctor => &DOCTOR,
            Self::Robot => &ROBOT,
        }
    }

    /// Class chosen by `key` on the selection screen.
    #[must_use]
    pub fn from_select_key(key: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.profile().select_key == key)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soldier" => Ok(Self::Soldier),
            "doctor" => Ok(Self::Doctor),
            "robot" => Ok(Self::Robot),
            _ => Err(()),
        }
    }
}

/// Immutable character profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    pub class: CharacterClass,
    pub name: &'static str,
    pub strength: i32,
    pub intelligence: i32,
    pub activation_line: &'static str,
    pub select_key: char,
    /// Voice line played when the character is chosen.
    pub narration: Sound,
}

impl Character {
    #[must_use]
    pub const fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Intelligence => self.intelligence,
        }
    }

    /// Characters whose INT outranks their STR get extra time per
    /// stabilization step.
    #[must_use]
    pub const fn is_int_specialist(&self) -> bool {
        self.intelligence > self.strength
    }
}

pub static SOLDIER: Character = Character {
    class: CharacterClass::Soldier,
    name: "Major Thorne",
    strength: 3,
    intelligence: 1,
    activation_line: "Emergency chronometers blink red. The cryo-stasis field collapses, slamming Major Thorne's boots onto the deck. His armor diagnostics immediately detect massive temporal displacement. He grips his rifle. Time to move.",
    select_key: 's',
    narration: Sound::NarrationMajor,
};

pub static DOCTOR: Character = Character {
    class: CharacterClass::Doctor,
    name: "Dr. Varr",
    strength: 1,
    intelligence: 3,
    activation_line: "Dr. Varr grips the edge of her console, the world shimmering around her. Her quantum instruments scream warnings. The reality engine is failing. She is the only one close enough to fix it.",
    select_key: 'd',
    narration: Sound::NarrationDoctor,
};

pub static ROBOT: Character = Character {
    class: CharacterClass::Robot,
    name: "UNIT T-34",
    strength: 2,
    intelligence: 2,
    activation_line: "UNIT T-34's optical sensors flare to life. Core Directive 1: Reality Stabilization Protocol. The internal chronometer shows system-wide corruption. Processing complete. Mission status: Critical. Execution required.",
    select_key: 'b',
    narration: Sound::NarrationUnit,
};

use std::fmt;

use paradox_game::{Adventure, CharacterClass, Command, GameState, ItemKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick the next command, or `None` to let a frame pass.
    fn pick_command(&mut self, adventure: &Adventure) -> Option<Command>;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameplayStrategy {
    Methodical,
    Chaotic,
}

impl GameplayStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Methodical => "Methodical",
            Self::Chaotic => "Chaotic",
        }
    }

    #[must_use]
    pub fn create_policy(self, character: CharacterClass, seed: u64) -> Box<dyn PlayerPolicy> {
        match self {
            Self::Methodical => Box::new(MethodicalPolicy::new(character)),
            Self::Chaotic => Box::new(ChaoticPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Collects every item in order, fights every wraith, never trades health
/// for stabilizers and always presses the requested stabilization key.
pub struct MethodicalPolicy {
    character: CharacterClass,
}

impl MethodicalPolicy {
    #[must_use]
    pub const fn new(character: CharacterClass) -> Self {
        Self { character }
    }

    fn in_room(adventure: &Adventure, available: &[Command]) -> Option<Command> {
        for preferred in [
            Command::StrikeWraith,
            Command::EngageWraith,
            Command::LeaveEncounter,
        ] {
            if available.contains(&preferred) {
                return Some(preferred);
            }
        }

        let collecting = adventure.state != GameState::Room3B;
        if collecting && available.contains(&Command::RequestAction) {
            return Some(Command::RequestAction);
        }

        let next_room = ItemKind::ALL
            .into_iter()
            .find(|item| !adventure.progress.has(*item))
            .map_or(GameState::FinalChamber, ItemKind::home);
        let step = Command::Navigate(next_room);
        (next_room != adventure.state && available.contains(&step)).then_some(step)
    }

    fn in_boss_room(adventure: &Adventure, available: &[Command]) -> Option<Command> {
        let progress = &adventure.progress;
        if available.contains(&Command::FireCapacitor) && progress.health * 2 <= progress.max_health
        {
            return Some(Command::FireCapacitor);
        }
        available
            .contains(&Command::FireBlast)
            .then_some(Command::FireBlast)
    }
}

impl PlayerPolicy for MethodicalPolicy {
    fn name(&self) -> &'static str {
        "Methodical"
    }

    fn pick_command(&mut self, adventure: &Adventure) -> Option<Command> {
        let available = adventure.available_commands();
        match adventure.state {
            GameState::LoreScreen => Some(Command::Begin),
            GameState::CharacterSelect => Some(Command::SelectCharacter(self.character)),
            GameState::Narration | GameState::Explain1 | GameState::Explain2 => {
                Some(Command::Continue)
            }
            room if room.is_mid_game_room() => Self::in_room(adventure, &available),
            GameState::ConfirmAction => Some(Command::Confirm),
            GameState::FinalChamber => [Command::EnterGate, Command::Retreat]
                .into_iter()
                .find(|command| available.contains(command)),
            GameState::BossPreview => Some(Command::EnterBossRoom),
            GameState::BossRoom => Self::in_boss_room(adventure, &available),
            GameState::StabilizationPhase => adventure
                .qte
                .as_ref()
                .map(|qte| Command::Stabilize(qte.target.key())),
            _ => None,
        }
    }
}

/// Uniformly random pick among the commands the current screen accepts.
pub struct ChaoticPolicy {
    rng: ChaCha20Rng,
}

impl ChaoticPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerPolicy for ChaoticPolicy {
    fn name(&self) -> &'static str {
        "Chaotic"
    }

    fn pick_command(&mut self, adventure: &Adventure) -> Option<Command> {
        let available = adventure.available_commands();
        if available.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..available.len());
        available.get(idx).copied()
    }
}

//! Quantum Paradox Game Engine
//!
//! Platform-agnostic progression and combat core for The Quantum Paradox.
//! This crate owns the room graph, skill checks, random encounters, the
//! two-phase boss fight, and the stabilization sequence. Rendering, audio,
//! and raw keyboard capture stay with the host; the core consumes key
//! symbols and frame ticks and returns the effects it wants realized.

pub mod adventure;
pub mod boss;
pub mod characters;
pub mod combat;
pub mod config;
pub mod constants;
pub mod effects;
pub mod encounters;
pub mod input;
pub mod inventory;
pub mod qte;
pub mod rng;
pub mod session;
pub mod skill;
pub mod state;

// Re-export commonly used types
pub use adventure::{
    ActionKind, Adventure, Command, PendingAction, PendingPreview, StatusReport,
};
pub use boss::{BlastOutcome, BossPhase, BossState, BossTick, blast_damage};
pub use characters::{Character, CharacterClass, Stat};
pub use combat::{MinorCombatPhase, WraithTick};
pub use config::{
    BossConfig, ConfigError, EncounterConfig, GameConfig, StabilizationConfig,
};
pub use effects::{Effect, EffectSink, Effects, Notification, Rgb, Sound};
pub use encounters::{EncounterKind, EncounterState, roll_encounter};
pub use input::Key;
pub use inventory::{ItemKind, Progress};
pub use qte::{QteFailure, QteKey, QteProgress, QteState};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use session::Session;
pub use skill::{CheckOutcome, CheckPreview, SkillCheck};
pub use state::{DefeatCause, Ending, GameState, VictoryKind};

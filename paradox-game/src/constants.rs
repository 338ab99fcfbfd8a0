//! Centralized balance and tuning constants for the Quantum Paradox core.
//!
//! These values define the deterministic math for the adventure. They seed
//! [`GameConfig::default`](crate::config::GameConfig) so that a config file
//! only needs to mention the knobs it changes.

// Cadence ------------------------------------------------------------------
pub const TICKS_PER_SECOND: u32 = 60;

// Player -------------------------------------------------------------------
pub const PLAYER_MAX_HEALTH: i32 = 10;
pub const STABILIZERS_NEEDED: u8 = 2;
/// Stabilizer pickups placed in the facility.
pub const STABILIZER_SLOTS: u8 = 2;
pub const CAPACITOR_HEAL: i32 = 5;

// Skill checks -------------------------------------------------------------
pub const D20_MIN: i32 = 1;
pub const D20_MAX: i32 = 20;
pub const DC_EQUIPMENT: i32 = 12;
pub const DC_FIRST_STABILIZER: i32 = 10;
pub const DC_SECOND_STABILIZER: i32 = 15;
pub(crate) const FAIL_DAMAGE_BASE: i32 = 1;
pub(crate) const FAIL_DAMAGE_HARD_INT: i32 = 2;
pub(crate) const SHIELD_REDUCTION: i32 = 1;

// Random encounters --------------------------------------------------------
pub const MERCHANT_CHANCE: f64 = 0.075;
pub const ENCOUNTER_CHANCE: f64 = 0.15;
pub const WRAITH_HEALTH: i32 = 3;
pub const WRAITH_ATTACK_INTERVAL: u32 = 120;
pub const WRAITH_DAMAGE: i32 = 2;

// Boss ---------------------------------------------------------------------
pub const BOSS_MAX_HEALTH: i32 = 30;
pub const BOSS_PHASE_TWO_HEALTH: i32 = 10;
pub const BOSS_RESET_HEALTH: i32 = 15;
pub const BOSS_ATTACK_INTERVAL: u32 = 60;
pub const BOSS_DAMAGE: i32 = 2;
pub(crate) const BLAST_BASE_DAMAGE: i32 = 1;
pub(crate) const AMPLIFIER_BONUS: i32 = 1;

// Stabilization sequence ---------------------------------------------------
pub const QTE_STEPS: usize = 5;
pub const QTE_STEP_BUDGETS: [u32; QTE_STEPS] = [420, 360, 300, 180, 120];
pub const QTE_INT_BONUS_TICKS: u32 = 90;
/// Ceiling for any single step budget and for the specialist bonus.
pub const QTE_MAX_BUDGET_TICKS: u32 = 10 * 60 * TICKS_PER_SECOND;

// Notification durations (ticks) -------------------------------------------
pub(crate) const NOTICE_DEFAULT: u32 = 32;
pub(crate) const NOTICE_FLASH: u32 = 30;
pub(crate) const NOTICE_BLAST: u32 = 60;
pub(crate) const NOTICE_STRIKE: u32 = 90;
pub(crate) const NOTICE_ITEM: u32 = 120;
pub(crate) const NOTICE_HEAL: u32 = 150;
pub(crate) const NOTICE_ALERT: u32 = 180;
pub(crate) const NOTICE_FINALE: u32 = 240;

//! Tunable balance knobs with validation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BOSS_ATTACK_INTERVAL, BOSS_DAMAGE, BOSS_MAX_HEALTH, BOSS_PHASE_TWO_HEALTH, BOSS_RESET_HEALTH,
    CAPACITOR_HEAL, ENCOUNTER_CHANCE, MERCHANT_CHANCE, PLAYER_MAX_HEALTH, QTE_INT_BONUS_TICKS,
    QTE_MAX_BUDGET_TICKS, QTE_STEP_BUDGETS, QTE_STEPS, STABILIZER_SLOTS, STABILIZERS_NEEDED,
    WRAITH_ATTACK_INTERVAL, WRAITH_DAMAGE, WRAITH_HEALTH,
};

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: i64,
        value: i64,
    },
    #[error("{field} must be at most {max} (got {value})")]
    MaxViolation {
        field: &'static str,
        max: i64,
        value: i64,
    },
    #[error("{field} must be between {min:.3} and {max:.3} (got {value:.3})")]
    ProbabilityRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("boss phase threshold {threshold} must sit below max health {max} and reset health {reset}")]
    BossThresholds { threshold: i32, reset: i32, max: i32 },
    #[error("stabilization budgets must shrink every step (step {step}: {budget} after {previous})")]
    BudgetRamp {
        step: usize,
        budget: u32,
        previous: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_max_health")]
    pub max_health: i32,
    #[serde(default = "GameConfig::default_stabilizers_needed")]
    pub stabilizers_needed: u8,
    #[serde(default = "GameConfig::default_capacitor_heal")]
    pub capacitor_heal: i32,
    #[serde(default)]
    pub encounters: EncounterConfig,
    #[serde(default)]
    pub boss: BossConfig,
    #[serde(default)]
    pub stabilization: StabilizationConfig,
}

impl GameConfig {
    const fn default_max_health() -> i32 {
        PLAYER_MAX_HEALTH
    }

    const fn default_stabilizers_needed() -> u8 {
        STABILIZERS_NEEDED
    }

    const fn default_capacitor_heal() -> i32 {
        CAPACITOR_HEAL
    }

    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any value is out of bounds.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns the first invariant the config violates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        min_check("max_health", 1, self.max_health.into())?;
        min_check("stabilizers_needed", 1, self.stabilizers_needed.into())?;
        max_check(
            "stabilizers_needed",
            STABILIZER_SLOTS.into(),
            self.stabilizers_needed.into(),
        )?;
        min_check("capacitor_heal", 0, self.capacitor_heal.into())?;
        self.encounters.validate()?;
        self.boss.validate()?;
        self.stabilization.validate()?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_health: Self::default_max_health(),
            stabilizers_needed: Self::default_stabilizers_needed(),
            capacitor_heal: Self::default_capacitor_heal(),
            encounters: EncounterConfig::default(),
            boss: BossConfig::default(),
            stabilization: StabilizationConfig::default(),
        }
    }
}

/// Random encounter odds and the minor wraith's stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Rolls below this become a merchant.
    #[serde(default = "EncounterConfig::default_merchant_chance")]
    pub merchant_chance: f64,
    /// Rolls below this (and not a merchant) become a battle.
    #[serde(default = "EncounterConfig::default_encounter_chance")]
    pub encounter_chance: f64,
    #[serde(default = "EncounterConfig::default_wraith_health")]
    pub wraith_health: i32,
    #[serde(default = "EncounterConfig::default_wraith_attack_interval")]
    pub wraith_attack_interval: u32,
    #[serde(default = "EncounterConfig::default_wraith_damage")]
    pub wraith_damage: i32,
}

impl EncounterConfig {
    const fn default_merchant_chance() -> f64 {
        MERCHANT_CHANCE
    }

    const fn default_encounter_chance() -> f64 {
        ENCOUNTER_CHANCE
    }

    const fn default_wraith_health() -> i32 {
        WRAITH_HEALTH
    }

    const fn default_wraith_attack_interval() -> u32 {
        WRAITH_ATTACK_INTERVAL
    }

    const fn default_wraith_damage() -> i32 {
        WRAITH_DAMAGE
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.encounter_chance) {
            return Err(ConfigError::ProbabilityRange {
                field: "encounters.encounter_chance",
                min: 0.0,
                max: 1.0,
                value: self.encounter_chance,
            });
        }
        if !(0.0..=self.encounter_chance).contains(&self.merchant_chance) {
            return Err(ConfigError::ProbabilityRange {
                field: "encounters.merchant_chance",
                min: 0.0,
                max: self.encounter_chance,
                value: self.merchant_chance,
            });
        }
        min_check("encounters.wraith_health", 1, self.wraith_health.into())?;
        min_check(
            "encounters.wraith_attack_interval",
            1,
            self.wraith_attack_interval.into(),
        )?;
        min_check("encounters.wraith_damage", 0, self.wraith_damage.into())?;
        Ok(())
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            merchant_chance: Self::default_merchant_chance(),
            encounter_chance: Self::default_encounter_chance(),
            wraith_health: Self::default_wraith_health(),
            wraith_attack_interval: Self::default_wraith_attack_interval(),
            wraith_damage: Self::default_wraith_damage(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossConfig {
    #[serde(default = "BossConfig::default_max_health")]
    pub max_health: i32,
    /// At or below this health the entity is stunned and the sequence starts.
    #[serde(default = "BossConfig::default_phase_two_health")]
    pub phase_two_health: i32,
    /// Health the entity regains after a failed sequence.
    #[serde(default = "BossConfig::default_reset_health")]
    pub reset_health: i32,
    #[serde(default = "BossConfig::default_attack_interval")]
    pub attack_interval: u32,
    #[serde(default = "BossConfig::default_damage")]
    pub damage: i32,
}

impl BossConfig {
    const fn default_max_health() -> i32 {
        BOSS_MAX_HEALTH
    }

    const fn default_phase_two_health() -> i32 {
        BOSS_PHASE_TWO_HEALTH
    }

    const fn default_reset_health() -> i32 {
        BOSS_RESET_HEALTH
    }

    const fn default_attack_interval() -> u32 {
        BOSS_ATTACK_INTERVAL
    }

    const fn default_damage() -> i32 {
        BOSS_DAMAGE
    }

    fn validate(&self) -> Result<(), ConfigError> {
        min_check("boss.phase_two_health", 1, self.phase_two_health.into())?;
        min_check("boss.attack_interval", 1, self.attack_interval.into())?;
        min_check("boss.damage", 0, self.damage.into())?;
        if self.phase_two_health >= self.max_health
            || self.reset_health <= self.phase_two_health
            || self.reset_health > self.max_health
        {
            return Err(ConfigError::BossThresholds {
                threshold: self.phase_two_health,
                reset: self.reset_health,
                max: self.max_health,
            });
        }
        Ok(())
    }
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: Self::default_max_health(),
            phase_two_health: Self::default_phase_two_health(),
            reset_health: Self::default_reset_health(),
            attack_interval: Self::default_attack_interval(),
            damage: Self::default_damage(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilizationConfig {
    /// Per-step time allowance in ticks.
    #[serde(default = "StabilizationConfig::default_step_budgets")]
    pub step_budgets: [u32; QTE_STEPS],
    /// Extra ticks per step granted to the INT specialist.
    #[serde(default = "StabilizationConfig::default_int_bonus")]
    pub int_bonus_ticks: u32,
}

impl StabilizationConfig {
    const fn default_step_budgets() -> [u32; QTE_STEPS] {
        QTE_STEP_BUDGETS
    }

    const fn default_int_bonus() -> u32 {
        QTE_INT_BONUS_TICKS
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut previous: Option<u32> = None;
        for (step, &budget) in self.step_budgets.iter().enumerate() {
            min_check("stabilization.step_budgets", 1, budget.into())?;
            max_check(
                "stabilization.step_budgets",
                QTE_MAX_BUDGET_TICKS.into(),
                budget.into(),
            )?;
            if let Some(prev) = previous
                && budget >= prev
            {
                return Err(ConfigError::BudgetRamp {
                    step,
                    budget,
                    previous: prev,
                });
            }
            previous = Some(budget);
        }
        max_check(
            "stabilization.int_bonus_ticks",
            QTE_MAX_BUDGET_TICKS.into(),
            self.int_bonus_ticks.into(),
        )?;
        Ok(())
    }

    /// Budget for `step`, including the specialist bonus when it applies.
    #[must_use]
    pub fn budget_for(&self, step: usize, int_specialist: bool) -> u32 {
        let base = self
            .step_budgets
            .get(step)
            .or_else(|| self.step_budgets.last())
            .copied()
            .unwrap_or_default();
        if int_specialist {
            base.saturating_add(self.int_bonus_ticks)
        } else {
            base
        }
    }
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self {
            step_budgets: Self::default_step_budgets(),
            int_bonus_ticks: Self::default_int_bonus(),
        }
    }
}

fn min_check(field: &'static str, min: i64, value: i64) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::MinViolation { field, min, value });
    }
    Ok(())
}

fn max_check(field: &'static str, max: i64, value: i64) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::MaxViolation { field, max, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = GameConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.max_health, 10);
        assert_eq!(cfg.boss.phase_two_health, 10);
        assert_eq!(cfg.stabilization.step_budgets, [420, 360, 300, 180, 120]);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = GameConfig::from_json(r#"{ "boss": { "max_health": 40 } }"#).unwrap();
        assert_eq!(cfg.boss.max_health, 40);
        assert_eq!(cfg.boss.reset_health, 15);
        assert_eq!(cfg.encounters, EncounterConfig::default());
    }

    #[test]
    fn empty_document_equals_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn merchant_chance_cannot_exceed_encounter_chance() {
        let err = GameConfig::from_json(
            r#"{ "encounters": { "merchant_chance": 0.3, "encounter_chance": 0.2 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ProbabilityRange {
                field: "encounters.merchant_chance",
                ..
            }
        ));
    }

    #[test]
    fn boss_thresholds_must_be_ordered() {
        let err = GameConfig::from_json(r#"{ "boss": { "reset_health": 8 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::BossThresholds { reset: 8, .. }));
        assert!(err.to_string().contains("reset health 8"));
    }

    #[test]
    fn budgets_must_ramp_down() {
        let err = GameConfig::from_json(
            r#"{ "stabilization": { "step_budgets": [300, 300, 200, 100, 50] } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BudgetRamp {
                step: 1,
                budget: 300,
                previous: 300
            }
        ));
    }

    #[test]
    fn zero_interval_rejected() {
        let err =
            GameConfig::from_json(r#"{ "boss": { "attack_interval": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("boss.attack_interval"));
    }

    #[test]
    fn budget_lookup_applies_bonus() {
        let cfg = StabilizationConfig::default();
        assert_eq!(cfg.budget_for(0, false), 420);
        assert_eq!(cfg.budget_for(0, true), 510);
        assert_eq!(cfg.budget_for(4, true), 210);
        assert_eq!(cfg.budget_for(9, false), 120);
    }

    #[test]
    fn stabilizers_needed_cannot_exceed_the_slots() {
        assert_eq!(
            GameConfig::from_json(r#"{ "stabilizers_needed": 2 }"#)
                .unwrap()
                .stabilizers_needed,
            2
        );
        let err = GameConfig::from_json(r#"{ "stabilizers_needed": 3 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MaxViolation {
                field: "stabilizers_needed",
                max: 2,
                value: 3
            }
        ));
    }

    #[test]
    fn oversized_budgets_are_rejected() {
        let err = GameConfig::from_json(
            r#"{ "stabilization": { "step_budgets": [4294967295, 4294967290, 300, 200, 100] } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MaxViolation {
                field: "stabilization.step_budgets",
                ..
            }
        ));

        let err = GameConfig::from_json(r#"{ "stabilization": { "int_bonus_ticks": 4294967295 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("stabilization.int_bonus_ticks"));
    }

    #[test]
    fn budget_lookup_saturates() {
        let cfg = StabilizationConfig {
            step_budgets: [u32::MAX, 400, 300, 200, 100],
            int_bonus_ticks: 90,
        };
        assert_eq!(cfg.budget_for(0, true), u32::MAX);
    }
}

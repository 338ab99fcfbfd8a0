//! d20 skill checks against a character stat.
use serde::{Deserialize, Serialize};

use crate::characters::{Character, Stat};
use crate::constants::{
    D20_MAX, D20_MIN, DC_EQUIPMENT, FAIL_DAMAGE_BASE, FAIL_DAMAGE_HARD_INT, SHIELD_REDUCTION,
};
use crate::effects::{EffectSink, Effects, Notification, Rgb, Sound};
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheck {
    pub stat: Stat,
    pub dc: i32,
}

impl SkillCheck {
    #[must_use]
    pub const fn new(stat: Stat, dc: i32) -> Self {
        Self { stat, dc }
    }

    /// Damage a failed attempt deals before the shield is considered.
    ///
    /// INT checks above the equipment DC hurt more; every STR check costs 1.
    #[must_use]
    pub const fn base_failure_damage(self) -> i32 {
        match self.stat {
            Stat::Intelligence if self.dc != DC_EQUIPMENT => FAIL_DAMAGE_HARD_INT,
            _ => FAIL_DAMAGE_BASE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub success: bool,
    pub roll: i32,
    pub total: i32,
    /// Damage the caller should apply. Always 0 on success.
    pub damage: i32,
}

/// Numbers shown on the confirmation screen before committing to a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPreview {
    pub stat: Stat,
    pub bonus: i32,
    pub dc: i32,
    pub base_damage: i32,
    pub damage: i32,
}

#[must_use]
pub fn failure_damage(check: SkillCheck, has_shield: bool) -> i32 {
    let base = check.base_failure_damage();
    if has_shield {
        (base - SHIELD_REDUCTION).max(0)
    } else {
        base
    }
}

/// Roll a check and report it. Health is left to the caller.
pub fn resolve<R: RandomSource + ?Sized>(
    check: SkillCheck,
    character: &Character,
    has_shield: bool,
    rng: &mut R,
    fx: &mut Effects,
) -> CheckOutcome {
    let roll = rng.uniform_int(D20_MIN, D20_MAX);
    let total = roll + character.stat(check.stat);
    let success = total >= check.dc;
    log::debug!(
        "{} check: rolled {roll} + {} = {total} vs DC {}",
        check.stat,
        character.stat(check.stat),
        check.dc
    );

    if success {
        fx.sound(Sound::Success);
        fx.notify(Notification::new(
            "ACCESS GRANTED",
            format!("Check: {total} (Needed {}). Action successful.", check.dc),
            Rgb::GREEN,
        ));
        return CheckOutcome {
            success,
            roll,
            total,
            damage: 0,
        };
    }

    let damage = failure_damage(check, has_shield);
    fx.sound(Sound::Fail);
    fx.notify(Notification::new(
        "Breach Detected",
        format!("Check: {total} (Needed {}). Took {damage} damage.", check.dc),
        Rgb::RED,
    ));
    CheckOutcome {
        success,
        roll,
        total,
        damage,
    }
}

#[must_use]
pub fn preview(check: SkillCheck, character: &Character, has_shield: bool) -> CheckPreview {
    CheckPreview {
        stat: check.stat,
        bonus: character.stat(check.stat),
        dc: check.dc,
        base_damage: check.base_failure_damage(),
        damage: failure_damage(check, has_shield),
    }
}

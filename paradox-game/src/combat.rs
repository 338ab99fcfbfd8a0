//! Minor wraith combat inside a room encounter.
use serde::{Deserialize, Serialize};

use crate::config::EncounterConfig;
use crate::constants::{NOTICE_FLASH, NOTICE_STRIKE, SHIELD_REDUCTION};
use crate::effects::{EffectSink, Effects, Notification, Rgb, Sound};
use crate::encounters::{EncounterKind, EncounterState};
use crate::inventory::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinorCombatPhase {
    /// Wraith is on screen but combat has not started.
    Idle,
    Engaged,
    Resolved,
}

/// Combat phase for a battle encounter, `None` for anything else.
#[must_use]
pub const fn phase(encounter: &EncounterState) -> Option<MinorCombatPhase> {
    if !matches!(encounter.kind, EncounterKind::Battle) {
        return None;
    }
    Some(if encounter.minor_enemy_defeated {
        MinorCombatPhase::Resolved
    } else if encounter.battle_engaged {
        MinorCombatPhase::Engaged
    } else {
        MinorCombatPhase::Idle
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WraithTick {
    Waiting,
    Struck { damage: i32 },
}

pub fn engage(encounter: &mut EncounterState, fx: &mut Effects) -> bool {
    if phase(encounter) != Some(MinorCombatPhase::Idle) {
        return false;
    }
    encounter.battle_engaged = true;
    encounter.damage_clock = 0;
    fx.sound(Sound::Blaster);
    log::debug!("wraith engaged");
    true
}

pub fn strike(encounter: &mut EncounterState, fx: &mut Effects) -> bool {
    if phase(encounter) != Some(MinorCombatPhase::Engaged) {
        return false;
    }
    encounter.minor_enemy_health -= 1;
    fx.sound(Sound::Blaster);
    fx.notify(
        Notification::new(
            "HIT!",
            format!("Wraith HP: {}", encounter.minor_enemy_health.max(0)),
            Rgb::YELLOW,
        )
        .lasting(NOTICE_FLASH),
    );
    if encounter.minor_enemy_health <= 0 {
        encounter.minor_enemy_defeated = true;
        fx.notify(
            Notification::new("WRAITH ERADICATED", "Minor threat neutralized.", Rgb::GREEN)
                .lasting(NOTICE_STRIKE),
        );
        log::debug!("wraith defeated");
    }
    true
}

/// Walk away from a merchant or a wraith in any phase.
pub fn leave(encounter: &mut EncounterState, fx: &mut Effects) -> bool {
    if !encounter.is_active() {
        return false;
    }
    encounter.kind = EncounterKind::None;
    encounter.battle_engaged = false;
    fx.sound(Sound::StartPress);
    true
}

/// Advance the wraith's attack clock while it is engaged and alive.
pub fn tick(
    encounter: &mut EncounterState,
    progress: &mut Progress,
    cfg: &EncounterConfig,
    fx: &mut Effects,
) -> WraithTick {
    if phase(encounter) != Some(MinorCombatPhase::Engaged) {
        return WraithTick::Waiting;
    }
    encounter.damage_clock += 1;
    if encounter.damage_clock < cfg.wraith_attack_interval {
        return WraithTick::Waiting;
    }
    encounter.damage_clock = 0;

    let damage = if progress.has_shield {
        (cfg.wraith_damage - SHIELD_REDUCTION).max(0)
    } else {
        cfg.wraith_damage
    };
    progress.apply_damage(damage);
    fx.sound(Sound::Hit);
    fx.notify(
        Notification::new("WRAITH ATTACK!", format!("Took {damage} damage."), Rgb::AMBER)
            .lasting(NOTICE_STRIKE),
    );
    WraithTick::Struck { damage }
}

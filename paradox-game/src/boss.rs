//! Paradox entity fight: a damage race that stuns into the stabilization
//! sequence.
use serde::{Deserialize, Serialize};

use crate::characters::Character;
use crate::config::BossConfig;
use crate::constants::{
    AMPLIFIER_BONUS, BLAST_BASE_DAMAGE, NOTICE_ALERT, NOTICE_BLAST, NOTICE_STRIKE,
    SHIELD_REDUCTION,
};
use crate::effects::{EffectSink, Effects, Notification, Rgb, Sound};
use crate::inventory::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossPhase {
    #[default]
    DamageRace,
    /// Stunned while the stabilization sequence runs.
    Stabilization,
}

impl BossPhase {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::DamageRace => 1,
            Self::Stabilization => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossTick {
    /// Nothing happened beyond the attack timer advancing.
    Pressing,
    Struck { damage: i32 },
    /// Health fell to the stun threshold; the sequence should start.
    Stunned,
    MissingShield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastOutcome {
    /// Blasts only land during the damage race.
    Ignored,
    Landed { damage: i32 },
    Destroyed { damage: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossState {
    pub health: i32,
    pub phase: BossPhase,
    pub attack_timer: u32,
}

impl BossState {
    #[must_use]
    pub const fn new(max_health: i32) -> Self {
        Self {
            health: max_health,
            phase: BossPhase::DamageRace,
            attack_timer: 0,
        }
    }

    /// One tick of the fight. The stun check runs before the attack timer
    /// and suppresses the attack on the tick it fires.
    pub fn update(
        &mut self,
        progress: &mut Progress,
        cfg: &BossConfig,
        fx: &mut Effects,
    ) -> BossTick {
        if !progress.has_shield {
            return BossTick::MissingShield;
        }
        if self.phase != BossPhase::DamageRace {
            return BossTick::Pressing;
        }
        if self.health <= cfg.phase_two_health {
            self.phase = BossPhase::Stabilization;
            fx.stop(Sound::BossFight);
            fx.sound(Sound::BossBefore);
            fx.notify(
                Notification::new(
                    "ENTITY STUNNED!",
                    "Initiating stabilization sequence!",
                    Rgb::CYAN,
                )
                .lasting(NOTICE_ALERT),
            );
            log::debug!("entity stunned at {} health", self.health);
            return BossTick::Stunned;
        }

        self.attack_timer += 1;
        if self.attack_timer < cfg.attack_interval {
            return BossTick::Pressing;
        }
        self.attack_timer = 0;
        let damage = (cfg.damage - SHIELD_REDUCTION).max(0);
        progress.apply_damage(damage);
        fx.sound(Sound::Hit);
        fx.notify(
            Notification::new(
                "TIME STRIKE",
                format!("The Entity struck! Took {damage} damage."),
                Rgb::RED,
            )
            .lasting(NOTICE_STRIKE),
        );
        BossTick::Struck { damage }
    }

    pub fn fire_blast(
        &mut self,
        character: &Character,
        progress: &Progress,
        fx: &mut Effects,
    ) -> BlastOutcome {
        if self.phase != BossPhase::DamageRace {
            return BlastOutcome::Ignored;
        }
        let damage = blast_damage(character, progress.has_amplifier);
        self.health -= damage;
        fx.sound(Sound::Blaster);
        fx.notify(
            Notification::new("BLAST LANDED", format!("Boss took {damage} damage."), Rgb::YELLOW)
                .lasting(NOTICE_BLAST),
        );
        if self.health <= 0 {
            BlastOutcome::Destroyed { damage }
        } else {
            BlastOutcome::Landed { damage }
        }
    }

    /// The entity recovers after a broken stabilization sequence.
    pub const fn reset_after_failed_sequence(&mut self, cfg: &BossConfig) {
        self.health = cfg.reset_health;
        self.phase = BossPhase::DamageRace;
        self.attack_timer = 0;
    }
}

/// Damage of one quantum blast.
#[must_use]
pub const fn blast_damage(character: &Character, has_amplifier: bool) -> i32 {
    let damage = BLAST_BASE_DAMAGE + character.strength;
    if has_amplifier {
        damage + AMPLIFIER_BONUS
    } else {
        damage
    }
}

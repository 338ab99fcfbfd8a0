//! Top-level adventure controller.
//!
//! Every key press goes through one table, [`Adventure::command_for`], which
//! maps the current screen and key to a [`Command`]. Commands are applied by
//! [`Adventure::apply`]; timers advance in [`Adventure::update`]. Both return
//! the [`Effects`] the presentation layer should realize.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::boss::{BlastOutcome, BossPhase, BossState, BossTick};
use crate::characters::{Character, CharacterClass, Stat};
use crate::combat::{self, MinorCombatPhase, WraithTick};
use crate::config::GameConfig;
use crate::constants::NOTICE_FINALE;
use crate::effects::{Effect, EffectSink, Effects, Notification, Rgb, Sound};
use crate::encounters::EncounterState;
use crate::input::{
    KEY_CANCEL, KEY_CAPACITOR, KEY_FINAL, KEY_GATE, KEY_RESET, KEY_ROOM_1A, KEY_ROOM_1B,
    KEY_ROOM_2A, KEY_ROOM_2B, KEY_ROOM_3A, KEY_ROOM_3B, KEY_TUTORIAL, Key,
};
use crate::inventory::{ItemKind, Progress};
use crate::qte::{QteFailure, QteProgress, QteState};
use crate::rng::RandomSource;
use crate::skill::{self, CheckPreview};
use crate::state::{DefeatCause, Ending, GameState, VictoryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "arg", rename_all = "snake_case")]
pub enum Command {
    Begin,
    SelectCharacter(CharacterClass),
    /// Advance a story or tutorial screen.
    Continue,
    Navigate(GameState),
    ReplayTutorial,
    /// Open the confirmation screen for the current room's action.
    RequestAction,
    Confirm,
    Cancel,
    EngageWraith,
    StrikeWraith,
    LeaveEncounter,
    EnterGate,
    Retreat,
    EnterBossRoom,
    FireBlast,
    FireCapacitor,
    Stabilize(Key),
    Reset,
}

impl Command {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::SelectCharacter(_) => "select_character",
            Self::Continue => "continue",
            Self::Navigate(_) => "navigate",
            Self::ReplayTutorial => "replay_tutorial",
            Self::RequestAction => "request_action",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::EngageWraith => "engage_wraith",
            Self::StrikeWraith => "strike_wraith",
            Self::LeaveEncounter => "leave_encounter",
            Self::EnterGate => "enter_gate",
            Self::Retreat => "retreat",
            Self::EnterBossRoom => "enter_boss_room",
            Self::FireBlast => "fire_blast",
            Self::FireCapacitor => "fire_capacitor",
            Self::Stabilize(_) => "stabilize",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectCharacter(class) => write!(f, "{}({class})", self.as_str()),
            Self::Navigate(room) => write!(f, "{}({room})", self.as_str()),
            Self::Stabilize(key) => write!(f, "{}({key})", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "item", rename_all = "snake_case")]
pub enum ActionKind {
    Collect(ItemKind),
    HealTrade,
}

impl ActionKind {
    /// Question shown on the confirmation screen.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Collect(ItemKind::Shield) => "Attempt to collect the QUANTUM SHIELD ?",
            Self::Collect(ItemKind::Capacitor) => "Attempt to collect the FLUX-CAPACITOR ?",
            Self::Collect(ItemKind::Amplifier) => "Attempt to secure the DAMAGE AMPLIFIER ?",
            Self::Collect(ItemKind::FirstStabilizer | ItemKind::SecondStabilizer) => {
                "Attempt to collect STABILIZER ?"
            }
            Self::HealTrade => "Sacrifice 1 Stabilizer for a FULL HEAL?",
        }
    }
}

/// An action waiting on the confirmation screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: ActionKind,
    /// Room to return to once the action is resolved or cancelled.
    pub origin: GameState,
    /// `None` for the heal trade.
    pub stat: Option<Stat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PendingPreview {
    SkillCheck {
        item: ItemKind,
        prompt: &'static str,
        check: CheckPreview,
    },
    HealTrade {
        prompt: &'static str,
        cost: u8,
        health_before: i32,
        health_after: i32,
    },
}

/// HUD snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub character: CharacterClass,
    pub character_name: &'static str,
    pub state: GameState,
    pub health: i32,
    pub max_health: i32,
    pub stabilizers: u8,
    pub stabilizers_needed: u8,
    pub has_shield: bool,
    pub has_amplifier: bool,
    pub has_capacitor: bool,
    pub capacitor_ready: bool,
    pub boss: Option<BossState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adventure {
    pub state: GameState,
    pub character: Option<CharacterClass>,
    pub progress: Progress,
    pub pending: Option<PendingAction>,
    pub encounter: EncounterState,
    pub boss: BossState,
    pub qte: Option<QteState>,
    pub ending: Option<Ending>,
    /// Ticks processed since the session started; survives resets.
    pub tick: u64,
    pub config: GameConfig,
}

impl Default for Adventure {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Adventure {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::LoreScreen,
            character: None,
            progress: Progress::new(config.max_health),
            pending: None,
            encounter: EncounterState::new(config.encounters.wraith_health),
            boss: BossState::new(config.boss.max_health),
            qte: None,
            ending: None,
            tick: 0,
            config,
        }
    }

    #[must_use]
    pub fn character_profile(&self) -> Option<&'static Character> {
        self.character.map(CharacterClass::profile)
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// What the room's action key would do right now, if anything.
    #[must_use]
    pub fn room_action(&self, room: GameState) -> Option<ActionKind> {
        if room == GameState::Room3B {
            return self
                .progress
                .can_heal_trade()
                .then_some(ActionKind::HealTrade);
        }
        ItemKind::found_in(room)
            .filter(|item| !self.progress.has(*item))
            .map(ActionKind::Collect)
    }

    /// The single key binding table.
    #[must_use]
    pub fn command_for(&self, key: Key) -> Option<Command> {
        match self.state {
            GameState::LoreScreen => (key == Key::Space).then_some(Command::Begin),
            GameState::CharacterSelect => match key {
                Key::Letter(c) => CharacterClass::from_select_key(c).map(Command::SelectCharacter),
                _ => None,
            },
            GameState::Narration | GameState::Explain1 | GameState::Explain2 => {
                (key == Key::Space).then_some(Command::Continue)
            }
            room if room.is_mid_game_room() => self.room_command(room, key),
            GameState::ConfirmAction => match key {
                Key::Space => Some(Command::Confirm),
                k if k.is_letter(KEY_CANCEL) => Some(Command::Cancel),
                _ => None,
            },
            GameState::FinalChamber => {
                if key.is_letter(KEY_GATE)
                    && self.progress.stabilizers >= self.config.stabilizers_needed
                {
                    Some(Command::EnterGate)
                } else if key.is_letter(KEY_CANCEL) {
                    Some(Command::Retreat)
                } else {
                    None
                }
            }
            GameState::BossPreview => (key == Key::Space).then_some(Command::EnterBossRoom),
            GameState::BossRoom => match key {
                Key::Space if self.boss.phase == BossPhase::DamageRace => Some(Command::FireBlast),
                k if k.is_letter(KEY_CAPACITOR) && self.progress.capacitor_ready() => {
                    Some(Command::FireCapacitor)
                }
                _ => None,
            },
            GameState::StabilizationPhase => key.is_symbol().then_some(Command::Stabilize(key)),
            GameState::GameWin | GameState::GameOver => {
                key.is_letter(KEY_RESET).then_some(Command::Reset)
            }
            _ => None,
        }
    }

    fn room_command(&self, room: GameState, key: Key) -> Option<Command> {
        if self.encounter.is_active() {
            return match key {
                Key::Space => match combat::phase(&self.encounter) {
                    Some(MinorCombatPhase::Idle) => Some(Command::EngageWraith),
                    Some(MinorCombatPhase::Engaged) => Some(Command::StrikeWraith),
                    _ => None,
                },
                k if k.is_letter(KEY_CANCEL) => Some(Command::LeaveEncounter),
                _ => None,
            };
        }
        match key {
            Key::Space => self.room_action(room).map(|_| Command::RequestAction),
            Key::Letter(c) => match c {
                KEY_ROOM_1A => Some(Command::Navigate(GameState::Room1A)),
                KEY_ROOM_1B => Some(Command::Navigate(GameState::Room1B)),
                KEY_ROOM_2A => Some(Command::Navigate(GameState::Room2A)),
                KEY_ROOM_2B => Some(Command::Navigate(GameState::Room2B)),
                KEY_ROOM_3A => Some(Command::Navigate(GameState::Room3A)),
                KEY_ROOM_3B => Some(Command::Navigate(GameState::Room3B)),
                KEY_FINAL => Some(Command::Navigate(GameState::FinalChamber)),
                KEY_TUTORIAL => Some(Command::ReplayTutorial),
                _ => None,
            },
            Key::Other => None,
        }
    }

    /// Every command the current screen accepts, in key order.
    #[must_use]
    pub fn available_commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        for key in Key::BOUND {
            if let Some(command) = self.command_for(key)
                && !commands.contains(&command)
            {
                commands.push(command);
            }
        }
        commands
    }

    #[must_use]
    pub fn accepts(&self, command: Command) -> bool {
        self.available_commands().contains(&command)
    }

    /// Translate a key and apply the bound command. Unbound keys are ignored.
    pub fn handle_input<R: RandomSource + ?Sized>(&mut self, key: Key, rng: &mut R) -> Effects {
        match self.command_for(key) {
            Some(command) => self.apply(command, rng),
            None => {
                log::trace!("ignored {key} in {}", self.state);
                Effects::new()
            }
        }
    }

    pub fn apply<R: RandomSource + ?Sized>(&mut self, command: Command, rng: &mut R) -> Effects {
        let mut fx = Effects::new();
        if !self.accepts(command) {
            log::warn!("{command} is not available in {}", self.state);
            return fx;
        }
        let from = self.state;

        match command {
            Command::Begin => {
                fx.sound(Sound::Ambient);
                self.advance_story(GameState::CharacterSelect, &mut fx);
            }
            Command::SelectCharacter(class) => {
                self.character = Some(class);
                self.state = GameState::Narration;
                fx.sound(class.profile().narration);
            }
            Command::Continue => match self.state {
                GameState::Narration => {
                    self.advance_story(GameState::Explain1, &mut fx);
                    fx.sound(Sound::TutorialOne);
                }
                GameState::Explain1 => {
                    self.advance_story(GameState::Explain2, &mut fx);
                    fx.sound(Sound::TutorialTwo);
                }
                _ => {
                    fx.push(Effect::StopNarration);
                    fx.sound(Sound::StartPress);
                    self.enter_room(GameState::Room2A, rng);
                }
            },
            Command::Navigate(room) => {
                fx.sound(Sound::StartPress);
                self.enter_room(room, rng);
            }
            Command::ReplayTutorial => {
                fx.push(Effect::StopNarration);
                self.state = GameState::Explain1;
                fx.sound(Sound::TutorialOne);
            }
            Command::RequestAction => self.request_action(),
            Command::Confirm => self.confirm(rng, &mut fx),
            Command::Cancel => {
                if let Some(action) = self.pending.take() {
                    self.state = action.origin;
                }
                fx.sound(Sound::Fail);
            }
            Command::EngageWraith => {
                combat::engage(&mut self.encounter, &mut fx);
            }
            Command::StrikeWraith => {
                combat::strike(&mut self.encounter, &mut fx);
            }
            Command::LeaveEncounter => {
                combat::leave(&mut self.encounter, &mut fx);
            }
            Command::EnterGate => {
                self.state = GameState::BossPreview;
                fx.sound(Sound::BossBefore);
                fx.sound(Sound::Paradox);
            }
            Command::Retreat => {
                fx.sound(Sound::Success);
                self.enter_room(GameState::Room2A, rng);
            }
            Command::EnterBossRoom => {
                fx.push(Effect::StopNarration);
                self.state = GameState::BossRoom;
                fx.sound(Sound::BossBefore);
                if self.progress.has_shield {
                    fx.sound(Sound::BossFight);
                } else {
                    self.finish(
                        Ending::Defeat {
                            cause: DefeatCause::MissingShield,
                        },
                        &mut fx,
                    );
                }
            }
            Command::FireBlast => self.fire_blast(&mut fx),
            Command::FireCapacitor => {
                let heal = self.config.capacitor_heal;
                self.progress.discharge_capacitor(heal, &mut fx);
            }
            Command::Stabilize(key) => self.stabilize(key, rng, &mut fx),
            Command::Reset => {
                fx.push(Effect::StopNarration);
                fx.stop(Sound::BossFight);
                let tick = self.tick;
                *self = Self::new(self.config.clone());
                self.tick = tick;
                log::info!("adventure reset");
            }
        }

        if self.state != from {
            log::debug!("{from} -> {} via {command}", self.state);
        }
        fx
    }

    /// Advance timers by one tick.
    pub fn update<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Effects {
        let mut fx = Effects::new();
        self.tick += 1;

        match self.state {
            room if room.is_mid_game_room() => {
                let strike = combat::tick(
                    &mut self.encounter,
                    &mut self.progress,
                    &self.config.encounters,
                    &mut fx,
                );
                if matches!(strike, WraithTick::Struck { .. }) {
                    self.check_health(&mut fx);
                }
            }
            GameState::BossRoom => {
                match self
                    .boss
                    .update(&mut self.progress, &self.config.boss, &mut fx)
                {
                    BossTick::Pressing => {}
                    BossTick::Struck { .. } => self.check_health(&mut fx),
                    BossTick::Stunned => {
                        let specialist = self
                            .character_profile()
                            .is_some_and(Character::is_int_specialist);
                        self.qte = Some(QteState::start(
                            &self.config.stabilization,
                            specialist,
                            rng,
                        ));
                        self.state = GameState::StabilizationPhase;
                        log::debug!("boss_room -> stabilization_phase");
                    }
                    BossTick::MissingShield => self.finish(
                        Ending::Defeat {
                            cause: DefeatCause::MissingShield,
                        },
                        &mut fx,
                    ),
                }
            }
            GameState::StabilizationPhase => {
                let timed_out = self.qte.as_mut().and_then(QteState::tick);
                if let Some(failure) = timed_out {
                    self.fail_sequence(failure, &mut fx);
                }
            }
            _ => {}
        }
        fx
    }

    /// HUD numbers, once a character is in play.
    #[must_use]
    pub fn status(&self) -> Option<StatusReport> {
        let profile = self.character_profile()?;
        if !self.state.shows_status() {
            return None;
        }
        let in_boss_fight = matches!(
            self.state,
            GameState::BossRoom | GameState::StabilizationPhase
        );
        Some(StatusReport {
            character: profile.class,
            character_name: profile.name,
            state: self.state,
            health: self.progress.health,
            max_health: self.progress.max_health,
            stabilizers: self.progress.stabilizers,
            stabilizers_needed: self.config.stabilizers_needed,
            has_shield: self.progress.has_shield,
            has_amplifier: self.progress.has_amplifier,
            has_capacitor: self.progress.has_capacitor,
            capacitor_ready: self.progress.capacitor_ready(),
            boss: in_boss_fight.then(|| self.boss.clone()),
        })
    }

    /// Confirmation-screen numbers for the pending action.
    #[must_use]
    pub fn pending_preview(&self) -> Option<PendingPreview> {
        let action = self.pending?;
        match action.kind {
            ActionKind::HealTrade => Some(PendingPreview::HealTrade {
                prompt: action.kind.prompt(),
                cost: 1,
                health_before: self.progress.health,
                health_after: self.progress.max_health,
            }),
            ActionKind::Collect(item) => {
                let profile = self.character_profile()?;
                Some(PendingPreview::SkillCheck {
                    item,
                    prompt: action.kind.prompt(),
                    check: skill::preview(item.skill_check(), profile, self.progress.has_shield),
                })
            }
        }
    }

    fn advance_story(&mut self, next: GameState, fx: &mut Effects) {
        fx.push(Effect::StopNarration);
        fx.sound(Sound::StartPress);
        self.state = next;
    }

    fn enter_room<R: RandomSource + ?Sized>(&mut self, room: GameState, rng: &mut R) {
        self.state = room;
        self.encounter
            .enter_room(room, &self.config.encounters, rng);
    }

    fn request_action(&mut self) {
        let origin = self.state;
        let Some(kind) = self.room_action(origin) else {
            return;
        };
        let stat = match kind {
            ActionKind::Collect(item) => Some(item.skill_check().stat),
            ActionKind::HealTrade => None,
        };
        self.pending = Some(PendingAction { kind, origin, stat });
        self.state = GameState::ConfirmAction;
    }

    fn confirm<R: RandomSource + ?Sized>(&mut self, rng: &mut R, fx: &mut Effects) {
        let Some(action) = self.pending.take() else {
            log::warn!("confirm with nothing pending");
            return;
        };
        match action.kind {
            ActionKind::HealTrade => {
                self.progress.heal_trade(fx);
            }
            ActionKind::Collect(item) => {
                let Some(profile) = self.character_profile() else {
                    log::warn!("skill check attempted without a character");
                    self.state = action.origin;
                    return;
                };
                let outcome = skill::resolve(
                    item.skill_check(),
                    profile,
                    self.progress.has_shield,
                    rng,
                    fx,
                );
                if outcome.success {
                    self.progress.grant_item(item, fx);
                } else {
                    self.progress.apply_damage(outcome.damage);
                }
            }
        }
        self.state = action.origin;
        self.check_health(fx);
    }

    fn fire_blast(&mut self, fx: &mut Effects) {
        let Some(profile) = self.character_profile() else {
            log::warn!("blast fired without a character");
            return;
        };
        if let BlastOutcome::Destroyed { .. } = self.boss.fire_blast(profile, &self.progress, fx) {
            fx.sound(Sound::Congratulations);
            fx.sound(Sound::Win);
            fx.notify(
                Notification::new("ENTITY DESTROYED", "The Paradox Entity is defeated!", Rgb::CYAN)
                    .lasting(NOTICE_FINALE),
            );
            self.finish(
                Ending::Victory {
                    kind: VictoryKind::BossDestroyed,
                },
                fx,
            );
        }
    }

    fn stabilize<R: RandomSource + ?Sized>(&mut self, key: Key, rng: &mut R, fx: &mut Effects) {
        let Some(qte) = self.qte.as_mut() else {
            log::warn!("stabilization input without an active sequence");
            return;
        };
        match qte.press(key, &self.config.stabilization, rng, fx) {
            QteProgress::Ignored | QteProgress::Advanced => {}
            QteProgress::Completed => {
                fx.sound(Sound::Success);
                fx.sound(Sound::Congratulations);
                fx.sound(Sound::Win);
                fx.notify(
                    Notification::new("REALITY STABILIZED!", "Quantum breach closed!", Rgb::CYAN)
                        .lasting(NOTICE_FINALE),
                );
                self.finish(
                    Ending::Victory {
                        kind: VictoryKind::RealityStabilized,
                    },
                    fx,
                );
            }
            QteProgress::Failed(failure) => self.fail_sequence(failure, fx),
        }
    }

    fn fail_sequence(&mut self, failure: QteFailure, fx: &mut Effects) {
        self.qte = None;
        self.boss.reset_after_failed_sequence(&self.config.boss);
        self.state = GameState::BossRoom;
        fx.sound(Sound::Fail);
        fx.notify(failure.notice());
        fx.sound(Sound::BossFight);
        log::debug!("stabilization failed ({failure:?}); entity back to {}", self.boss.health);
    }

    fn check_health(&mut self, fx: &mut Effects) {
        if self.progress.is_depleted() {
            self.finish(
                Ending::Defeat {
                    cause: DefeatCause::HealthDepleted,
                },
                fx,
            );
        }
    }

    fn finish(&mut self, ending: Ending, fx: &mut Effects) {
        if matches!(
            self.state,
            GameState::BossRoom | GameState::StabilizationPhase
        ) {
            fx.stop(Sound::BossFight);
        }
        self.pending = None;
        self.qte = None;
        self.ending = Some(ending);
        self.state = ending.screen();
        log::info!(
            "adventure ended: {ending} (health {}, tick {})",
            self.progress.health,
            self.tick
        );
    }
}

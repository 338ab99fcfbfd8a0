use paradox_game::effects::{notification_titles, plays};
use paradox_game::{
    BossPhase, BossState, CharacterClass, Command, DefeatCause, Ending, GameConfig, GameState,
    ItemKind, Key, ScriptedRng, Session, Sound, VictoryKind,
};

fn scripted(ints: impl IntoIterator<Item = i32>) -> Session<ScriptedRng> {
    Session::with_rng(GameConfig::default(), ScriptedRng::new().with_ints(ints))
}

fn press_all(session: &mut Session<ScriptedRng>, keys: &str) {
    for c in keys.chars() {
        session.press(c);
    }
}

/// A session parked in the boss room with full equipment.
fn boss_room(class: CharacterClass) -> Session<ScriptedRng> {
    let mut session = scripted([]);
    session.with_adventure_mut(|adventure| {
        adventure.character = Some(class);
        adventure.progress.has_shield = true;
        adventure.progress.stabilizers = 2;
        adventure.state = GameState::BossRoom;
    });
    session
}

fn press_target(session: &mut Session<ScriptedRng>) -> paradox_game::Effects {
    let target = session
        .adventure()
        .qte
        .as_ref()
        .map(|qte| qte.target.key())
        .unwrap();
    session.on_input(target)
}

#[test]
fn methodical_soldier_stabilizes_reality() {
    // rolls: stab1 (STR), shield, stab2, amplifier, capacitor
    let mut session = scripted([10, 15, 20, 18, 18]);

    press_all(&mut session, " s   ");
    assert_eq!(session.adventure().state, GameState::Room2A);

    press_all(&mut session, "  ");
    assert_eq!(session.adventure().progress.stabilizers, 1);
    press_all(&mut session, "z  ");
    assert!(session.adventure().progress.has_shield);
    press_all(&mut session, "w  ");
    assert_eq!(session.adventure().progress.stabilizers, 2);
    press_all(&mut session, "e  ");
    assert!(session.adventure().progress.has_amplifier);
    press_all(&mut session, "c  ");
    assert!(session.adventure().progress.has_capacitor);
    assert_eq!(session.adventure().progress.health, 10);

    press_all(&mut session, "x");
    assert_eq!(session.adventure().state, GameState::FinalChamber);
    session.press('d');
    assert_eq!(session.adventure().state, GameState::BossPreview);
    let fx = session.press(' ');
    assert_eq!(session.adventure().state, GameState::BossRoom);
    assert!(plays(&fx, Sound::BossFight));

    // 1 + STR 3 + amplifier = 5 per blast: 30 -> 10 in four shots
    for _ in 0..4 {
        session.press(' ');
    }
    assert_eq!(session.adventure().boss.health, 10);
    assert_eq!(session.adventure().state, GameState::BossRoom);

    let fx = session.on_tick();
    assert_eq!(session.adventure().state, GameState::StabilizationPhase);
    assert_eq!(session.adventure().boss.phase, BossPhase::Stabilization);
    assert_eq!(notification_titles(&fx), vec!["ENTITY STUNNED!"]);

    for _ in 0..4 {
        press_target(&mut session);
        session.advance(30);
    }
    let fx = press_target(&mut session);
    assert_eq!(session.adventure().state, GameState::GameWin);
    assert_eq!(
        session.adventure().ending,
        Some(Ending::Victory {
            kind: VictoryKind::RealityStabilized
        })
    );
    assert!(plays(&fx, Sound::Congratulations));
    assert!(plays(&fx, Sound::Win));
    assert!(notification_titles(&fx).contains(&"REALITY STABILIZED!"));
}

#[test]
fn lethal_blast_skips_the_stabilization_sequence() {
    let mut session = boss_room(CharacterClass::Soldier);
    session.with_adventure_mut(|adventure| adventure.boss.health = 12);
    session.with_adventure_mut(|adventure| adventure.progress.has_amplifier = true);

    session.press(' ');
    session.press(' ');
    assert_eq!(session.adventure().boss.health, 2);
    // Stun would fire on the next tick, but the killing blow lands first.
    let fx = session.press(' ');
    assert_eq!(session.adventure().state, GameState::GameWin);
    assert!(session.adventure().qte.is_none());
    assert_eq!(
        session.adventure().ending,
        Some(Ending::Victory {
            kind: VictoryKind::BossDestroyed
        })
    );
    assert!(notification_titles(&fx).contains(&"ENTITY DESTROYED"));
}

#[test]
fn blast_from_above_threshold_to_zero_wins_without_a_stun() {
    let mut config = GameConfig::default();
    config.boss.phase_two_health = 2;
    config.boss.reset_health = 3;
    config.boss.max_health = 4;
    config.validate().unwrap();

    let mut session = Session::with_rng(config, ScriptedRng::new());
    session.with_adventure_mut(|adventure| {
        adventure.character = Some(CharacterClass::Soldier);
        adventure.progress.has_shield = true;
        adventure.state = GameState::BossRoom;
    });
    assert_eq!(session.adventure().boss.health, 4);
    session.press(' ');
    assert_eq!(session.adventure().state, GameState::GameWin);
    assert!(session.adventure().qte.is_none());
    assert_eq!(session.adventure().boss.phase, BossPhase::DamageRace);
}

#[test]
fn timeout_on_the_last_step_restores_the_entity() {
    let mut session = boss_room(CharacterClass::Soldier);
    session.with_adventure_mut(|adventure| adventure.boss.health = 10);
    session.on_tick();
    assert_eq!(session.adventure().state, GameState::StabilizationPhase);

    for _ in 0..4 {
        press_target(&mut session);
    }
    let qte = session.adventure().qte.clone().unwrap();
    assert_eq!(qte.step, 4);
    assert_eq!(qte.time_remaining, 120);

    session.advance(119);
    assert_eq!(session.adventure().state, GameState::StabilizationPhase);
    let fx = session.on_tick();
    assert_eq!(session.adventure().state, GameState::BossRoom);
    assert_eq!(
        session.adventure().boss,
        BossState {
            health: 15,
            phase: BossPhase::DamageRace,
            attack_timer: 0,
        }
    );
    assert!(session.adventure().qte.is_none());
    assert!(plays(&fx, Sound::Fail));
    assert_eq!(notification_titles(&fx), vec!["TIME FAILURE!"]);
}

#[test]
fn wrong_key_aborts_the_sequence() {
    let mut session = boss_room(CharacterClass::Robot);
    session.with_adventure_mut(|adventure| adventure.boss.health = 9);
    session.on_tick();
    press_target(&mut session);

    let target = session.adventure().qte.as_ref().unwrap().target;
    let wrong = if target.as_char() == 'x' { 'y' } else { 'x' };
    let fx = session.press(wrong);
    assert_eq!(session.adventure().state, GameState::BossRoom);
    assert_eq!(session.adventure().boss.health, 15);
    assert_eq!(session.adventure().boss.phase, BossPhase::DamageRace);
    assert_eq!(notification_titles(&fx), vec!["SEQUENCE ABORTED!"]);

    // the race resumes and the entity can be stunned again
    session.with_adventure_mut(|adventure| adventure.boss.health = 10);
    session.on_tick();
    assert_eq!(session.adventure().state, GameState::StabilizationPhase);
}

#[test]
fn doctor_gets_extra_time_each_step() {
    let mut session = boss_room(CharacterClass::Doctor);
    session.with_adventure_mut(|adventure| adventure.boss.health = 10);
    session.on_tick();
    assert_eq!(session.adventure().qte.as_ref().unwrap().time_budget, 510);
    press_target(&mut session);
    assert_eq!(session.adventure().qte.as_ref().unwrap().time_budget, 450);
}

#[test]
fn boss_room_without_shield_is_fatal() {
    let mut session = boss_room(CharacterClass::Soldier);
    session.with_adventure_mut(|adventure| adventure.progress.has_shield = false);
    session.on_tick();
    assert_eq!(session.adventure().state, GameState::GameOver);
    assert_eq!(
        session.adventure().ending,
        Some(Ending::Defeat {
            cause: DefeatCause::MissingShield
        })
    );
}

#[test]
fn entity_strikes_wear_the_player_down() {
    let mut session = boss_room(CharacterClass::Doctor);
    session.with_adventure_mut(|adventure| adventure.progress.health = 2);
    let fx = session.advance(60);
    assert_eq!(session.adventure().progress.health, 1);
    assert!(notification_titles(&fx).contains(&"TIME STRIKE"));
    session.advance(60);
    assert_eq!(session.adventure().state, GameState::GameOver);
    assert_eq!(
        session.adventure().ending,
        Some(Ending::Defeat {
            cause: DefeatCause::HealthDepleted
        })
    );
}

#[test]
fn capacitor_fires_once_in_the_boss_room() {
    let mut session = boss_room(CharacterClass::Robot);
    session.with_adventure_mut(|adventure| {
        adventure.progress.has_capacitor = true;
        adventure.progress.health = 3;
    });
    assert!(
        session
            .adventure()
            .available_commands()
            .contains(&Command::FireCapacitor)
    );
    let fx = session.press('h');
    assert_eq!(session.adventure().progress.health, 8);
    assert!(plays(&fx, Sound::Heal));
    assert!(session.press('h').is_empty());
    assert_eq!(session.adventure().progress.health, 8);
}

#[test]
fn final_chamber_with_one_stabilizer_only_retreats() {
    let mut session = Session::with_rng(
        GameConfig::default(),
        ScriptedRng::new().with_floats([0.1]),
    );
    session.with_adventure_mut(|adventure| {
        adventure.character = Some(CharacterClass::Soldier);
        adventure.progress.stabilizers = 1;
        adventure.state = GameState::FinalChamber;
    });
    assert_eq!(
        session.adventure().available_commands(),
        vec![Command::Retreat]
    );
    assert!(session.press('d').is_empty());
    assert_eq!(session.adventure().state, GameState::FinalChamber);

    let fx = session.press('n');
    assert!(plays(&fx, Sound::Success));
    assert_eq!(session.adventure().state, GameState::Room2A);
    assert_eq!(
        session.adventure().encounter.kind,
        paradox_game::EncounterKind::Battle
    );
}

#[test]
fn wraith_fight_runs_to_completion() {
    let mut session = Session::with_rng(
        GameConfig::default(),
        ScriptedRng::new().with_floats([0.99, 0.12]),
    );
    session.with_adventure_mut(|adventure| {
        adventure.character = Some(CharacterClass::Robot);
        adventure.state = GameState::Room2A;
    });
    session.press('e');
    assert!(!session.adventure().encounter.is_active());
    session.press('z');
    assert_eq!(session.adventure().state, GameState::Room1A);
    assert!(session.adventure().encounter.is_active());

    // locked in the encounter
    session.press('c');
    assert_eq!(session.adventure().state, GameState::Room1A);

    session.advance(200);
    assert_eq!(session.adventure().progress.health, 10, "idle wraith waits");

    session.press(' ');
    assert!(session.adventure().encounter.battle_engaged);
    let fx = session.advance(120);
    assert_eq!(session.adventure().progress.health, 8);
    assert_eq!(notification_titles(&fx), vec!["WRAITH ATTACK!"]);

    for _ in 0..3 {
        session.press(' ');
    }
    assert!(session.adventure().encounter.minor_enemy_defeated);
    session.advance(240);
    assert_eq!(session.adventure().progress.health, 8);

    let fx = session.press('n');
    assert!(plays(&fx, Sound::StartPress));
    assert!(!session.adventure().encounter.is_active());
    session.press('c');
    assert_eq!(session.adventure().state, GameState::Room1B);
}

#[test]
fn wraith_can_finish_a_weakened_player() {
    let mut session = Session::with_rng(
        GameConfig::default(),
        ScriptedRng::new().with_floats([0.1]),
    );
    session.with_adventure_mut(|adventure| {
        adventure.character = Some(CharacterClass::Doctor);
        adventure.progress.health = 2;
        adventure.state = GameState::Room2A;
    });
    session.press('q');
    session.press(' ');
    session.advance(120);
    assert_eq!(session.adventure().state, GameState::GameOver);
}

#[test]
fn heal_trade_spends_a_stabilizer() {
    let mut session = scripted([]);
    session.with_adventure_mut(|adventure| {
        adventure.character = Some(CharacterClass::Doctor);
        adventure.progress.health = 4;
        adventure.progress.stabilizers = 2;
        adventure.state = GameState::Room3B;
    });
    session.press(' ');
    assert_eq!(session.adventure().state, GameState::ConfirmAction);
    let fx = session.press(' ');
    assert_eq!(session.adventure().state, GameState::Room3B);
    assert_eq!(session.adventure().progress.health, 10);
    assert_eq!(session.adventure().progress.stabilizers, 1);
    assert!(notification_titles(&fx).contains(&"ANCHOR ACTIVATED"));

    // full health: nothing left to trade for
    assert!(session.press(' ').is_empty());
    assert_eq!(session.adventure().state, GameState::Room3B);
}

#[test]
fn collected_items_stay_collected() {
    let mut session = scripted([20]);
    session.with_adventure_mut(|adventure| {
        adventure.character = Some(CharacterClass::Doctor);
        adventure.state = GameState::Room1B;
    });
    press_all(&mut session, "  ");
    assert!(session.adventure().progress.has(ItemKind::Capacitor));
    assert!(
        !session
            .adventure()
            .available_commands()
            .contains(&Command::RequestAction)
    );
}

#[test]
fn tutorial_replay_leads_back_to_the_hub() {
    let mut session = scripted([]);
    session.with_adventure_mut(|adventure| {
        adventure.character = Some(CharacterClass::Soldier);
        adventure.state = GameState::Room3A;
    });
    let fx = session.press('t');
    assert_eq!(session.adventure().state, GameState::Explain1);
    assert!(plays(&fx, Sound::TutorialOne));
    press_all(&mut session, "  ");
    assert_eq!(session.adventure().state, GameState::Room2A);
}

#[test]
fn reset_reinitializes_everything() {
    let mut session = boss_room(CharacterClass::Soldier);
    session.with_adventure_mut(|adventure| adventure.boss.health = 1);
    session.press(' ');
    assert_eq!(session.adventure().state, GameState::GameWin);
    assert_eq!(
        session.adventure().available_commands(),
        vec![Command::Reset]
    );

    session.on_input(Key::Letter('r'));
    let adventure = session.adventure();
    assert_eq!(adventure.state, GameState::LoreScreen);
    assert_eq!(adventure.character, None);
    assert_eq!(adventure.ending, None);
    assert_eq!(adventure.progress.health, 10);
    assert_eq!(adventure.progress.stabilizers, 0);
    assert!(!adventure.progress.has_shield);
    assert_eq!(adventure.boss.health, 30);
}

#[test]
fn snapshot_serializes_for_reports() {
    let mut session = scripted([]);
    press_all(&mut session, " b");
    let json = serde_json::to_value(session.adventure()).unwrap();
    assert_eq!(json["state"], "narration");
    assert_eq!(json["character"], "robot");
    assert_eq!(json["boss"]["phase"], "damage_race");
}

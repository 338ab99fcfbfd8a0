use anyhow::Result;
use colored::Colorize;
use paradox_game::{
    Adventure, CharacterClass, Command, Ending, GameConfig, GameState, ItemKind, Session,
};
use std::sync::Arc;

use super::policy::GameplayStrategy;

/// Frames a plan may run before it is reported as halted.
pub const DEFAULT_MAX_STEPS: u32 = 4_000;

#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub strategy: GameplayStrategy,
    /// Fixed character, or `None` to rotate through the roster by seed.
    pub character: Option<CharacterClass>,
    pub max_steps: u32,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub const fn new(strategy: GameplayStrategy) -> Self {
        Self {
            strategy,
            character: None,
            max_steps: DEFAULT_MAX_STEPS,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_character(mut self, character: CharacterClass) -> Self {
        self.character = Some(character);
        self
    }

    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }

    #[must_use]
    pub fn character_for(&self, seed: u64) -> CharacterClass {
        self.character.unwrap_or_else(|| {
            let roster = CharacterClass::ALL;
            let idx = usize::try_from(seed % roster.len() as u64).unwrap_or(0);
            roster[idx]
        })
    }
}

/// Assertion hook run after a simulation completes.
type SimulationExpectationFn =
    Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl std::fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    pub fn evaluate(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Complete record of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub character: CharacterClass,
    pub commands: Vec<Command>,
    /// Screens in the order they were first reached.
    pub visited: Vec<GameState>,
    pub steps: u32,
    pub final_state: Adventure,
    pub ending: Option<Ending>,
    /// Broken invariants and illegal transitions, in the order seen.
    pub violations: Vec<String>,
}

impl SimulationSummary {
    #[must_use]
    pub const fn game_ended(&self) -> bool {
        self.ending.is_some()
    }

    #[must_use]
    pub fn ending_label(&self) -> &'static str {
        self.ending.map_or("none", Ending::key)
    }

    #[must_use]
    pub fn rooms_visited(&self) -> usize {
        self.visited
            .iter()
            .filter(|state| state.is_mid_game_room())
            .count()
    }

    #[must_use]
    pub fn reached(&self, state: GameState) -> bool {
        self.visited.contains(&state)
    }
}

/// Headless deterministic runner for the core game logic.
#[derive(Debug, Clone)]
pub struct GameTester {
    verbose: bool,
    config: GameConfig,
}

impl GameTester {
    #[must_use]
    pub const fn new(config: GameConfig, verbose: bool) -> Self {
        Self { verbose, config }
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Play `plan` from the lore screen until an ending or the step budget.
    /// Each step offers the policy one command, then advances one frame.
    #[must_use]
    pub fn run_plan(&self, plan: &SimulationPlan, seed: u64) -> SimulationSummary {
        let character = plan.character_for(seed);
        let mut policy = plan.strategy.create_policy(character, seed);
        let mut session = Session::with_rng(
            self.config.clone(),
            paradox_game::SeededRng::from_seed(seed),
        );
        let mut tracker = Tracker::new(session.adventure().state);
        let mut commands = Vec::new();
        let mut steps = 0;

        while steps < plan.max_steps && !session.adventure().is_over() {
            steps += 1;
            if let Some(command) = policy.pick_command(session.adventure()) {
                session.apply(command);
                commands.push(command);
                if self.verbose {
                    println!(
                        "    {} {} -> {}",
                        format!("[{steps:>4}]").dimmed(),
                        command,
                        session.adventure().state
                    );
                }
                tracker.observe(session.adventure(), &self.config);
                if session.adventure().is_over() {
                    break;
                }
            }
            session.on_tick();
            tracker.observe(session.adventure(), &self.config);
        }

        let final_state = session.into_adventure();
        SimulationSummary {
            seed,
            strategy: plan.strategy,
            character,
            commands,
            visited: tracker.visited,
            steps,
            ending: final_state.ending,
            final_state,
            violations: tracker.violations,
        }
    }
}

struct Tracker {
    last: GameState,
    visited: Vec<GameState>,
    violations: Vec<String>,
}

impl Tracker {
    fn new(start: GameState) -> Self {
        Self {
            last: start,
            visited: vec![start],
            violations: Vec::new(),
        }
    }

    fn observe(&mut self, adventure: &Adventure, config: &GameConfig) {
        let state = adventure.state;
        if !legal_transition(self.last, state) {
            self.violations
                .push(format!("illegal transition {} -> {state}", self.last));
        }
        if !self.visited.contains(&state) {
            self.visited.push(state);
        }
        self.last = state;
        self.violations.extend(check_invariants(adventure, config));
    }
}

/// Screens reachable from `from` by one command or one frame.
#[must_use]
pub fn legal_transition(from: GameState, to: GameState) -> bool {
    use GameState::{
        BossPreview, BossRoom, CharacterSelect, ConfirmAction, Explain1, Explain2,
        FinalChamber, GameOver, GameWin, LoreScreen, Narration, Room2A, StabilizationPhase,
    };
    if from == to {
        return true;
    }
    match from {
        LoreScreen => to == CharacterSelect,
        CharacterSelect => to == Narration,
        Narration => to == Explain1,
        Explain1 => to == Explain2,
        Explain2 => to == Room2A,
        room if room.is_mid_game_room() => {
            to.is_mid_game_room()
                || matches!(to, Explain1 | ConfirmAction | FinalChamber | GameOver)
        }
        ConfirmAction => to.is_mid_game_room() || to == GameOver,
        FinalChamber => matches!(to, BossPreview | Room2A),
        BossPreview => matches!(to, BossRoom | GameOver),
        BossRoom => matches!(to, StabilizationPhase | GameWin | GameOver),
        StabilizationPhase => matches!(to, BossRoom | GameWin | GameOver),
        GameWin | GameOver => to == LoreScreen,
        _ => false,
    }
}

/// Structural invariants that must hold after every command and frame.
#[must_use]
pub fn check_invariants(adventure: &Adventure, config: &GameConfig) -> Vec<String> {
    let mut problems = Vec::new();
    let progress = &adventure.progress;
    let state = adventure.state;

    if progress.health > progress.max_health {
        problems.push(format!(
            "health {} above max {} in {state}",
            progress.health, progress.max_health
        ));
    }
    if progress.max_health != config.max_health {
        problems.push(format!("max health drifted to {}", progress.max_health));
    }
    let slots = ItemKind::ALL
        .iter()
        .filter(|item| matches!(item, ItemKind::FirstStabilizer | ItemKind::SecondStabilizer))
        .count();
    if usize::from(progress.stabilizers) > slots {
        problems.push(format!("{} stabilizers held", progress.stabilizers));
    }
    if adventure.pending.is_some() != (state == GameState::ConfirmAction) {
        problems.push(format!("pending action out of sync with {state}"));
    }
    if adventure.qte.is_some() != (state == GameState::StabilizationPhase) {
        problems.push(format!("stabilization sequence out of sync with {state}"));
    }
    if adventure.ending.is_some() != state.is_terminal() {
        problems.push(format!("ending out of sync with {state}"));
    }
    if let Some(ending) = adventure.ending
        && ending.screen() != state
    {
        problems.push(format!("{ending} shown on {state}"));
    }
    if state.shows_status() && adventure.character.is_none() {
        problems.push(format!("{state} reached without a character"));
    }
    problems
}

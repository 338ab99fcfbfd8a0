//! Named playthrough scenarios selectable from the command line.
use anyhow::{bail, ensure};
use paradox_game::GameState;

use super::game_tester::{SimulationPlan, SimulationSummary};
use super::policy::GameplayStrategy;

#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub description: String,
    pub plan: SimulationPlan,
}

const SCENARIOS: [(&str, &str); 3] = [
    ("smoke", "Story screens lead into the station and rooms can be explored"),
    ("full-run", "Methodical play reaches an ending for every character"),
    ("chaos", "Random inputs never break the screen graph or state invariants"),
];

/// Scenario keys with their one-line descriptions.
#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.to_vec()
}

#[must_use]
pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let key = name.trim().to_lowercase();
    let (key, description) = SCENARIOS.into_iter().find(|(k, _)| *k == key)?;
    let plan = match key {
        "smoke" => smoke_plan(),
        "full-run" => full_run_plan(),
        "chaos" => chaos_plan(),
        _ => return None,
    };
    Some(TestScenario {
        name: key.to_string(),
        description: description.to_string(),
        plan,
    })
}

fn no_violations(summary: &SimulationSummary) -> anyhow::Result<()> {
    if let Some(first) = summary.violations.first() {
        bail!(
            "{} invariant violations, first: {first}",
            summary.violations.len()
        );
    }
    Ok(())
}

fn smoke_plan() -> SimulationPlan {
    SimulationPlan::new(GameplayStrategy::Methodical)
        .with_max_steps(80)
        .with_expectation(no_violations)
        .with_expectation(|summary: &SimulationSummary| {
            ensure!(
                summary.reached(GameState::Room2A),
                "never reached the hub; last screen {}",
                summary.final_state.state
            );
            ensure!(
                summary.rooms_visited() >= 2 || summary.game_ended(),
                "explored only {} room(s)",
                summary.rooms_visited()
            );
            Ok(())
        })
}

fn full_run_plan() -> SimulationPlan {
    SimulationPlan::new(GameplayStrategy::Methodical)
        .with_expectation(no_violations)
        .with_expectation(|summary: &SimulationSummary| {
            ensure!(
                summary.game_ended(),
                "no ending after {} steps; stuck in {}",
                summary.steps,
                summary.final_state.state
            );
            Ok(())
        })
        .with_expectation(|summary: &SimulationSummary| {
            if summary.reached(GameState::BossRoom) {
                ensure!(
                    summary.final_state.progress.has_shield,
                    "entered the boss room without the shield"
                );
            }
            Ok(())
        })
}

fn chaos_plan() -> SimulationPlan {
    SimulationPlan::new(GameplayStrategy::Chaotic)
        .with_max_steps(2_500)
        .with_expectation(no_violations)
}

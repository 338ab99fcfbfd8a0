use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::game_tester::{GameTester, SimulationPlan, SimulationSummary};
use super::scenarios::TestScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    /// Ending key to number of iterations that finished that way.
    pub endings: BTreeMap<String, usize>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
    /// Adventure snapshot from the first failing iteration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_snapshot: Option<serde_json::Value>,
}

pub struct LogicTester {
    tester: GameTester,
}

impl LogicTester {
    #[must_use]
    pub const fn new(tester: GameTester) -> Self {
        Self { tester }
    }

    #[must_use]
    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.tester.verbose() {
                println!(
                    "🧪 Testing scenario: {} (strategy: {} seed: {})",
                    scenario.name.bright_white(),
                    scenario.plan.strategy,
                    seed
                );
            }

            let result = self.run_single_scenario(scenario, seed, iterations);
            results.push(result);
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let outcome = self.run_simulation_iterations(&scenario.plan, seed, iterations);

        let avg_duration = if outcome.performance_data.is_empty() {
            Duration::ZERO
        } else {
            outcome.performance_data.iter().sum::<Duration>()
                / u32::try_from(outcome.performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            seed,
            passed: outcome.failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: outcome.successes,
            failures: outcome.failures,
            endings: outcome.endings,
            average_duration: avg_duration,
            performance_data: outcome.performance_data,
            failure_snapshot: outcome.failure_snapshot,
        }
    }

    fn run_simulation_iterations(
        &self,
        plan: &SimulationPlan,
        seed: u64,
        iterations: usize,
    ) -> IterationOutcome {
        let mut outcome = IterationOutcome::default();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            let summary = self.tester.run_plan(plan, iteration_seed);
            *outcome
                .endings
                .entry(summary.ending_label().to_string())
                .or_default() += 1;

            if let Some(err) = evaluate_expectations(plan, &summary) {
                let status = summarize_run(&summary);
                outcome.failures.push(format!(
                    "Iteration {} (strategy {}, character {}, seed {}): {} | {}",
                    i + 1,
                    summary.strategy,
                    summary.character,
                    summary.seed,
                    err,
                    status
                ));
                if outcome.failure_snapshot.is_none() {
                    outcome.failure_snapshot = serde_json::to_value(&summary.final_state).ok();
                }

                if self.tester.verbose() {
                    println!(
                        "  ❌ Iteration {}/{} failed: {}",
                        i + 1,
                        iterations,
                        err.clone().red()
                    );
                    println!("     ↳ {status}");
                }
            } else {
                outcome.successes += 1;
                let duration = start_time.elapsed();
                outcome.performance_data.push(duration);

                if self.tester.verbose() {
                    println!(
                        "  ✅ Iteration {}/{} passed ({duration:?}) steps:{} ending:{} character:{}",
                        i + 1,
                        iterations,
                        summary.steps,
                        summary.ending_label(),
                        summary.character
                    );
                }
            }
        }

        outcome
    }
}

#[derive(Default)]
struct IterationOutcome {
    successes: usize,
    failures: Vec<String>,
    endings: BTreeMap<String, usize>,
    performance_data: Vec<Duration>,
    failure_snapshot: Option<serde_json::Value>,
}

fn evaluate_expectations(plan: &SimulationPlan, summary: &SimulationSummary) -> Option<String> {
    for expectation in &plan.expectations {
        if let Err(err) = expectation.evaluate(summary) {
            return Some(err.to_string());
        }
    }
    None
}

fn summarize_run(summary: &SimulationSummary) -> String {
    let last_commands = summary
        .commands
        .iter()
        .rev()
        .take(3)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let progress = &summary.final_state.progress;
    format!(
        "steps {} | screen {} | ending {} | HP {}/{} stabilizers {} | last commands: {}",
        summary.steps,
        summary.final_state.state,
        summary.ending_label(),
        progress.health,
        progress.max_health,
        progress.stabilizers,
        if last_commands.is_empty() {
            "none"
        } else {
            &last_commands
        }
    )
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u64>::deserialize(deserializer)?;
        Ok(millis_vec.into_iter().map(Duration::from_millis).collect())
    }
}

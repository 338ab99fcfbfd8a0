use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    let total = results.len();
    if total == 0 {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (passed as f64 / total as f64) * 100.0
}

fn endings_line(result: &ScenarioResult) -> String {
    result
        .endings
        .iter()
        .map(|(ending, count)| format!("{ending} x{count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Logic Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "Total scenarios: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", failed_tests.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(
            out,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Endings: {}", endings_line(result))?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    passed: bool,
    results: &'a [ScenarioResult],
}

pub fn generate_json_report<W: Write>(out: &mut W, results: &[ScenarioResult]) -> Result<()> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        passed: results.iter().all(|r| r.passed),
        results,
    };
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(out: &mut W, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Quantum Paradox Logic Test Results\n")?;
    writeln!(
        out,
        "_Generated {}_\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {failed_tests}")?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };

        writeln!(
            out,
            "### {} {} (seed {})\n",
            status, result.scenario_name, result.seed
        )?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Endings**: {}", endings_line(result))?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

mod logic;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use paradox_game::GameConfig;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::{GameTester, LogicTester, get_scenario, list_scenarios};
use util::{parse_seeds, split_csv};

#[derive(Debug, Parser)]
#[command(name = "paradox-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for The Quantum Paradox - headless scripted and randomized playthroughs")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Game tuning JSON to load instead of the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = parse_seeds(&args.seeds)?;
    let game_tester = GameTester::new(config, args.verbose);

    let all_results = run_logic_scenarios(&args, &scenarios, &seeds, game_tester);

    write_reports(&args, &all_results, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎮 Quantum Paradox Automated Tester".bright_cyan().bold());
    println!("{}", "=======================================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = GameConfig::from_json(&text)
        .with_context(|| format!("invalid game config in {}", path.display()))?;
    log::info!("loaded game config from {}", path.display());
    Ok(config)
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for (key, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    game_tester: GameTester,
) -> Vec<logic::ScenarioResult> {
    let mut results: Vec<logic::ScenarioResult> = Vec::new();

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(game_tester);

    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            if args.verbose {
                println!("📋 {} - {}", scenario.name.bold(), scenario.description);
            }
            results.extend(logic_tester.run_scenario(&scenario, seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

fn write_reports(
    args: &Args,
    results: &[logic::ScenarioResult],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            logic::reports::generate_json_report(&mut output_target, results)?;
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Quantum Paradox Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            output: None,
            config: None,
            verbose: false,
        }
    }

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("paradox-tester-{label}-{}", std::process::id()))
    }

    fn sample_result(passed: bool) -> logic::ScenarioResult {
        logic::ScenarioResult {
            scenario_name: "smoke".to_string(),
            seed: 1337,
            passed,
            iterations_run: 3,
            successful_iterations: if passed { 3 } else { 2 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["failure".to_string()]
            },
            endings: BTreeMap::new(),
            average_duration: Duration::from_millis(10),
            performance_data: vec![Duration::from_millis(10)],
            failure_snapshot: None,
        }
    }

    #[test]
    fn expands_all_scenarios_keyword() {
        let expanded = expand_scenarios("all,smoke");
        assert_eq!(expanded, vec!["smoke", "full-run", "chaos"]);
    }

    #[test]
    fn expand_scenarios_without_all_preserves_order() {
        let expanded = expand_scenarios("chaos,smoke");
        assert_eq!(expanded, vec!["chaos".to_string(), "smoke".to_string()]);
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let temp = temp_file("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("full-run"));
    }

    #[test]
    fn maybe_list_scenarios_returns_false_when_disabled() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn load_config_defaults_without_a_path() {
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }

    #[test]
    fn load_config_reads_and_validates_files() {
        let good = temp_file("config-good.json");
        std::fs::write(&good, r#"{"max_health": 12}"#).unwrap();
        assert_eq!(load_config(Some(&good)).unwrap().max_health, 12);

        let bad = temp_file("config-bad.json");
        std::fs::write(&bad, r#"{"max_health": 0}"#).unwrap();
        let err = load_config(Some(&bad)).unwrap_err();
        assert!(format!("{err:#}").contains("max_health"));

        let missing = temp_file("config-missing.json");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn run_logic_scenarios_skips_unknown_names() {
        let tester = GameTester::new(GameConfig::default(), false);
        let results = run_logic_scenarios(
            &base_args(),
            &["nonexistent".to_string(), "smoke".to_string()],
            &[42],
            tester,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scenario_name, "smoke");
    }

    #[test]
    fn write_reports_emits_json_for_results() {
        let temp = temp_file("report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("scenario_name"));
        assert!(content.contains("generated_at"));
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let temp = temp_file("report.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("No scenarios executed"));
    }

    #[test]
    fn write_reports_console_includes_total_time() {
        let temp = temp_file("report.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(false)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Logic Test Results Summary"));
        assert!(content.contains("Total time"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}

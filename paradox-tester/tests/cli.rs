use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "paradox-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_paradox-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    for key in ["smoke", "full-run", "chaos"] {
        assert!(content.contains(key), "missing {key}");
    }
}

#[test]
fn cli_runs_smoke_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_paradox-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--report",
            "json",
            "--scenarios",
            "smoke,chaos",
            "--iterations",
            "2",
            "--seeds",
            "1,2",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Quantum Paradox Automated Tester"));

    let report = std::fs::read_to_string(output_path).expect("read report");
    let value: serde_json::Value = serde_json::from_str(&report).expect("json report");
    assert_eq!(value["passed"], true);
    assert_eq!(value["results"].as_array().map(Vec::len), Some(4));
}

#[test]
fn cli_rejects_invalid_config() {
    let exe = env!("CARGO_BIN_EXE_paradox-tester");
    let config_path = temp_path("config.json");
    std::fs::write(&config_path, r#"{"encounters": {"merchant_chance": 1.5}}"#).expect("write");
    let output = Command::new(exe)
        .arg("--config")
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid game config"), "{stderr}");
}

#[test]
fn cli_rejects_bad_seeds() {
    let exe = env!("CARGO_BIN_EXE_paradox-tester");
    let output = Command::new(exe)
        .args(["--seeds", "nope"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed"));
}

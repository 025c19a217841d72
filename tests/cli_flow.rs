use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const SCENARIO: [&str; 8] = [
    "memory_utilization=70",
    "cpu_utilization=25",
    "grid_intensity=100",
    "embodied_coef=50",
    "instance_memory=1.75",
    "platform_memory=1.75",
    "instance_cpu=1",
    "platform_cpu=1",
];

fn sci_meter(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sci-meter"));
    cmd.args(args)
        .env("RUST_LOG", "off")
        .env_remove("LOG_OUTPUT")
        .env_remove("SCI_GRID_INTENSITY")
        .env_remove("SCI_EMBODIED_COEF")
        .env_remove("SCI_PLATFORM_MEMORY")
        .env_remove("SCI_PLATFORM_CPU");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run sci-meter binary")
}

fn write_temp_workload(name: &str, contents: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock should be after unix epoch")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "sci-meter-{name}-{stamp}-{}.json",
        std::process::id()
    ));
    fs::write(&path, contents).expect("failed to write workload file");
    path
}

#[test]
fn calc_prints_reference_scenario_score() {
    let mut args = vec!["calc"];
    args.extend(SCENARIO);
    let output = sci_meter(&args, &[]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "calc failed: {output:?}");
    assert!(stdout.contains("memory coefficient: 0.858"), "{stdout}");
    assert!(stdout.contains("11575.1078 gCO2eq/hour"), "{stdout}");
}

#[test]
fn calc_uses_environment_defaults() {
    let output = sci_meter(
        &[
            "calc",
            "memory_utilization=70",
            "cpu_utilization=25",
            "instance_memory=1.75",
            "instance_cpu=1",
        ],
        &[
            ("SCI_GRID_INTENSITY", "100"),
            ("SCI_EMBODIED_COEF", "50"),
            ("SCI_PLATFORM_MEMORY", "1.75"),
            ("SCI_PLATFORM_CPU", "1"),
        ],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "calc failed: {output:?}");
    assert!(stdout.contains("11575.1078 gCO2eq/hour"), "{stdout}");
}

#[test]
fn calc_rejects_zero_platform_baseline() {
    let args: Vec<&str> = std::iter::once("calc")
        .chain(SCENARIO.iter().map(|&word| {
            if word.starts_with("platform_cpu=") {
                "platform_cpu=0"
            } else {
                word
            }
        }))
        .collect();
    let output = sci_meter(&args, &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("platform_cpu must be non-zero"), "{stderr}");
}

#[test]
fn calc_rejects_out_of_range_utilization() {
    let args: Vec<&str> = std::iter::once("calc")
        .chain(SCENARIO.iter().map(|&word| {
            if word.starts_with("cpu_utilization=") {
                "cpu_utilization=100.001"
            } else {
                word
            }
        }))
        .collect();
    let output = sci_meter(&args, &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("utilization must be between 0 and 100"), "{stderr}");
}

#[test]
fn calc_rejects_nan_platform_value() {
    let args: Vec<&str> = std::iter::once("calc")
        .chain(SCENARIO.iter().map(|&word| {
            if word.starts_with("platform_memory=") {
                "platform_memory=NaN"
            } else {
                word
            }
        }))
        .collect();
    let output = sci_meter(&args, &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no score should be printed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("parameter 'platform_memory' is not a finite number"),
        "{stderr}"
    );
}

#[test]
fn report_prints_json_with_total() {
    let path = write_temp_workload(
        "report",
        r#"{
            "grid_intensity": 100,
            "embodied_coef": 50,
            "components": [
                {"name": "api", "memory_utilization": 70, "cpu_utilization": 25,
                 "instance_memory": 1.75, "platform_memory": 1.75,
                 "instance_cpu": 1, "platform_cpu": 1},
                {"name": "db", "memory_utilization": 20, "cpu_utilization": 28,
                 "instance_memory": 32, "platform_memory": 32,
                 "instance_cpu": 8, "platform_cpu": 8}
            ]
        }"#,
    );
    let path_arg = path.to_string_lossy().to_string();
    let output = sci_meter(&["report", path_arg.as_str()], &[]);
    let _ = fs::remove_file(&path);

    assert!(output.status.success(), "report failed: {output:?}");
    let report: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a JSON report");
    let components = report["components"]
        .as_array()
        .expect("components should be an array");
    assert_eq!(components.len(), 2);
    assert_eq!(components[1]["name"], "db");

    let sum: f64 = components
        .iter()
        .map(|component| component["sci"].as_f64().expect("sci should be a number"))
        .sum();
    let total = report["total_sci"].as_f64().expect("total should be a number");
    assert!((total - sum).abs() < 1e-9, "total {total} vs sum {sum}");
}

#[test]
fn explain_keeps_report_when_model_is_unreachable() {
    let path = write_temp_workload(
        "explain",
        r#"{
            "grid_intensity": 100,
            "embodied_coef": 50,
            "components": [
                {"name": "api", "memory_utilization": 70, "cpu_utilization": 25,
                 "instance_memory": 1.75, "platform_memory": 1.75,
                 "instance_cpu": 1, "platform_cpu": 1}
            ]
        }"#,
    );
    let path_arg = path.to_string_lossy().to_string();
    let output = sci_meter(
        &["explain", path_arg.as_str()],
        &[
            ("MODEL_PROVIDER", "ollama"),
            ("MODEL_BASE_URL", "http://127.0.0.1:1"),
            ("MODEL_TIMEOUT_SECS", "5"),
        ],
    );
    let _ = fs::remove_file(&path);

    assert!(!output.status.success(), "unreachable model should fail explain");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("total_sci"), "expected report on stdout:\n{stdout}");
    assert!(stdout.contains("\"name\": \"api\""), "{stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to narrate SCI report"), "{stderr}");
    assert!(stderr.contains("Connection refused"), "{stderr}");
}

#[test]
fn report_fails_for_missing_file() {
    let output = sci_meter(&["report", "/nonexistent/sci-meter/workload.json"], &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read workload file"), "{stderr}");
}

#[test]
fn unknown_command_prints_usage() {
    let output = sci_meter(&["scrape"], &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown command 'scrape'"), "{stderr}");
    assert!(stderr.contains("usage:"), "{stderr}");
}

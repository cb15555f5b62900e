use std::process::Command;

fn bcd_plan() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bcd-plan"))
}

#[test]
fn help_lists_subcommands() {
    let output = bcd_plan().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("demo"));
}

#[test]
fn demo_prints_scenario_summary() {
    let output = bcd_plan().arg("demo").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("400 x 400"));
    assert!(stdout.contains("robot radius 5"));
}

#[test]
fn plan_demo_prints_summary() {
    let output = bcd_plan().args(["plan", "--demo"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("coverage plan"));
    assert!(stdout.contains("cells: 6"));
}

#[test]
fn plan_without_scenario_or_demo_fails() {
    let output = bcd_plan().arg("plan").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn plan_from_json_file_round_trips() {
    let dir = std::env::temp_dir();
    let scenario_path = dir.join("bcd_plan_cli_test_scenario.json");
    let plan_json_path = dir.join("bcd_plan_cli_test_plan.json");

    // `demo` prints the human summary by default; `-o` forces JSON to a file.
    let demo_json = bcd_plan()
        .args(["demo", "-o"])
        .arg(&scenario_path)
        .output()
        .unwrap();
    assert!(demo_json.status.success());

    let output = bcd_plan()
        .args(["plan"])
        .arg(&scenario_path)
        .args(["-o"])
        .arg(&plan_json_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let content = std::fs::read_to_string(&plan_json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(value["trajectory"].as_array().unwrap().len() > 1);

    let _ = std::fs::remove_file(&scenario_path);
    let _ = std::fs::remove_file(&plan_json_path);
}

#[test]
fn completions_generate_without_error() {
    let output = bcd_plan().args(["completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

const TWO_TRIANGLES: &str = "# two triangles sharing node 3\n1 2\n1 3\n2 3\n3 4\n3 5\n4 5\n4 6\n5 6\n";

fn ltm_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ltm-sim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn ltm-sim")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "ltm-sim failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn write_graph(dir: &Path) -> String {
    let path = dir.join("graph.txt");
    fs::write(&path, TWO_TRIANGLES).unwrap();
    path.display().to_string()
}

#[test]
fn simulate_prints_layers() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_graph(dir.path());
    let output = ltm_sim(&["simulate", "--graph", &graph, "--seeds", "1"]);
    let json = stdout_json(&output);
    assert_eq!(
        json["history"]["layers"],
        serde_json::json!([[1], [2, 3], [4, 5], [6]])
    );
    assert_eq!(json["history"]["termination"], "converged");
    assert_eq!(json["fully_activated"], true);
}

#[test]
fn simulate_reports_step_limit() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_graph(dir.path());
    let output = ltm_sim(&[
        "simulate",
        "--graph",
        &graph,
        "--seeds",
        "1",
        "--step-limit",
        "1",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["history"]["termination"], "step-limit-reached");
    assert_eq!(json["activated"], 3);
}

#[test]
fn unknown_seed_fails() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_graph(dir.path());
    let output = ltm_sim(&["simulate", "--graph", &graph, "--seeds", "1,99"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("99"));
}

#[test]
fn threshold_overlay_is_validated() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_graph(dir.path());
    let overlay = dir.path().join("attrs.yaml");
    fs::write(&overlay, "thresholds:\n  - node: 4\n    threshold: 1.5\n").unwrap();
    let output = ltm_sim(&[
        "simulate",
        "--graph",
        &graph,
        "--attributes",
        overlay.to_str().unwrap(),
        "--seeds",
        "1",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("threshold-out-of-range"));
}

#[test]
fn select_both_strategies() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_graph(dir.path());

    let greedy = stdout_json(&ltm_sim(&["select", "--graph", &graph]));
    assert_eq!(greedy["selection"]["seeds"], serde_json::json!([3, 6]));
    assert_eq!(greedy["selection"]["activated"], 6);

    let burning = stdout_json(&ltm_sim(&[
        "select",
        "--graph",
        &graph,
        "--strategy",
        "minimal-burning",
    ]));
    assert_eq!(burning["selection"]["strategy"], "minimal-burning");
    assert_eq!(burning["selection"]["rounds"], 2);
}

#[test]
fn spread_ranks_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("chain.txt");
    fs::write(&graph, "1 2\n2 3\n").unwrap();
    let json = stdout_json(&ltm_sim(&[
        "spread",
        "--graph",
        graph.to_str().unwrap(),
        "--directed",
        "--concurrency",
        "2",
        "--top",
        "2",
    ]));
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["node"], 1);
    assert_eq!(entries[0]["activated"], 3);
}

#[test]
fn run_writes_report_with_provenance() {
    let dir = tempfile::tempdir().unwrap();
    write_graph(dir.path());
    let config = dir.path().join("run.yaml");
    fs::write(
        &config,
        "graph:\n  path: graph.txt\nsimulation:\n  seeds: [1]\nselection:\n  strategy: minimal-burning\nspread:\n  concurrency: 2\n  top: 3\nlogging:\n  level: warn\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    let summary = stdout_json(&ltm_sim(&[
        "run",
        "--config",
        config.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]));
    assert_eq!(summary["activated"], 6);

    let report: Value =
        serde_json::from_str(&fs::read_to_string(out.join("report.json")).unwrap()).unwrap();
    assert_eq!(report["graph"]["nodes"], 6);
    assert_eq!(report["graph"]["directedness"], "undirected");
    assert_eq!(report["provenance"]["graph_hash"].as_str().unwrap().len(), 64);
    assert_eq!(report["selection"]["seeds"], serde_json::json!([3, 6]));
    assert_eq!(report["spread"].as_array().unwrap().len(), 3);
    assert_eq!(report["simulation"]["layers"][0], serde_json::json!([1]));
}

#[test]
fn select_flags_are_validated_by_the_parser() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_graph(dir.path());

    let resimulating = stdout_json(&ltm_sim(&[
        "select",
        "--graph",
        &graph,
        "--coverage-check",
        "simulation",
    ]));
    assert_eq!(resimulating["selection"]["seeds"], serde_json::json!([3, 6]));

    let output = ltm_sim(&["select", "--graph", &graph, "--strategy", "random"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("possible values"), "{stderr}");
    assert!(stderr.contains("minimal-burning"), "{stderr}");
}

#[test]
fn empty_spread_section_uses_field_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_graph(dir.path());
    let config = dir.path().join("run.yaml");
    fs::write(&config, "graph:\n  path: graph.txt\nspread: {}\n").unwrap();
    let out = dir.path().join("out");

    stdout_json(&ltm_sim(&[
        "run",
        "--config",
        config.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]));
    let report: Value =
        serde_json::from_str(&fs::read_to_string(out.join("report.json")).unwrap()).unwrap();
    let spread = report["spread"].as_array().unwrap();
    assert_eq!(spread.len(), 6);
    assert_eq!(spread[0]["node"], 1);
    assert_eq!(spread[0]["activated"], 6);
    assert!(report.get("selection").is_none());
}

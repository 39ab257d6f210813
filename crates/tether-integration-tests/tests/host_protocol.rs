//! Integration tests for the `tether serve` protocol, driven from loaded
//! configuration the way the binary does it.

use std::collections::HashMap;

use serde_json::Value;
use tether_cli::{ServeHost, config_bridge};
use tether_config::loader;

fn run_session(host: &ServeHost, lines: &[&str]) -> Vec<Value> {
    let input = lines.join("\n");
    let mut output = Vec::new();
    host.run(input.as_bytes(), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn configured_ceiling_applies_to_declarations() {
    let workspace = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(workspace.path().join(".tether")).unwrap();
    std::fs::write(
        workspace.path().join(".tether/config.toml"),
        "[guard]\nmax_declared_files = 2\n",
    )
    .unwrap();

    let resolved = loader::load_with_env(
        Some(workspace.path()),
        Some(home.path()),
        None,
        &HashMap::new(),
    )
    .unwrap();
    let host = ServeHost::new(
        config_bridge::to_guard_config(&resolved.config),
        config_bridge::to_report_sink(&resolved.config),
        resolved.config.guard.persist_on_exit,
    );

    let responses = run_session(
        &host,
        &[
            r#"{"op":"declare","task":"too wide","files":["a.js","b.js","c.js"]}"#,
            r#"{"op":"declare","task":"narrow","files":["a.js","b.js"]}"#,
        ],
    );
    assert_eq!(responses[0]["allowed"], false);
    assert_eq!(responses[0]["maxFiles"], 2);
    assert_eq!(responses[1]["allowed"], true);
}

#[test]
fn full_session_persists_report_on_exit() {
    let workspace = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    let reports = workspace.path().join("reports");
    let explicit = workspace.path().join("tether.toml");
    std::fs::write(
        &explicit,
        format!(
            "[guard]\nreport_dir = {:?}\npersist_on_exit = true\n",
            reports.display().to_string()
        ),
    )
    .unwrap();

    let resolved =
        loader::load_with_env(None, Some(home.path()), Some(&explicit), &HashMap::new()).unwrap();
    let host = ServeHost::new(
        config_bridge::to_guard_config(&resolved.config),
        config_bridge::to_report_sink(&resolved.config),
        resolved.config.guard.persist_on_exit,
    );

    let responses = run_session(
        &host,
        &[
            r#"{"op":"declare","task":"fix login validation","files":["login.js"]}"#,
            r#"{"op":"intercept","tool":"write_file","args":{"file_path":"login.js"}}"#,
            r#"{"op":"intercept","tool":"write_file","args":{"file_path":"export.js"}}"#,
            r#"{"op":"intercept","tool":"read_file","args":{"path":"export.js"}}"#,
            r#"{"op":"report"}"#,
        ],
    );
    assert_eq!(responses.len(), 5);
    assert_eq!(responses[1]["outcome"], "allowed");
    assert_eq!(responses[2]["outcome"], "blocked");
    assert_eq!(responses[3]["outcome"], "not_applicable");
    assert_eq!(responses[4]["violations"].as_array().unwrap().len(), 1);

    let outcome = host.finish().unwrap();
    assert!(outcome.success);
    let path = outcome.path.unwrap();
    assert!(path.starts_with(&reports));
    let stored: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(stored["totalModifications"], 2);
}

#[test]
fn disabled_host_passes_everything() {
    let mut guard_config = config_bridge::to_guard_config(&tether_config::Config::default());
    guard_config.enabled = false;
    let host = ServeHost::new(guard_config, None, false);

    let responses = run_session(
        &host,
        &[
            r#"{"op":"check","path":"anything.js","operation":"delete"}"#,
            r#"{"op":"enable"}"#,
            r#"{"op":"check","path":"anything.js","operation":"delete"}"#,
        ],
    );
    assert_eq!(responses[0]["allowed"], true);
    assert_eq!(responses[1]["ok"], true);
    assert_eq!(responses[2]["allowed"], false);
}

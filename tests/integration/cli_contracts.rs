use advice::tooling::cli::{Cli, CliContext, Commands};
use clap::Parser;
use tempfile::TempDir;

use crate::integration::support::write_fixture;

fn context(temp_dir: &TempDir) -> CliContext {
    let config_path = write_fixture(temp_dir.path());
    let cli = Cli::parse_from([
        "advice",
        "--config",
        config_path.to_str().unwrap(),
        "labels",
    ]);
    let config = CliContext::load_config(&cli).unwrap();
    CliContext::from_config(&config).unwrap()
}

fn json(output: &str) -> serde_json::Value {
    serde_json::from_str(output).unwrap()
}

#[test]
fn list_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let output = cli
        .execute(&Commands::List {
            for_agent: "gastown/crew/alice".to_string(),
            format: "json".to_string(),
        })
        .unwrap();

    let parsed = json(&output);
    assert_eq!(parsed["agent"], "gastown/crew/alice");
    assert!(parsed["notice"].is_null());
    let ids: Vec<&str> = parsed["advice"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["adv-1", "adv-2", "adv-3", "adv-4", "adv-7"]);
    assert_eq!(parsed["total"], 5);
    assert_eq!(parsed["rig"], "gastown");
    assert_eq!(parsed["advice"][0]["description"], "");
    assert_eq!(parsed["advice"][1]["scope"], "gastown");
    assert_eq!(parsed["advice"][3]["scope"], "Crew");
}

#[test]
fn list_hides_advice_scoped_to_other_rigs() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let output = cli
        .execute(&Commands::List {
            for_agent: "beads/crew/carol".to_string(),
            format: "json".to_string(),
        })
        .unwrap();

    let parsed = json(&output);
    assert_eq!(parsed["rig"], "beads");
    let ids: Vec<&str> = parsed["advice"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["adv-3", "adv-4", "adv-6"]);
    assert!(parsed["notice"]
        .as_str()
        .unwrap()
        .contains("advice_subscriptions"));
}

#[test]
fn unknown_agent_has_no_current_rig() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let parsed = json(
        &cli.execute(&Commands::List {
            for_agent: "mayor".to_string(),
            format: "json".to_string(),
        })
        .unwrap(),
    );
    assert!(parsed["rig"].is_null());
    assert_eq!(parsed["total"], 1);
    assert_eq!(parsed["advice"][0]["id"], "adv-3");
}

#[test]
fn resolve_json_reports_notice_for_unknown_agent() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let output = cli
        .execute(&Commands::Resolve {
            agent: "gastown/crew/zed".to_string(),
            format: "json".to_string(),
        })
        .unwrap();

    let parsed = json(&output);
    assert_eq!(
        parsed["effective"],
        serde_json::json!(["global", "agent:gastown/crew/zed"])
    );
    assert!(parsed["notice"].as_str().unwrap().contains("not found"));
}

#[test]
fn preview_and_labels_cover_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);

    let parsed = json(
        &cli.execute(&Commands::Preview {
            label: "rig:beads".to_string(),
            format: "json".to_string(),
        })
        .unwrap(),
    );
    assert_eq!(parsed["total"], 1);
    assert_eq!(parsed["advice"][0]["id"], "adv-6");
    assert_eq!(parsed["advice"][0]["labels"], serde_json::json!(["rig:beads"]));

    let parsed = json(
        &cli.execute(&Commands::Labels {
            format: "json".to_string(),
        })
        .unwrap(),
    );
    assert_eq!(parsed["total"], 6);
    assert_eq!(parsed["labels"][0]["label"], "global");
    assert_eq!(parsed["labels"][0]["count"], 1);
}

#[test]
fn cli_store_flags_override_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_fixture(temp_dir.path());
    let missing = temp_dir.path().join("missing.json");
    let cli = Cli::parse_from([
        "advice",
        "--config",
        config_path.to_str().unwrap(),
        "--advisories",
        missing.to_str().unwrap(),
        "--log-level",
        "debug",
        "labels",
    ]);

    let config = CliContext::load_config(&cli).unwrap();
    assert_eq!(config.stores.advisories_file, Some(missing));
    assert_eq!(config.logging.level, "debug");

    let context = CliContext::from_config(&config).unwrap();
    let output = context.execute(&cli.command).unwrap();
    assert_eq!(output, "No labels found.");
}

use advice::agent::{AgentIdentity, AgentSubscriptionFields, InMemoryAgentStore};
use advice::{AdvisoryItem, Label};
use std::fs;
use std::path::{Path, PathBuf};

pub fn label(value: &str) -> Label {
    Label::new(value).unwrap()
}

pub fn labels(values: &[&str]) -> Vec<Label> {
    values.iter().map(|v| label(v)).collect()
}

pub fn identity(value: &str) -> AgentIdentity {
    AgentIdentity::new(value).unwrap()
}

pub fn item(id: &str, item_labels: &[&str]) -> AdvisoryItem {
    AdvisoryItem::new(id, labels(item_labels))
}

/// Store holding alice (crew on gastown, opted into `testing`)
pub fn gastown_store() -> InMemoryAgentStore {
    let store = InMemoryAgentStore::new();
    store.upsert(
        identity("gastown/crew/alice"),
        AgentSubscriptionFields::new()
            .with_role("crew")
            .with_cluster("gastown")
            .with_custom(labels(&["testing"])),
    );
    store
}

pub const AGENTS_TOML: &str = r#"
[[agents]]
id = "gastown/crew/alice"
role = "crew"
rig = "gastown"
advice_subscriptions = ["testing"]

[[agents]]
id = "gastown/polecats/bob"
role = "polecat"
rig = "gastown"
advice_subscriptions = ["security"]
advice_subscriptions_exclude = ["global"]

[[agents]]
id = "beads/crew/carol"
role = "crew"
rig = "beads"
advice_subscriptions = 42
"#;

pub const ADVISORIES_JSON: &str = r#"[
  {"id": "adv-1", "title": "Run the test suite", "description": null, "labels": ["testing"]},
  {"id": "adv-2", "title": "Rotate credentials", "labels": ["security", "rig:gastown"]},
  {"id": "adv-3", "title": "Be concise", "labels": ["global"]},
  {"id": "adv-4", "title": "Crew handoff", "labels": ["role:crew"]},
  {"id": "adv-5", "title": "Unlabeled", "labels": []},
  {"id": "adv-6", "title": "Beads only", "labels": ["rig:beads", ""]},
  {"id": "adv-7", "title": "Gastown crew", "labels": ["rig:gastown", "role:crew"]}
]"#;

/// Write the agent and advisory fixtures plus a config pointing at them
pub fn write_fixture(dir: &Path) -> PathBuf {
    let agents = dir.join("agents.toml");
    let advisories = dir.join("advisories.json");
    fs::write(&agents, AGENTS_TOML).unwrap();
    fs::write(&advisories, ADVISORIES_JSON).unwrap();

    let config = dir.join("config.toml");
    fs::write(
        &config,
        format!(
            "[stores]\nagents_file = {:?}\nadvisories_file = {:?}\n\n[logging]\nlevel = \"off\"\n",
            agents.display().to_string(),
            advisories.display().to_string()
        ),
    )
    .unwrap();
    config
}

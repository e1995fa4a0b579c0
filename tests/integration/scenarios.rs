use std::sync::Arc;

use advice::agent::{AgentSubscriptionFields, InMemoryAgentStore, TomlAgentStore};
use advice::{
    match_advisories, resolve, AdvisoryCatalog, LabelSet, ResolutionNotice, ResolverOptions,
    SubscriptionResolver,
};

use crate::integration::support::{gastown_store, identity, item, label, labels, AGENTS_TOML};

fn alice_fields() -> AgentSubscriptionFields {
    AgentSubscriptionFields::new()
        .with_role("crew")
        .with_cluster("gastown")
        .with_custom(labels(&["testing", "ci"]))
}

#[test]
fn crew_member_gets_auto_then_custom_labels() {
    let effective = resolve(
        &identity("gastown/crew/alice"),
        &alice_fields(),
        &ResolverOptions::default(),
    );
    assert_eq!(
        effective.to_vec(),
        labels(&[
            "global",
            "agent:gastown/crew/alice",
            "rig:gastown",
            "role:crew",
            "testing",
            "ci",
        ])
    );
}

#[test]
fn excluding_role_label_keeps_remaining_order() {
    let fields = alice_fields().with_excluded(labels(&["role:crew"]));
    let effective = resolve(
        &identity("gastown/crew/alice"),
        &fields,
        &ResolverOptions::default(),
    );
    assert_eq!(
        effective.to_vec(),
        labels(&[
            "global",
            "agent:gastown/crew/alice",
            "rig:gastown",
            "testing",
            "ci",
        ])
    );
}

#[test]
fn unknown_agent_falls_back_to_identity_labels() {
    let resolver = SubscriptionResolver::new(Arc::new(gastown_store()));
    let resolution = resolver.resolve_for(&identity("gastown/crew/zed"));
    assert_eq!(
        resolution.effective.to_vec(),
        labels(&["global", "agent:gastown/crew/zed"])
    );
    assert_eq!(resolution.notice, Some(ResolutionNotice::AgentNotFound));
}

#[test]
fn match_returns_intersecting_items_in_pool_order() {
    let pool = vec![
        item("1", &["testing"]),
        item("2", &["security"]),
        item("3", &["global"]),
    ];
    let effective: LabelSet = labels(&["global", "testing"]).into_iter().collect();

    let ids: Vec<&str> = match_advisories(&effective, &pool)
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);

    let catalog = AdvisoryCatalog::new(pool.clone());
    let ids: Vec<&str> = match_advisories(&effective, &catalog)
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn custom_broadcast_label_replaces_global() {
    let options = ResolverOptions::with_broadcast_label(label("everyone"));
    let resolver = SubscriptionResolver::with_options(Arc::new(InMemoryAgentStore::new()), options);
    let resolution = resolver.resolve_for(&identity("gastown/crew/zed"));
    assert_eq!(
        resolution.effective.to_vec(),
        labels(&["everyone", "agent:gastown/crew/zed"])
    );
}

#[test]
fn opting_out_of_global_hides_broadcast_advice() {
    let store = TomlAgentStore::from_toml_str(AGENTS_TOML, "agents.toml".as_ref()).unwrap();
    let resolver = SubscriptionResolver::new(Arc::new(store));
    let resolution = resolver.resolve_for(&identity("gastown/polecats/bob"));

    assert!(!resolution.effective.contains("global"));
    assert!(resolution.effective.contains("security"));
    assert!(resolution.notice.is_none());

    let pool = vec![item("broadcast", &["global"]), item("sec", &["security"])];
    let matched = match_advisories(&resolution.effective, &pool);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id.as_str(), "sec");
}

#[test]
fn malformed_subscriptions_are_reported_not_fatal() {
    let store = TomlAgentStore::from_toml_str(AGENTS_TOML, "agents.toml".as_ref()).unwrap();
    let resolver = SubscriptionResolver::new(Arc::new(store));
    let resolution = resolver.resolve_for(&identity("beads/crew/carol"));

    assert_eq!(
        resolution.effective.to_vec(),
        labels(&["global", "agent:beads/crew/carol", "rig:beads", "role:crew"])
    );
    assert_eq!(
        resolution.notice,
        Some(ResolutionNotice::MalformedFields(vec![
            "advice_subscriptions".to_string()
        ]))
    );
}

#[test]
fn subscription_updates_take_effect_on_next_resolution() {
    let store = Arc::new(gastown_store());
    let resolver = SubscriptionResolver::new(store.clone());
    let alice = identity("gastown/crew/alice");

    assert!(resolver.resolve_for(&alice).effective.contains("testing"));

    assert!(store.set_subscriptions(&alice, labels(&["ci"]), labels(&["rig:gastown"])));
    let effective = resolver.resolve_for(&alice).effective;
    assert!(!effective.contains("testing"));
    assert!(!effective.contains("rig:gastown"));
    assert!(effective.contains("ci"));
}

//! Invariant 3 and scenarios E4/E6 (spec §8): a saved state file reloads to
//! an equivalent `Config` (WAN filtered back out, unknown tags dropped), and
//! `Engine::from_state_with_plan` rebuilds a plan with the same shape as the
//! one that produced the state in the first place.

mod support;

use serial_test::serial;
use stagecraft::engine::config::{Config, ContainerSpec, NetworkSpec};
use stagecraft::engine::logger::Logger;
use stagecraft::engine::state::{self, default_state_path, ResourceKind, StateEntry};
use stagecraft::engine::Engine;
use support::{group_shape, stub_plan};

#[tokio::test]
#[serial]
async fn apply_then_reload_produces_an_equivalent_plan_shape() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = default_state_path(dir.path());

    let config = Config {
        networks: vec![NetworkSpec {
            name: "net-a".to_string(),
            driver: None,
        }],
        containers: vec![ContainerSpec {
            name: "web".to_string(),
            image: "nginx:latest".to_string(),
            networks: vec!["net-a".to_string()],
            environment: vec![],
            published_port: None,
        }],
        ..Default::default()
    };
    let plan = stub_plan(&config);
    let original_shape = group_shape(&plan);

    let engine = Engine::from_parts(config, plan, state_path.clone(), Logger::default());
    engine.apply().await.unwrap();

    let reloaded = Engine::from_state_with_plan(state_path, Logger::default(), stub_plan).unwrap();
    assert_eq!(group_shape(reloaded.plan()), original_shape);
    // WAN is re-synthesised, not reloaded from state, so `resource_count`
    // (which excludes WAN) matches the originally declared resources.
    assert_eq!(reloaded.resource_count(), 2);
}

#[test]
fn state_file_with_an_unknown_type_tag_is_skipped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = default_state_path(dir.path());

    let raw = serde_json::json!([
        { "Type": "config.Network", "Value": { "name": "net-a", "driver": null } },
        { "Type": "config.FutureKind", "Value": { "anything": true } },
    ]);
    std::fs::write(&path, serde_json::to_string(&raw).unwrap()).unwrap();

    let entries = state::load(&path).unwrap();
    assert_eq!(entries.len(), 1);
    assert!(matches!(entries[0].0, ResourceKind::Network(_)));
}

#[test]
fn wan_named_network_in_state_is_filtered_from_the_rebuilt_config() {
    let entries = vec![
        StateEntry(ResourceKind::Network(NetworkSpec::wan())),
        StateEntry(ResourceKind::Network(NetworkSpec {
            name: "net-a".to_string(),
            driver: None,
        })),
        StateEntry(ResourceKind::Container(ContainerSpec {
            name: "web".to_string(),
            image: "nginx:latest".to_string(),
            networks: vec!["net-a".to_string()],
            environment: vec![],
            published_port: None,
        })),
    ];
    let config = state::config_from_entries(&entries);
    assert_eq!(config.networks.len(), 1);
    assert_eq!(config.networks[0].name, "net-a");
    assert_eq!(config.resource_count(), 2);
}

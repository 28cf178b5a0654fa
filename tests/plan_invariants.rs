//! Invariant 1 & 2 (spec §8): `build(Config)` always yields exactly seven
//! groups, the WAN network always lands first in group 0, and groups with no
//! matching resources stay empty rather than disappearing.

mod support;

use proptest::prelude::*;
use stagecraft::engine::config::{Config, ContainerSpec, NetworkSpec};
use support::{group_shape, stub_plan};

#[test]
fn empty_config_still_yields_seven_groups_with_only_wan_present() {
    let plan = stub_plan(&Config::default());
    assert_eq!(plan.len(), 7);
    assert_eq!(group_shape(&plan), vec![1, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn group_five_is_always_empty() {
    let config = Config {
        networks: vec![NetworkSpec {
            name: "a".to_string(),
            driver: None,
        }],
        containers: vec![ContainerSpec {
            name: "web".to_string(),
            image: "nginx:latest".to_string(),
            networks: vec!["a".to_string()],
            environment: vec![],
            published_port: None,
        }],
        ..Default::default()
    };
    let plan = stub_plan(&config);
    assert!(plan[5].is_empty());
}

proptest! {
    /// However many networks/containers a blueprint declares, the plan has
    /// exactly seven groups, WAN is the first entry of group 0, and group 0's
    /// length is always `networks.len() + 1`.
    #[test]
    fn plan_shape_tracks_declared_resource_counts(
        network_count in 0usize..8,
        container_count in 0usize..8,
    ) {
        let networks: Vec<NetworkSpec> = (0..network_count)
            .map(|i| NetworkSpec { name: format!("net-{i}"), driver: None })
            .collect();
        let containers: Vec<ContainerSpec> = (0..container_count)
            .map(|i| ContainerSpec {
                name: format!("web-{i}"),
                image: "nginx:latest".to_string(),
                networks: vec![],
                environment: vec![],
                published_port: None,
            })
            .collect();
        let config = Config { networks, containers, ..Default::default() };

        let plan = stub_plan(&config);
        prop_assert_eq!(plan.len(), 7);
        prop_assert_eq!(plan[0].len(), network_count + 1);
        prop_assert_eq!(plan[1].len(), container_count);
        prop_assert!(plan[5].is_empty());
    }
}

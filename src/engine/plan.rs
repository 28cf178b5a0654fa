//! Pure function mapping Config → a fixed-length sequence of resource groups.
//!
//! Seven groups, fixed schedule, no topological pass beyond it (spec §4.1).

use std::sync::Arc;

use super::clients::ClientsBundle;
use super::config::{Config, NetworkSpec};
use super::logger::Logger;
use super::provider::Provider;
use crate::providers;

/// Number of groups a plan always allocates, including the reserved empty one.
pub const GROUP_COUNT: usize = 7;

/// One group's worth of providers, run concurrently relative to each other.
///
/// Held as `Arc` rather than `Box` so the executor can hand each provider to
/// an independent `tokio::spawn` task (which requires a `'static` owned
/// handle) without unsafe aliasing.
pub type Group = Vec<Arc<dyn Provider>>;

/// The seven-group, dependency-ordered sequence of providers derived from a Config.
pub type Plan = Vec<Group>;

/// Injectable plan-building function, so tests can substitute a stub plan
/// without constructing real providers (spec §4.4, §9).
pub type PlanBuilderFn =
    Arc<dyn Fn(&Config, &Arc<ClientsBundle>, &Logger) -> Plan + Send + Sync>;

/// Build the default plan: group 0 = WAN + networks, group 1 = containers,
/// ingresses, docs; group 2 = clusters; group 3 = helm; group 4 = k8s configs;
/// group 5 reserved and empty; group 6 = local then remote exec.
pub fn build(config: &Config, clients: &Arc<ClientsBundle>, logger: &Logger) -> Plan {
    let mut groups: Plan = (0..GROUP_COUNT).map(|_| Vec::new()).collect();

    groups[0].push(providers::network::new(
        NetworkSpec::wan(),
        Arc::clone(clients),
        logger.child("wan"),
    ));
    for network in &config.networks {
        groups[0].push(providers::network::new(
            network.clone(),
            Arc::clone(clients),
            logger.child(&network.name),
        ));
    }

    for container in &config.containers {
        groups[1].push(providers::container::new(
            container.clone(),
            Arc::clone(clients),
            logger.child(&container.name),
        ));
    }
    for ingress in &config.ingresses {
        groups[1].push(providers::ingress::new(
            ingress.clone(),
            Arc::clone(clients),
            logger.child(&ingress.name),
        ));
    }
    if let Some(docs) = &config.docs {
        groups[1].push(providers::docs::new(
            docs.clone(),
            Arc::clone(clients),
            logger.child("docs"),
        ));
    }

    for cluster in &config.clusters {
        groups[2].push(providers::cluster::new(
            cluster.clone(),
            Arc::clone(clients),
            logger.child(&cluster.name),
        ));
    }

    for helm in &config.helm {
        groups[3].push(providers::helm::new(
            helm.clone(),
            Arc::clone(clients),
            logger.child(&helm.name),
        ));
    }

    for k8s_config in &config.k8s_configs {
        groups[4].push(providers::k8s_config::new(
            k8s_config.clone(),
            Arc::clone(clients),
            logger.child(&k8s_config.name),
        ));
    }

    // Group 5 is reserved and intentionally left empty.

    for local_exec in &config.local_execs {
        groups[6].push(providers::local_exec::new(
            local_exec.clone(),
            Arc::clone(clients),
            logger.child(&local_exec.name),
        ));
    }
    for remote_exec in &config.remote_execs {
        groups[6].push(providers::remote_exec::new(
            remote_exec.clone(),
            Arc::clone(clients),
            logger.child(&remote_exec.name),
        ));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_seven_groups_even_when_empty() {
        let groups: Plan = (0..GROUP_COUNT).map(|_| Vec::new()).collect();
        assert_eq!(groups.len(), 7);
        assert!(groups.iter().all(Vec::is_empty));
    }
}

//! Shared in-memory stub provider and plan-building helpers for the
//! integration test suite. No live Docker daemon or `k3d`/`helm`/`kubectl`
//! binaries are required — this mirrors `engine::plan::build`'s fixed
//! group-assignment schedule but wires in `StubProvider` instead of the
//! real `providers::*` constructors, per spec §9's "Injectable plan builder".

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stagecraft::engine::config::{Config, NetworkSpec};
use stagecraft::engine::plan::{Group, Plan, GROUP_COUNT};
use stagecraft::engine::provider::Provider;
use stagecraft::engine::state::ResourceKind;

/// Tracks every `create`/`destroy` call across a whole test run, so tests
/// can assert ordering (e.g. "container destroyed before network").
#[derive(Default)]
pub struct CallLog {
    pub creates: std::sync::Mutex<Vec<String>>,
    pub destroys: std::sync::Mutex<Vec<String>>,
}

pub struct StubProvider {
    pub name: String,
    pub kind: ResourceKind,
    pub fail_create: bool,
    pub create_delay: Option<Duration>,
    pub log: Option<Arc<CallLog>>,
    pub create_count: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn new(name: &str, kind: ResourceKind) -> Arc<dyn Provider> {
        Arc::new(Self {
            name: name.to_string(),
            kind,
            fail_create: false,
            create_delay: None,
            log: None,
            create_count: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn failing(name: &str, kind: ResourceKind) -> Arc<dyn Provider> {
        Arc::new(Self {
            name: name.to_string(),
            kind,
            fail_create: true,
            create_delay: None,
            log: None,
            create_count: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn logged(name: &str, kind: ResourceKind, log: Arc<CallLog>) -> Arc<dyn Provider> {
        Arc::new(Self {
            name: name.to_string(),
            kind,
            fail_create: false,
            create_delay: None,
            log: Some(log),
            create_count: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Succeeds, but only after `delay` — used to prove a sibling's fast
    /// failure doesn't block on this one.
    pub fn slow(name: &str, kind: ResourceKind, delay: Duration) -> Arc<dyn Provider> {
        Arc::new(Self {
            name: name.to_string(),
            kind,
            fail_create: false,
            create_delay: Some(delay),
            log: None,
            create_count: Arc::new(AtomicUsize::new(0)),
        })
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn create(&self) -> Result<(), String> {
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(log) = &self.log {
            log.creates.lock().unwrap().push(self.name.clone());
        }
        self.create_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(format!("{} failed to create", self.name));
        }
        Ok(())
    }

    async fn destroy(&self) -> Result<(), String> {
        if let Some(log) = &self.log {
            log.destroys.lock().unwrap().push(self.name.clone());
        }
        Ok(())
    }

    fn config(&self) -> ResourceKind {
        self.kind.clone()
    }
}

/// Builds a 7-group plan the same shape `engine::plan::build` would, using
/// `StubProvider` in place of the real Docker/CLI-backed providers.
pub fn stub_plan(config: &Config) -> Plan {
    let mut groups: Plan = (0..GROUP_COUNT).map(|_| Vec::new()).collect();

    groups[0].push(StubProvider::new(
        "wan",
        ResourceKind::Network(NetworkSpec::wan()),
    ));
    for network in &config.networks {
        groups[0].push(StubProvider::new(
            &network.name,
            ResourceKind::Network(network.clone()),
        ));
    }
    for container in &config.containers {
        groups[1].push(StubProvider::new(
            &container.name,
            ResourceKind::Container(container.clone()),
        ));
    }
    for ingress in &config.ingresses {
        groups[1].push(StubProvider::new(
            &ingress.name,
            ResourceKind::Ingress(ingress.clone()),
        ));
    }
    if let Some(docs) = &config.docs {
        groups[1].push(StubProvider::new("docs", ResourceKind::Docs(docs.clone())));
    }
    for cluster in &config.clusters {
        groups[2].push(StubProvider::new(
            &cluster.name,
            ResourceKind::Cluster(cluster.clone()),
        ));
    }
    for helm in &config.helm {
        groups[3].push(StubProvider::new(&helm.name, ResourceKind::Helm(helm.clone())));
    }
    for k8s_config in &config.k8s_configs {
        groups[4].push(StubProvider::new(
            &k8s_config.name,
            ResourceKind::K8sConfig(k8s_config.clone()),
        ));
    }
    for local_exec in &config.local_execs {
        groups[6].push(StubProvider::new(
            &local_exec.name,
            ResourceKind::LocalExec(local_exec.clone()),
        ));
    }
    for remote_exec in &config.remote_execs {
        groups[6].push(StubProvider::new(
            &remote_exec.name,
            ResourceKind::RemoteExec(remote_exec.clone()),
        ));
    }

    groups
}

/// Group lengths only, for comparing plan shapes without needing `Provider`
/// to be introspectable.
pub fn group_shape(plan: &Plan) -> Vec<usize> {
    plan.iter().map(Group::len).collect()
}

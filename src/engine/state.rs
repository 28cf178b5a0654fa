//! Durable, ordered list of wrapped provider configs.
//!
//! Persisted as a tagged-union document: `[{ "Type": "<kind-tag>", "Value": {…} }, …]`.
//! The tag namespace is part of the on-disk contract (spec §6) — readers
//! dispatch on the exact string.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::config::{
    ClusterSpec, Config, ContainerSpec, DocsSpec, HelmSpec, IngressSpec, K8sConfigSpec,
    LocalExecSpec, NetworkSpec, RemoteExecSpec,
};
use super::errors::{EngineError, StateLoadSource};

/// The closed set of resource kinds, tagged with their on-disk discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    /// `config.Network`
    Network(NetworkSpec),
    /// `config.Container`
    Container(ContainerSpec),
    /// `config.Ingress`
    Ingress(IngressSpec),
    /// `config.Docs`
    Docs(DocsSpec),
    /// `config.Cluster`
    Cluster(ClusterSpec),
    /// `config.Helm`
    Helm(HelmSpec),
    /// `config.K8sConfig`
    K8sConfig(K8sConfigSpec),
    /// `config.LocalExec`
    LocalExec(LocalExecSpec),
    /// `config.RemoteExec`
    RemoteExec(RemoteExecSpec),
}

impl ResourceKind {
    /// The exact on-disk tag string for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ResourceKind::Network(_) => "config.Network",
            ResourceKind::Container(_) => "config.Container",
            ResourceKind::Ingress(_) => "config.Ingress",
            ResourceKind::Docs(_) => "config.Docs",
            ResourceKind::Cluster(_) => "config.Cluster",
            ResourceKind::Helm(_) => "config.Helm",
            ResourceKind::K8sConfig(_) => "config.K8sConfig",
            ResourceKind::LocalExec(_) => "config.LocalExec",
            ResourceKind::RemoteExec(_) => "config.RemoteExec",
        }
    }
}

/// A single on-disk record: `{ Type, Value }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEntry {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Value")]
    value: serde_json::Value,
}

/// A state entry as held in memory: the provider snapshot plus its kind tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry(pub ResourceKind);

impl StateEntry {
    fn to_raw(&self) -> Result<RawEntry, serde_json::Error> {
        let (kind, value) = match &self.0 {
            ResourceKind::Network(v) => ("config.Network", serde_json::to_value(v)?),
            ResourceKind::Container(v) => ("config.Container", serde_json::to_value(v)?),
            ResourceKind::Ingress(v) => ("config.Ingress", serde_json::to_value(v)?),
            ResourceKind::Docs(v) => ("config.Docs", serde_json::to_value(v)?),
            ResourceKind::Cluster(v) => ("config.Cluster", serde_json::to_value(v)?),
            ResourceKind::Helm(v) => ("config.Helm", serde_json::to_value(v)?),
            ResourceKind::K8sConfig(v) => ("config.K8sConfig", serde_json::to_value(v)?),
            ResourceKind::LocalExec(v) => ("config.LocalExec", serde_json::to_value(v)?),
            ResourceKind::RemoteExec(v) => ("config.RemoteExec", serde_json::to_value(v)?),
        };
        Ok(RawEntry {
            kind: kind.to_string(),
            value,
        })
    }

    /// Decode a raw record, returning `None` for an unrecognized `Type` tag
    /// (skipped silently for forward compatibility, per spec §4.3).
    fn from_raw(raw: RawEntry) -> Result<Option<Self>, serde_json::Error> {
        let kind = match raw.kind.as_str() {
            "config.Network" => ResourceKind::Network(serde_json::from_value(raw.value)?),
            "config.Container" => ResourceKind::Container(serde_json::from_value(raw.value)?),
            "config.Ingress" => ResourceKind::Ingress(serde_json::from_value(raw.value)?),
            "config.Docs" => ResourceKind::Docs(serde_json::from_value(raw.value)?),
            "config.Cluster" => ResourceKind::Cluster(serde_json::from_value(raw.value)?),
            "config.Helm" => ResourceKind::Helm(serde_json::from_value(raw.value)?),
            "config.K8sConfig" => ResourceKind::K8sConfig(serde_json::from_value(raw.value)?),
            "config.LocalExec" => ResourceKind::LocalExec(serde_json::from_value(raw.value)?),
            "config.RemoteExec" => ResourceKind::RemoteExec(serde_json::from_value(raw.value)?),
            _ => return Ok(None),
        };
        Ok(Some(StateEntry(kind)))
    }
}

/// The state file name under a given state directory.
pub fn default_state_path(dir: &Path) -> PathBuf {
    dir.join("engine-state.json")
}

/// Serialize `entries` and atomically replace the file at `path`.
///
/// Creates the containing directory if absent. A prior file, if any, is
/// removed before writing. Directory-creation errors are tolerated (a
/// subsequent write will recreate it); write errors are reported.
pub fn save(path: &Path, entries: &[StateEntry]) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if path.exists() {
        let _ = std::fs::remove_file(path);
    }

    let raw: Result<Vec<RawEntry>, _> = entries.iter().map(StateEntry::to_raw).collect();
    let raw = raw.map_err(|source| EngineError::StateLoad {
        path: path.to_path_buf(),
        source: StateLoadSource::Decode(source),
    })?;

    let content = serde_json::to_string_pretty(&raw).map_err(|source| EngineError::StateLoad {
        path: path.to_path_buf(),
        source: StateLoadSource::Decode(source),
    })?;

    std::fs::write(path, content).map_err(|source| {
        error!("failed to write state file at {}", path.display());
        EngineError::StatePersist {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!("wrote state file at {}", path.display());
    Ok(())
}

/// Read and decode the state file, skipping unknown `Type` tags.
pub fn load(path: &Path) -> Result<Vec<StateEntry>, EngineError> {
    let content = std::fs::read_to_string(path).map_err(|source| EngineError::StateLoad {
        path: path.to_path_buf(),
        source: StateLoadSource::Io(source),
    })?;

    let raw: Vec<RawEntry> =
        serde_json::from_str(&content).map_err(|source| EngineError::StateLoad {
            path: path.to_path_buf(),
            source: StateLoadSource::Decode(source),
        })?;

    let mut entries = Vec::with_capacity(raw.len());
    for record in raw {
        let decoded = StateEntry::from_raw(record).map_err(|source| EngineError::StateLoad {
            path: path.to_path_buf(),
            source: StateLoadSource::Decode(source),
        })?;
        if let Some(entry) = decoded {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Reconstruct a [`Config`] from a decoded state entry list.
///
/// Networks named `wan` are filtered out; WAN is always re-synthesised by
/// the Engine at construction time rather than reloaded from state.
pub fn config_from_entries(entries: &[StateEntry]) -> Config {
    let mut config = Config::default();
    for entry in entries {
        match &entry.0 {
            ResourceKind::Network(n) => {
                if n.name != "wan" {
                    config.networks.push(n.clone());
                }
            }
            ResourceKind::Container(c) => config.containers.push(c.clone()),
            ResourceKind::Ingress(i) => config.ingresses.push(i.clone()),
            ResourceKind::Docs(d) => config.docs = Some(d.clone()),
            ResourceKind::Cluster(c) => config.clusters.push(c.clone()),
            ResourceKind::Helm(h) => config.helm.push(h.clone()),
            ResourceKind::K8sConfig(k) => config.k8s_configs.push(k.clone()),
            ResourceKind::LocalExec(l) => config.local_execs.push(l.clone()),
            ResourceKind::RemoteExec(r) => config.remote_execs.push(r.clone()),
        }
    }
    config
}

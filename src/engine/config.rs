//! Typed, already-parsed blueprint: the Engine's input model.
//!
//! Blueprint parsing itself is out of scope (spec §1); these records are what
//! a parser (or state reconstruction, see [`crate::engine::state`]) is
//! expected to produce.

use serde::{Deserialize, Serialize};

/// A named L2/L3 segment on the container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Network name, unique within the blueprint.
    pub name: String,
    /// Driver to request from the container runtime (e.g. "bridge").
    #[serde(default)]
    pub driver: Option<String>,
}

impl NetworkSpec {
    /// Build the implicit WAN network record.
    pub fn wan() -> Self {
        Self {
            name: "wan".to_string(),
            driver: None,
        }
    }
}

/// A long-running workload attached to one or more networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Container name, unique within the blueprint.
    pub name: String,
    /// Image reference to run, e.g. "redis:7.2-alpine".
    pub image: String,
    /// Networks this container attaches to, by name.
    #[serde(default)]
    pub networks: Vec<String>,
    /// Environment variables passed to the container.
    #[serde(default)]
    pub environment: Vec<(String, String)>,
    /// Container port to publish on the host, if any.
    #[serde(default)]
    pub published_port: Option<u16>,
}

/// A proxy container routing external traffic to a backend resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressSpec {
    /// Ingress name, unique within the blueprint.
    pub name: String,
    /// Name of the `Container` this ingress routes traffic to.
    pub backend: String,
    /// Image reference for the proxy container.
    pub image: String,
    /// Network the ingress attaches to.
    pub network: String,
}

/// The optional singleton documentation site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsSpec {
    /// Image reference for the docs site container.
    pub image: String,
    /// Network the docs container attaches to.
    pub network: String,
}

/// An ephemeral Kubernetes control plane + worker set on the container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSpec {
    /// Cluster name, unique within the blueprint.
    pub name: String,
    /// Number of worker nodes to bootstrap alongside the control plane.
    #[serde(default)]
    pub workers: u32,
}

/// A Helm release targeting a named `Cluster`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmSpec {
    /// Release name, unique within the blueprint.
    pub name: String,
    /// Name of the `Cluster` this release targets.
    pub cluster: String,
    /// Chart reference, e.g. "bitnami/redis".
    pub chart: String,
    /// Release values, serialized verbatim for `helm --set`.
    #[serde(default)]
    pub values: Vec<(String, String)>,
}

/// A bundle of raw manifests applied to a named `Cluster`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct K8sConfigSpec {
    /// Bundle name, unique within the blueprint.
    pub name: String,
    /// Name of the `Cluster` the manifests are applied to.
    pub cluster: String,
    /// Manifest file paths, applied in order.
    pub manifests: Vec<String>,
}

/// A shell command run on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalExecSpec {
    /// Step name, unique within the blueprint.
    pub name: String,
    /// Command line to run, e.g. `["echo", "hi"]`.
    pub command: Vec<String>,
}

/// A shell command run inside a target container or cluster pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteExecSpec {
    /// Step name, unique within the blueprint.
    pub name: String,
    /// Name of the `Container`/`Ingress`/`Docs` or `Cluster` this runs against.
    pub target: String,
    /// Command line to run inside the target.
    pub command: Vec<String>,
}

/// Blueprint metadata, opaque to the Engine beyond being carried along.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintMeta {
    /// Human-readable blueprint title.
    #[serde(default)]
    pub title: Option<String>,
    /// Blueprint author.
    #[serde(default)]
    pub author: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// The parsed, reference-resolved blueprint the Engine operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Blueprint metadata record; opaque to the Engine.
    #[serde(default)]
    pub meta: BlueprintMeta,
    /// User-declared networks, in blueprint declaration order.
    #[serde(default)]
    pub networks: Vec<NetworkSpec>,
    /// Declared containers, in blueprint declaration order.
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
    /// Declared ingresses, in blueprint declaration order.
    #[serde(default)]
    pub ingresses: Vec<IngressSpec>,
    /// The optional singleton docs site.
    #[serde(default)]
    pub docs: Option<DocsSpec>,
    /// Declared clusters, in blueprint declaration order.
    #[serde(default)]
    pub clusters: Vec<ClusterSpec>,
    /// Declared Helm releases, in blueprint declaration order.
    #[serde(default)]
    pub helm: Vec<HelmSpec>,
    /// Declared raw-manifest bundles, in blueprint declaration order.
    #[serde(default)]
    pub k8s_configs: Vec<K8sConfigSpec>,
    /// Declared local exec steps, in blueprint declaration order.
    #[serde(default)]
    pub local_execs: Vec<LocalExecSpec>,
    /// Declared remote exec steps, in blueprint declaration order.
    #[serde(default)]
    pub remote_execs: Vec<RemoteExecSpec>,
}

impl Config {
    /// Total resources across all kinds, not counting the synthesised WAN.
    pub fn resource_count(&self) -> usize {
        self.networks.len()
            + self.containers.len()
            + self.ingresses.len()
            + usize::from(self.docs.is_some())
            + self.clusters.len()
            + self.helm.len()
            + self.k8s_configs.len()
            + self.local_execs.len()
            + self.remote_execs.len()
    }
}

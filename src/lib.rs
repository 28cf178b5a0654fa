//! # stagecraft
//!
//! A dependency-ordered, parallel lifecycle manager for declarative local dev
//! environments: virtual networks, container workloads, ingress proxies,
//! ephemeral Kubernetes clusters, Helm releases, raw manifest bundles, a docs
//! site, and local/remote exec steps.
//!
//! The crate is organized in two layers:
//!
//! - [`engine`] — the Engine itself: the plan builder, executor, state store,
//!   and the facade that binds them (`Engine::new_from_folder`,
//!   `Engine::new_from_state`, `apply`, `destroy`). This is the core this
//!   crate exists to provide.
//! - [`providers`] — default, subprocess-backed implementations of the
//!   `Provider` contract the Engine consumes, built on the Clients-bundle
//!   layer below.
//!
//! Underneath both sits the Clients bundle: a Docker CLI wrapper (`client`,
//! `container`, `image`, `network`, `types`, `executor`, `errors`) plus a
//! generalized CLI-subprocess client (`engine::clients::CommandClient`) used
//! to shell out to `k3d`, `helm`, and `kubectl`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use stagecraft::engine::blueprint::JsonBlueprintLoader;
//! use stagecraft::engine::clients::ClientsBundle;
//! use stagecraft::engine::logger::Logger;
//! use stagecraft::engine::state::default_state_path;
//! use stagecraft::engine::Engine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clients = Arc::new(ClientsBundle::new().await?);
//!     let state_path = default_state_path(&PathBuf::from(".stagecraft"));
//!
//!     let engine = Engine::new_from_folder(
//!         &PathBuf::from("./blueprint"),
//!         state_path,
//!         Logger::default(),
//!         &JsonBlueprintLoader,
//!         clients,
//!     )
//!     .await?;
//!
//!     engine.apply().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// The Engine: plan builder, executor, state store, and facade.
pub mod engine;

// Default Provider implementations the Engine's plan builder wires in.
pub mod providers;

// Clients-bundle layer: an async, subprocess-backed Docker CLI wrapper.
pub use client::{DockerClient, DockerInfo, DockerVersion};
pub use container::{
    ContainerBuilder, ContainerConfig, ContainerExecutor, ContainerManager, DockerContainer,
    ExecConfig, ExecOutput, ExecResult, RemoveOptions,
};
pub use errors::{DockerError, DockerResult};
pub use image::{ImageManager, ImageRef, PullOptions};
pub use network::{
    ConnectOptions, DisconnectOptions, DockerNetwork, IPAMConfig, ListNetworksOptions,
    NetworkConfig, NetworkContainer, NetworkDriver, NetworkIPAM, NetworkInspect, NetworkManager,
    NetworkPruneResult,
};
pub use types::{ContainerId, ContainerStatus, NetworkId, PortMapping, VolumeMount};

pub mod client;
pub mod container;
pub mod errors;
pub mod executor;
pub mod image;
pub mod network;
pub mod types;

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for Clients-bundle operations whose provider does not
/// specify its own (the container runtime client's timeout is provider-defined).
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

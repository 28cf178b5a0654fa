//! Default Provider implementations for every resource kind.
//!
//! These are intentionally thin (spec §1 marks provider bodies out of
//! scope) — one Docker/CLI call per lifecycle method, just enough to make
//! `Engine::apply`/`Engine::destroy` real rather than purely abstract.

pub mod cluster;
pub mod container;
pub mod docs;
pub mod helm;
pub mod ingress;
pub mod k8s_config;
pub mod local_exec;
pub mod network;
pub mod remote_exec;

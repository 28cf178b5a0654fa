//! The Provider contract the Engine runs against.
//!
//! Providers are an external capability surface (spec §1); the Engine is
//! written only against this trait. Default implementations live under
//! [`crate::providers`].

use async_trait::async_trait;

use super::state::ResourceKind;

/// Creates or destroys one concrete resource instance.
///
/// `Create`/`Destroy` are provider-defined with respect to idempotency; the
/// Engine treats any `Err` from `create` as a failure and observes but never
/// propagates an `Err` from `destroy`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Bring the resource into existence. Any error fails the enclosing group.
    async fn create(&self) -> Result<(), String>;

    /// Tear the resource down. Errors are observed but not propagated.
    async fn destroy(&self) -> Result<(), String>;

    /// The persistable snapshot appended to state after a successful `create`.
    fn config(&self) -> ResourceKind;
}

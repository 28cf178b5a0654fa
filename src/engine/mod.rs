//! The Engine facade: binds config, plan, state, and the executor together.
//!
//! Two construction modes — from a blueprint folder, or from a previously
//! saved state file — both build the plan exactly once, before returning.

pub mod blueprint;
pub mod clients;
pub mod config;
pub mod errors;
pub mod executor;
pub mod logger;
pub mod plan;
pub mod provider;
pub mod state;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use blueprint::BlueprintLoader;
use clients::ClientsBundle;
use config::{BlueprintMeta, Config};
use errors::EngineError;
use executor::SharedState;
use logger::Logger;
use plan::{Plan, PlanBuilderFn};
use state::StateEntry;

/// Dependency-ordered, parallel resource lifecycle manager.
///
/// Built once per blueprint or state file; `apply`/`destroy` are not safe to
/// call concurrently on the same instance, and this is not enforced (spec §5).
pub struct Engine {
    config: Config,
    plan: Plan,
    state: SharedState,
    state_path: PathBuf,
    logger: Logger,
}

impl Engine {
    /// Build an Engine from a blueprint directory: parse the folder into a
    /// `Config`, build the plan, and return. Surfaces parse/reference errors
    /// rather than discarding them.
    pub async fn new_from_folder(
        path: &Path,
        state_path: PathBuf,
        logger: Logger,
        loader: &dyn BlueprintLoader,
        clients: Arc<ClientsBundle>,
    ) -> Result<Self, EngineError> {
        let config = loader.load(path)?;
        Self::from_config(config, state_path, logger, plan::build, clients).await
    }

    /// Build an Engine from a previously saved state file: reconstruct a
    /// `Config` from state (WAN re-synthesised, `wan`-named entries dropped),
    /// re-resolve references, and build the plan.
    pub async fn new_from_state(
        state_path: PathBuf,
        logger: Logger,
        clients: Arc<ClientsBundle>,
    ) -> Result<Self, EngineError> {
        let entries = state::load(&state_path)?;
        let config = state::config_from_entries(&entries);
        Self::from_config(config, state_path, logger, plan::build, clients).await
    }

    /// Build an Engine from a previously saved state file, substituting a
    /// stub plan-building function in place of the default `plan::build` —
    /// tests use this to avoid constructing real providers, and therefore a
    /// real `ClientsBundle` (spec §4.4, §9's "Injectable plan builder").
    pub fn from_state_with_plan(
        state_path: PathBuf,
        logger: Logger,
        plan_fn: impl Fn(&Config) -> Plan,
    ) -> Result<Self, EngineError> {
        let entries = state::load(&state_path)?;
        let config = state::config_from_entries(&entries);
        let plan = plan_fn(&config);
        Ok(Self::from_parts(config, plan, state_path, logger))
    }

    async fn from_config(
        config: Config,
        state_path: PathBuf,
        logger: Logger,
        builder: impl Fn(&Config, &Arc<ClientsBundle>, &Logger) -> Plan,
        clients: Arc<ClientsBundle>,
    ) -> Result<Self, EngineError> {
        let plan = builder(&config, &clients, &logger);
        Ok(Self::from_parts(config, plan, state_path, logger))
    }

    /// Build an Engine directly from an already-built `Config` and `Plan`,
    /// with no `ClientsBundle` involved at all. Tests use this to exercise
    /// the executor/state-store semantics against in-memory stub providers,
    /// without a live Docker daemon or `k3d`/`helm`/`kubectl` binaries (spec
    /// §9's "Injectable plan builder" design note).
    pub fn from_parts(config: Config, plan: Plan, state_path: PathBuf, logger: Logger) -> Self {
        Self {
            config,
            plan,
            state: Arc::new(Mutex::new(Vec::new())),
            state_path,
            logger,
        }
    }

    /// Sequentially create groups 0..6, persist state at the end regardless
    /// of outcome, and return the first error encountered (or `Ok`).
    pub async fn apply(&self) -> Result<(), EngineError> {
        let mut first_error = None;
        for group in &self.plan {
            if let Err(e) = executor::create_group(group, &self.state).await {
                first_error = Some(e);
                break;
            }
        }

        let entries: Vec<StateEntry> = self.state.lock().await.clone();
        let save_result = state::save(&self.state_path, &entries);
        match &save_result {
            Ok(()) => self
                .logger
                .info(&format!("wrote state file at {}", self.state_path.display())),
            Err(e) => self.logger.error(&format!("failed to write state file: {e}")),
        }

        match (first_error, save_result) {
            (Some(apply_err), _) => Err(apply_err),
            (None, Err(persist_err)) => Err(persist_err),
            (None, Ok(())) => Ok(()),
        }
    }

    /// Sequentially destroy groups 6..0. Individual provider errors are
    /// absorbed; this always returns `Ok`.
    pub async fn destroy(&self) {
        for group in self.plan.iter().rev() {
            executor::destroy_group(group).await;
        }
    }

    /// Total resources in Config across all kinds, not counting the
    /// synthesised WAN.
    pub fn resource_count(&self) -> usize {
        self.config.resource_count()
    }

    /// The blueprint metadata record attached to Config; opaque to the Engine.
    pub fn blueprint(&self) -> &BlueprintMeta {
        &self.config.meta
    }

    /// The Config this Engine was constructed from, for inspection/tests.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The plan this Engine built at construction, for inspection/tests.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }
}

/// Build a `PlanBuilderFn` trait object from a plain function, for callers
/// that want to store the default builder alongside an injected stub.
pub fn default_plan_builder() -> PlanBuilderFn {
    Arc::new(plan::build)
}

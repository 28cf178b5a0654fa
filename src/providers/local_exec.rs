//! Default `LocalExec` provider: runs a shell command on the host via
//! [`crate::engine::clients::CommandClient`]. Destroy is a no-op — a
//! one-shot command has nothing to tear down.

use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::clients::ClientsBundle;
use crate::engine::config::LocalExecSpec;
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;

struct LocalExecProvider {
    spec: LocalExecSpec,
    clients: Arc<ClientsBundle>,
    logger: Logger,
}

#[async_trait]
impl Provider for LocalExecProvider {
    async fn create(&self) -> Result<(), String> {
        self.clients.shell.run(&self.spec.command).await?;
        self.logger.info(&format!("ran local command {}", self.spec.name));
        Ok(())
    }

    async fn destroy(&self) -> Result<(), String> {
        Ok(())
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::LocalExec(self.spec.clone())
    }
}

/// Build the default `LocalExec` provider for `spec`.
pub fn new(spec: LocalExecSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    Arc::new(LocalExecProvider {
        spec,
        clients,
        logger,
    })
}

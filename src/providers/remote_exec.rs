//! Default `RemoteExec` provider: runs a command inside a target container
//! via [`crate::container::exec::ContainerExecutor`] when the target resolves
//! to a running container, falling back to `kubectl exec` through
//! [`crate::engine::clients::CommandClient`] when it doesn't (a cluster pod
//! target). Destroy is a no-op, matching `LocalExec`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::container::exec::ContainerExecutor;
use crate::engine::clients::ClientsBundle;
use crate::engine::config::RemoteExecSpec;
use crate::engine::logger::Logger;
use crate::engine::provider::Provider;
use crate::engine::state::ResourceKind;
use crate::types::ContainerId;

struct RemoteExecProvider {
    spec: RemoteExecSpec,
    clients: Arc<ClientsBundle>,
    logger: Logger,
}

#[async_trait]
impl Provider for RemoteExecProvider {
    async fn create(&self) -> Result<(), String> {
        let id = ContainerId::new_unchecked(self.spec.target.clone());
        let executor = ContainerExecutor::new(&self.clients.docker);
        match executor.exec_simple(&id, self.spec.command.clone()).await {
            Ok(_) => {
                self.logger
                    .info(&format!("ran remote command {} in container", self.spec.name));
                Ok(())
            }
            Err(_) => {
                let mut args = vec!["exec".to_string(), self.spec.target.clone(), "--".to_string()];
                args.extend(self.spec.command.clone());
                self.clients.kubectl.run(&args).await?;
                self.logger
                    .info(&format!("ran remote command {} in pod", self.spec.name));
                Ok(())
            }
        }
    }

    async fn destroy(&self) -> Result<(), String> {
        Ok(())
    }

    fn config(&self) -> ResourceKind {
        ResourceKind::RemoteExec(self.spec.clone())
    }
}

/// Build the default `RemoteExec` provider for `spec`.
pub fn new(spec: RemoteExecSpec, clients: Arc<ClientsBundle>, logger: Logger) -> Arc<dyn Provider> {
    Arc::new(RemoteExecProvider {
        spec,
        clients,
        logger,
    })
}

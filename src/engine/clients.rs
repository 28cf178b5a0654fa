//! Typed handles to external subsystems, constructed once and passed to
//! providers by reference.
//!
//! `CommandClient` generalizes the teacher's [`crate::executor::ProcessExecutor`]
//! (same timeout/capture-stdout/capture-stderr shape) to an arbitrary binary,
//! so the same idiom used to shell out to `docker` also covers `k3d`, `helm`,
//! and `kubectl` — wrapping a CLI as a subprocess rather than binding its API.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::executor::CommandOutput;

/// Executes an arbitrary binary as a subprocess with a fixed timeout.
///
/// Mirrors [`crate::executor::ProcessExecutor`]'s execute/timeout/capture
/// shape, generalized past `docker` specifically.
#[derive(Debug, Clone)]
pub struct CommandClient {
    binary: PathBuf,
    timeout: Duration,
}

impl CommandClient {
    /// Build a client that invokes `binary`, bounding every call to `timeout`.
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Locate `name` on `PATH` and build a client for it with the given timeout.
    pub fn find(name: &str, timeout: Duration) -> Result<Self, String> {
        let path = which::which(name).map_err(|e| format!("{name} not found on PATH: {e}"))?;
        Ok(Self::new(path, timeout))
    }

    /// Run the command with the given arguments, capturing stdout/stderr.
    pub async fn run(&self, args: &[String]) -> Result<CommandOutput, String> {
        let command_str = format!("{} {}", self.binary.display(), args.join(" "));
        debug!("executing command: {}", command_str);

        let mut command = Command::new(&self.binary);
        command.args(args);
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| format!("failed to spawn {command_str}: {e}"))?;

        let stdout = child.stdout.take().unwrap();
        let stderr = child.stderr.take().unwrap();

        let wait = async {
            let stdout_task = tokio::spawn(read_lines(stdout));
            let stderr_task = tokio::spawn(read_lines(stderr));
            let status = child
                .wait()
                .await
                .map_err(|e| format!("failed to wait on {command_str}: {e}"))?;
            let stdout = stdout_task.await.unwrap_or_default();
            let stderr = stderr_task.await.unwrap_or_default();
            Ok::<_, String>((status.code().unwrap_or(-1), stdout, stderr))
        };

        let (exit_code, stdout, stderr) = match timeout(self.timeout, wait).await {
            Ok(result) => result?,
            Err(_) => return Err(format!("command timed out: {command_str}")),
        };

        let output = CommandOutput::new(exit_code, stdout, stderr);
        if !output.success {
            return Err(format!(
                "command failed ({}): {}",
                output.exit_code,
                output.combined_output()
            ));
        }
        Ok(output)
    }
}

async fn read_lines<R: tokio::io::AsyncRead + Unpin>(reader: R) -> String {
    let mut out = String::new();
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line);
    }
    out
}

/// Every handle a default provider may need, constructed once per Engine.
pub struct ClientsBundle {
    /// Docker (or compatible) container runtime client, teacher-provided.
    pub docker: crate::client::DockerClient,
    /// `k3d` client for ephemeral cluster lifecycle.
    pub k3d: CommandClient,
    /// `helm` client for releases.
    pub helm: CommandClient,
    /// `kubectl` client for raw manifests and remote exec against pods.
    pub kubectl: CommandClient,
    /// Host shell client for `LocalExec` steps.
    pub shell: CommandClient,
}

impl ClientsBundle {
    /// Build the default bundle, fixing the timeouts the Engine contracts for:
    /// 60s Kubernetes-tool clients, 30s command client, and the container
    /// runtime's own provider-defined timeout.
    pub async fn new() -> Result<Self, String> {
        let docker = crate::client::DockerClient::new()
            .await
            .map_err(|e| e.to_string())?;

        let k8s_timeout = Duration::from_secs(60);
        let command_timeout = Duration::from_secs(30);

        Ok(Self {
            docker,
            k3d: CommandClient::find("k3d", k8s_timeout)?,
            helm: CommandClient::find("helm", k8s_timeout)?,
            kubectl: CommandClient::find("kubectl", k8s_timeout)?,
            shell: CommandClient::new(default_shell(), command_timeout),
        })
    }
}

fn default_shell() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("cmd")
    } else {
        PathBuf::from("/bin/sh")
    }
}

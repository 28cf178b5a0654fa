//! Docker image management module.
//!
//! This module provides the minimal image lifecycle operations the Engine's
//! `Container`, `Ingress`, and `Docs` providers need before they can create a
//! container: parsing an image reference and pulling it if it is not already
//! present locally.
//!
//! # Example
//!
//! ```rust,no_run
//! use stagecraft::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DockerError> {
//!     let client = DockerClient::new().await?;
//!     let image_manager = client.images();
//!
//!     let image_ref = ImageRef::parse("redis:7.2-alpine")?;
//!     image_manager.pull(&image_ref, PullOptions::default()).await?;
//!
//!     Ok(())
//! }
//! ```

use crate::client::DockerClient;
use crate::errors::{DockerError, DockerResult};
use crate::executor::ExecutionConfig;

/// Docker image reference with full parsing support
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    /// Registry hostname (e.g., "docker.io", "localhost:5000")
    pub registry: Option<String>,
    /// Namespace/organization (e.g., "library", "myorg")
    pub namespace: Option<String>,
    /// Repository name (e.g., "redis", "nginx")
    pub repository: String,
    /// Tag or digest (e.g., "latest", "7.2-alpine", "sha256:abc123...")
    pub tag: String,
}

impl ImageRef {
    /// Create a simple image reference with repository and tag
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            registry: None,
            namespace: None,
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    /// Parse a full image reference string
    ///
    /// Supports formats like:
    /// - `redis:7.2`
    /// - `docker.io/library/redis:7.2`
    /// - `localhost:5000/myapp:latest`
    /// - `redis@sha256:abc123...`
    pub fn parse(image_ref: &str) -> DockerResult<Self> {
        let mut parts = image_ref.splitn(2, '@');
        let image_part = parts.next().unwrap();
        let digest = parts.next();

        if let Some(digest) = digest {
            let tag = format!("@{}", digest);
            return Self::parse_image_part(image_part, tag);
        }

        let mut parts = image_part.rsplitn(2, ':');
        let tag = parts.next().unwrap_or("latest");
        let image_part = parts.next().unwrap_or(image_part);

        Self::parse_image_part(image_part, tag.to_string())
    }

    fn parse_image_part(image_part: &str, tag: String) -> DockerResult<Self> {
        let parts: Vec<&str> = image_part.split('/').collect();

        match parts.len() {
            1 => Ok(Self {
                registry: None,
                namespace: None,
                repository: parts[0].to_string(),
                tag,
            }),
            2 => {
                if parts[0].contains('.') || parts[0].contains(':') {
                    Ok(Self {
                        registry: Some(parts[0].to_string()),
                        namespace: None,
                        repository: parts[1].to_string(),
                        tag,
                    })
                } else {
                    Ok(Self {
                        registry: None,
                        namespace: Some(parts[0].to_string()),
                        repository: parts[1].to_string(),
                        tag,
                    })
                }
            }
            3 => Ok(Self {
                registry: Some(parts[0].to_string()),
                namespace: Some(parts[1].to_string()),
                repository: parts[2].to_string(),
                tag,
            }),
            _ => Err(DockerError::invalid_image_ref(image_part)),
        }
    }

    /// Get the repository part without registry/namespace
    pub fn repository_name(&self) -> &str {
        &self.repository
    }

    /// Get the tag part
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Check if this is a digest reference (starts with `@`)
    pub fn is_digest(&self) -> bool {
        self.tag.starts_with('@')
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut result = String::new();
        if let Some(registry) = &self.registry {
            result.push_str(registry);
            result.push('/');
        }
        if let Some(namespace) = &self.namespace {
            result.push_str(namespace);
            result.push('/');
        }
        result.push_str(&self.repository);
        result.push(':');
        result.push_str(&self.tag);
        write!(f, "{result}")
    }
}

/// Options controlling an image pull
#[derive(Debug, Clone, Default)]
pub struct PullOptions {
    /// Pull every tag of the repository
    pub all_tags: bool,
    /// Restrict the pull to a specific platform (e.g. "linux/amd64")
    pub platform: Option<String>,
}

impl PullOptions {
    /// Create default pull options
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the pull to a specific platform
    #[must_use]
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// Image manager providing the pull/existence operations providers need
pub struct ImageManager<'a> {
    client: &'a DockerClient,
}

impl<'a> ImageManager<'a> {
    /// Create a new image manager
    pub fn new(client: &'a DockerClient) -> Self {
        Self { client }
    }

    /// Pull an image from a registry
    pub async fn pull(&self, image_ref: &ImageRef, options: PullOptions) -> DockerResult<()> {
        let mut args = vec!["pull".to_string()];

        if options.all_tags {
            args.push("--all-tags".to_string());
        }

        if let Some(platform) = &options.platform {
            args.push("--platform".to_string());
            args.push(platform.clone());
        }

        args.push(image_ref.to_string());

        let output = self
            .client
            .executor()
            .execute(&args, Some(ExecutionConfig::default()))
            .await?;

        if !output.success {
            return Err(DockerError::CommandFailed {
                command: format!("docker {}", args.join(" ")),
                exit_code: output.exit_code,
                stdout: output.stdout.clone(),
                stderr: output.stderr.clone(),
            });
        }

        Ok(())
    }

    /// Check whether an image is already present locally
    pub async fn exists(&self, image_ref: &ImageRef) -> DockerResult<bool> {
        let args = vec!["image".to_string(), "inspect".to_string(), image_ref.to_string()];
        let output = self
            .client
            .executor()
            .execute(&args, Some(ExecutionConfig::default()))
            .await?;
        Ok(output.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_reference() {
        let image_ref = ImageRef::parse("redis:7.2").unwrap();
        assert_eq!(image_ref.repository, "redis");
        assert_eq!(image_ref.tag, "7.2");
        assert_eq!(image_ref.registry, None);
    }

    #[test]
    fn parses_namespaced_reference() {
        let image_ref = ImageRef::parse("library/redis:7.2").unwrap();
        assert_eq!(image_ref.namespace, Some("library".to_string()));
        assert_eq!(image_ref.repository, "redis");
    }

    #[test]
    fn parses_registry_reference() {
        let image_ref = ImageRef::parse("docker.io/library/redis:7.2").unwrap();
        assert_eq!(image_ref.registry, Some("docker.io".to_string()));
        assert_eq!(image_ref.namespace, Some("library".to_string()));
    }

    #[test]
    fn parses_digest_reference() {
        let image_ref = ImageRef::parse("redis@sha256:abc123def456").unwrap();
        assert!(image_ref.is_digest());
    }

    #[test]
    fn defaults_missing_tag_to_latest() {
        let image_ref = ImageRef::parse("redis").unwrap();
        assert_eq!(image_ref.tag, "latest");
    }

    #[test]
    fn display_round_trips_simple_reference() {
        let image_ref = ImageRef::new("redis", "7.2-alpine");
        assert_eq!(image_ref.to_string(), "redis:7.2-alpine");
    }
}

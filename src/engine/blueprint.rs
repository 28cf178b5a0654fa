//! Blueprint folder loading.
//!
//! Full HCL-style parsing and reference resolution are out of scope (spec
//! §1); this module supplies an injectable `BlueprintLoader` so
//! `NewFromFolder` is usable without pretending to implement that parser.
//! The default loader reads a single `blueprint.json` describing the `Config`.

use std::path::Path;

use super::config::Config;
use super::errors::EngineError;

/// Reads a blueprint folder and produces a resolved [`Config`].
pub trait BlueprintLoader: Send + Sync {
    /// Parse the blueprint at `path` into a `Config`.
    fn load(&self, path: &Path) -> Result<Config, EngineError>;
}

/// Default loader: reads `<path>/blueprint.json` as a serialized [`Config`].
#[derive(Debug, Clone, Default)]
pub struct JsonBlueprintLoader;

impl BlueprintLoader for JsonBlueprintLoader {
    fn load(&self, path: &Path) -> Result<Config, EngineError> {
        let file = path.join("blueprint.json");
        let content = std::fs::read_to_string(&file)
            .map_err(|e| EngineError::Config(format!("reading {}: {e}", file.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| EngineError::Config(format!("parsing {}: {e}", file.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::NetworkSpec;

    #[test]
    fn loads_a_minimal_blueprint() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            networks: vec![NetworkSpec {
                name: "net-a".to_string(),
                driver: None,
            }],
            ..Default::default()
        };
        std::fs::write(
            dir.path().join("blueprint.json"),
            serde_json::to_string(&config).unwrap(),
        )
        .unwrap();

        let loaded = JsonBlueprintLoader.load(dir.path()).unwrap();
        assert_eq!(loaded.networks.len(), 1);
        assert_eq!(loaded.networks[0].name, "net-a");
    }

    #[test]
    fn surfaces_missing_file_as_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonBlueprintLoader.load(dir.path());
        assert!(result.is_err());
    }
}

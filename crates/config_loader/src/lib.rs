//! # Config Loader
//!
//! Reads an adapter configuration file into an [`AdapterBlueprint`].
//!
//! TOML and JSON are accepted; the format follows the file extension.
//! Every blueprint handed out has passed validation.
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("adapter.toml")).unwrap();
//! println!("Adapter: {}", blueprint.adapter.name);
//! ```

mod parser;
mod validator;

pub use contracts::AdapterBlueprint;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Entry point for loading and writing adapter configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read, parse and validate the file at `path`
    pub fn load_from_path(path: &Path) -> Result<AdapterBlueprint, ContractError> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                ContractError::config_parse(format!(
                    "{}: cannot determine file format from extension",
                    path.display()
                ))
            })
            .and_then(|ext| {
                ConfigFormat::from_extension(ext).ok_or_else(|| {
                    ContractError::config_parse(format!("unsupported config format: .{ext}"))
                })
            })?;

        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content, format)
    }

    /// Parse and validate in-memory content
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AdapterBlueprint, ContractError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    pub fn to_toml(blueprint: &AdapterBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    pub fn to_json(blueprint: &AdapterBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
[adapter]
name = "tilganger-adapter"

[verification]
supported_actions = ["GET_ALL_IDENTITET"]
org_ids = ["pwf.no"]

[[outputs]]
name = "log"
output_type = "log"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.adapter.name, "tilganger-adapter");
    }

    #[test]
    fn test_round_trip_toml() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(bp.adapter.name, bp2.adapter.name);
        assert_eq!(bp.outputs.len(), bp2.outputs.len());
        assert_eq!(
            bp.verification.supported_actions,
            bp2.verification.supported_actions
        );
    }

    #[test]
    fn test_round_trip_json() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(bp.verification.org_ids, bp2.verification.org_ids);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[adapter]
name = "tilganger-adapter"

[[outputs]]
name = "log"
output_type = "log"

[[outputs]]
name = "log"
output_type = "file"
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn test_only_log_and_file_outputs() {
        let content = r#"
[adapter]
name = "tilganger-adapter"

[[outputs]]
name = "udp"
output_type = "network"
"#;
        let err = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap_err();
        assert!(err.to_string().contains("network"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ConfigLoader::load_from_path(Path::new("adapter.yaml")).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }
}

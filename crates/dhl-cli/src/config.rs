//! CLI configuration file

use anyhow::{Context, Result};
use dhl_mapping::MapperConfig;
use dhl_model::ShipperAddressOverride;
use serde::Deserialize;
use std::path::Path;

/// Contents of the `--config` YAML file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub mapper: MapperConfig,
    pub shipper_override: Option<ShipperAddressOverride>,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&yaml)
            .with_context(|| format!("parse config {}", path.display()))?;
        tracing::debug!(
            native_address_countries = ?config.mapper.native_address_countries,
            has_override = config.shipper_override.is_some(),
            "Loaded configuration from {}",
            path.display()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_path_gives_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.mapper, MapperConfig::default());
        assert!(config.shipper_override.is_none());
    }

    #[test]
    fn test_load_both_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "mapper:\n  native_address_countries: [AT]\nshipper_override:\n  City: Climthorpe"
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert!(config.mapper.uses_native_address(Some("AT")));
        assert!(!config.mapper.uses_native_address(Some("DE")));
        assert_eq!(
            config.shipper_override.unwrap().city.as_deref(),
            Some("Climthorpe")
        );
    }
}

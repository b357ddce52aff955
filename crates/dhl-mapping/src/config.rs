//! Mapper configuration

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings that stay fixed across mapping calls
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Destination countries that get the native structured receiver address
    pub native_address_countries: Vec<String>,

    /// Product code used when the carrier extra payload has none
    pub default_product: Option<String>,

    /// Billing number used when the carrier extra payload has none
    pub default_account_number: Option<String>,

    /// Shipper data stored with the carrier account, sent instead of an
    /// inline shipper block
    pub shipper_reference: Option<String>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            native_address_countries: vec!["DE".to_string()],
            default_product: None,
            default_account_number: None,
            shipper_reference: None,
        }
    }
}

impl MapperConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML configuration document
    ///
    /// # Errors
    ///
    /// Returns an error when the document is not valid configuration YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read a YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&yaml)
    }

    /// Set the native address countries
    #[must_use]
    pub fn native_address_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.native_address_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Set the shipper reference
    #[must_use]
    pub fn shipper_reference(mut self, reference: impl Into<String>) -> Self {
        self.shipper_reference = Some(reference.into());
        self
    }

    /// Set fallback product and billing number
    #[must_use]
    pub fn defaults(
        mut self,
        product: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        self.default_product = Some(product.into());
        self.default_account_number = Some(account_number.into());
        self
    }

    /// Whether receivers in `country` get the native address variant.
    ///
    /// Comparison is ASCII case-insensitive; an unknown country never does.
    #[must_use]
    pub fn uses_native_address(&self, country: Option<&str>) -> bool {
        country.is_some_and(|country| {
            self.native_address_countries
                .iter()
                .any(|native| native.trim().eq_ignore_ascii_case(country))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MapperConfig::default();
        assert_eq!(config.native_address_countries, vec!["DE"]);
        assert!(config.shipper_reference.is_none());
        assert!(config.uses_native_address(Some("DE")));
        assert!(config.uses_native_address(Some("de")));
        assert!(!config.uses_native_address(Some("FR")));
        assert!(!config.uses_native_address(None));
    }

    #[test]
    fn test_yaml_config_with_partial_fields() {
        let config = MapperConfig::from_yaml_str(
            "native_address_countries: [DE, AT]\ndefault_product: V01PAK\n",
        )
        .unwrap();
        assert!(config.uses_native_address(Some("AT")));
        assert_eq!(config.default_product.as_deref(), Some("V01PAK"));
        assert!(config.default_account_number.is_none());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = MapperConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, MapperConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = MapperConfig::from_yaml_str("native_address_countries: 7").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file() -> anyhow::Result<()> {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "shipper_reference: SHIPPER-1")?;

        let config = MapperConfig::from_file(file.path())?;
        assert_eq!(config.shipper_reference.as_deref(), Some("SHIPPER-1"));
        assert_eq!(config.native_address_countries, vec!["DE"]);

        let missing = MapperConfig::from_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(Error::Io(_))));
        Ok(())
    }

    #[test]
    fn test_builder_methods() {
        let config = MapperConfig::new()
            .native_address_countries(["AT"])
            .shipper_reference("SHIPPER-1")
            .defaults("V01PAK", "22222222220101");
        assert!(!config.uses_native_address(Some("DE")));
        assert_eq!(config.shipper_reference.as_deref(), Some("SHIPPER-1"));
        assert_eq!(config.default_account_number.as_deref(), Some("22222222220101"));
    }
}

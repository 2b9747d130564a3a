//! Collection configuration file parsing

use crate::io::error::{GenerationError, Result, WithContext};
use crate::io::metadata::MetadataTemplate;
use crate::model::attribute::Attribute;
use crate::model::config::CollectionConfig;
use crate::model::rule::ExclusionRule;
use serde::Deserialize;
use std::path::Path;

/// On-disk shape of the configuration document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Number of members to generate
    pub supply: usize,
    /// Attributes that must differ from every earlier member
    #[serde(default)]
    pub min_unique_attributes: usize,
    /// Attributes in layering order
    pub attributes: Vec<Attribute>,
    /// Exclusion rules as lists of `attribute/variant` or `attribute/!variant` keys
    #[serde(default)]
    pub avoid_combinations: Vec<Vec<String>>,
    /// Fields copied into every metadata document
    #[serde(default)]
    pub metadata: MetadataTemplate,
}

/// Parsed and validated configuration ready for generation
#[derive(Clone, Debug)]
pub struct LoadedConfig {
    /// Generation parameters
    pub collection: CollectionConfig,
    /// Metadata document template
    pub metadata: MetadataTemplate,
}

impl ConfigFile {
    /// Resolve rule keys and validate the whole configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any rule or attribute is invalid
    pub fn into_loaded(self) -> Result<LoadedConfig> {
        let exclusion_rules = self
            .avoid_combinations
            .iter()
            .map(|keys| ExclusionRule::parse(keys.as_slice(), &self.attributes))
            .collect::<Result<Vec<_>>>()?;

        let collection = CollectionConfig::new(
            self.supply,
            self.min_unique_attributes,
            self.attributes,
            exclusion_rules,
        )?;

        Ok(LoadedConfig {
            collection,
            metadata: self.metadata,
        })
    }
}

/// Parse a configuration from JSON text
///
/// # Errors
///
/// Returns an error if the document is malformed or fails validation
pub fn parse_config(json: &str, origin: &Path) -> Result<LoadedConfig> {
    let file: ConfigFile =
        serde_json::from_str(json).map_err(|source| GenerationError::ConfigLoad {
            path: origin.to_path_buf(),
            source,
        })?;
    file.into_loaded()
}

/// Read, parse and validate a configuration file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The document is malformed JSON or misses required fields
/// - The configuration fails validation
pub fn load_config(path: &Path) -> Result<LoadedConfig> {
    let json = std::fs::read_to_string(path).with_path("read config", path)?;
    parse_config(&json, path)
}

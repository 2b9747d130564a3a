//! Per-member metadata documents

use crate::io::configuration::IMAGE_EXTENSION;
use crate::io::error::{GenerationError, Result, WithContext};
use crate::model::attribute::Attribute;
use crate::model::member::Member;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Collection-wide fields copied into every metadata document
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataTemplate {
    /// Member name prefix, followed by ` #<id>`
    pub name_prefix: String,
    /// Collection symbol
    pub symbol: String,
    /// Collection description
    pub description: String,
    /// Secondary sale royalty in basis points
    pub seller_fee_basis_points: u32,
    /// Project URL
    pub external_url: String,
}

impl Default for MetadataTemplate {
    fn default() -> Self {
        Self {
            name_prefix: "Collection".to_string(),
            symbol: String::new(),
            description: String::new(),
            seller_fee_basis_points: 0,
            external_url: String::new(),
        }
    }
}

/// One `trait_type`/`value` pair
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TraitEntry {
    /// Attribute name
    pub trait_type: String,
    /// Variant name
    pub value: String,
}

/// Metadata document written for each member
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Display name
    pub name: String,
    /// Collection symbol
    pub symbol: String,
    /// Collection description
    pub description: String,
    /// Secondary sale royalty in basis points
    pub seller_fee_basis_points: u32,
    /// Project URL
    pub external_url: String,
    /// Composite image file name
    pub image: String,
    /// Traits in attribute order
    pub attributes: Vec<TraitEntry>,
}

impl TokenMetadata {
    /// Build the document for member `id`
    pub fn for_member(
        id: usize,
        member: &Member,
        attributes: &[Attribute],
        template: &MetadataTemplate,
    ) -> Self {
        let traits = member
            .keys()
            .iter()
            .filter_map(|key| {
                let attribute = attributes.get(key.attribute)?;
                let variant = attribute.variant(key.variant)?;
                Some(TraitEntry {
                    trait_type: attribute.name.clone(),
                    value: variant.name.clone(),
                })
            })
            .collect();

        Self {
            name: format!("{} #{id}", template.name_prefix),
            symbol: template.symbol.clone(),
            description: template.description.clone(),
            seller_fee_basis_points: template.seller_fee_basis_points,
            external_url: template.external_url.clone(),
            image: format!("{id}.{IMAGE_EXTENSION}"),
            attributes: traits,
        }
    }
}

/// Serialize a metadata document to `path`
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails
pub fn write_metadata(path: &Path, metadata: &TokenMetadata) -> Result<()> {
    let file = std::fs::File::create(path).with_path("create metadata", path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer(writer, metadata).map_err(|source| GenerationError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

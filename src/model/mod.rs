//! Collection data model shared by the generator and the output writers

/// Attributes, variants and composite variant keys
pub mod attribute;
/// Validated collection configuration
pub mod config;
/// Assembled members and the final collection
pub mod member;
/// Exclusion rules with plain and negated keys
pub mod rule;

pub use attribute::{Attribute, Variant, VariantKey};
pub use config::CollectionConfig;
pub use member::{Collection, Member};
pub use rule::{ExclusionRule, RuleKey};

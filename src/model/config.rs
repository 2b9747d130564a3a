//! Validated collection configuration consumed by the generator

use crate::io::error::{Result, configuration_error};
use crate::model::attribute::{Attribute, VariantKey};
use crate::model::rule::{ExclusionRule, KEY_SEPARATOR, NEGATION_MARKER};
use std::collections::HashSet;

/// Required sum of allocation percentages within one attribute
pub const FULL_ALLOCATION: u32 = 100;

/// Collection parameters that passed validation
///
/// Can only be built through [`CollectionConfig::new`], so holders may rely on
/// every invariant checked there.
#[derive(Clone, Debug)]
pub struct CollectionConfig {
    supply: usize,
    min_unique_attributes: usize,
    attributes: Vec<Attribute>,
    exclusion_rules: Vec<ExclusionRule>,
}

impl CollectionConfig {
    /// Validate and assemble a configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - `supply` is zero or no attributes are declared
    /// - A variant allocates more than 100% or an attribute's percentages do not sum to exactly 100
    /// - Names are empty, duplicated, or contain reserved characters
    /// - `min_unique_attributes` exceeds the number of attributes
    /// - An exclusion rule points outside the attributes or gates an attribute it matches on
    pub fn new(
        supply: usize,
        min_unique_attributes: usize,
        attributes: Vec<Attribute>,
        exclusion_rules: Vec<ExclusionRule>,
    ) -> Result<Self> {
        if supply == 0 {
            return Err(configuration_error("supply must be greater than zero"));
        }
        if attributes.is_empty() {
            return Err(configuration_error("at least one attribute is required"));
        }
        if min_unique_attributes > attributes.len() {
            return Err(configuration_error(format!(
                "minUniqueAttributes ({min_unique_attributes}) exceeds the number of attributes ({})",
                attributes.len()
            )));
        }

        validate_attributes(&attributes)?;

        for rule in &exclusion_rules {
            let in_range = rule.keys().iter().all(|k| {
                attributes
                    .get(k.key.attribute)
                    .and_then(|a| a.variant(k.key.variant))
                    .is_some()
            });
            if !in_range {
                return Err(configuration_error(
                    "exclusion rule references a variant outside the attribute list",
                ));
            }
            if rule.gates_own_trigger() {
                return Err(configuration_error(format!(
                    "exclusion rule {} negates an attribute it also matches on",
                    rule.label(&attributes)
                )));
            }
        }

        Ok(Self {
            supply,
            min_unique_attributes,
            attributes,
            exclusion_rules,
        })
    }

    /// Number of members to generate
    pub const fn supply(&self) -> usize {
        self.supply
    }

    /// Attributes that must differ from every earlier member
    pub const fn min_unique_attributes(&self) -> usize {
        self.min_unique_attributes
    }

    /// Attributes in declaration order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Configured exclusion rules
    pub fn exclusion_rules(&self) -> &[ExclusionRule] {
        &self.exclusion_rules
    }

    /// Filled slot count from which the duplicate guard applies
    pub fn duplicate_check_threshold(&self) -> usize {
        self.attributes
            .len()
            .saturating_sub(self.min_unique_attributes)
    }

    /// Human readable `attribute/variant` form of a key
    pub fn label(&self, key: VariantKey) -> String {
        key.label(&self.attributes)
    }
}

fn validate_attributes(attributes: &[Attribute]) -> Result<()> {
    let mut attribute_names = HashSet::new();

    for attribute in attributes {
        validate_name("attribute", &attribute.name)?;
        if !attribute_names.insert(attribute.name.as_str()) {
            return Err(configuration_error(format!(
                "attribute '{}' is declared more than once",
                attribute.name
            )));
        }

        if attribute.variants.is_empty() {
            return Err(configuration_error(format!(
                "attribute '{}' has no variants",
                attribute.name
            )));
        }

        if let Some(variant) = attribute
            .variants
            .iter()
            .find(|v| v.allocation_percent > FULL_ALLOCATION)
        {
            return Err(configuration_error(format!(
                "variant '{}' of '{}' allocates {}%, above {FULL_ALLOCATION}",
                variant.name, attribute.name, variant.allocation_percent
            )));
        }

        let total = attribute.allocation_total();
        if total != u64::from(FULL_ALLOCATION) {
            return Err(configuration_error(format!(
                "attribute '{}' allocation % sum must equal {FULL_ALLOCATION} (got {total})",
                attribute.name
            )));
        }

        let mut variant_names = HashSet::new();
        for variant in &attribute.variants {
            validate_name("variant", &variant.name)?;
            if variant.name.starts_with(NEGATION_MARKER) {
                return Err(configuration_error(format!(
                    "variant '{}' of '{}' must not start with '{NEGATION_MARKER}'",
                    variant.name, attribute.name
                )));
            }
            if !variant_names.insert(variant.name.as_str()) {
                return Err(configuration_error(format!(
                    "variant '{}' is declared more than once in '{}'",
                    variant.name, attribute.name
                )));
            }
        }
    }

    Ok(())
}

fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(configuration_error(format!("{kind} name must not be empty")));
    }
    if name.contains(KEY_SEPARATOR) {
        return Err(configuration_error(format!(
            "{kind} name '{name}' must not contain '{KEY_SEPARATOR}'"
        )));
    }
    Ok(())
}

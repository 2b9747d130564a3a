use crate::io::error::{Result, configuration_error};
use crate::model::attribute::{Attribute, VariantKey};
use crate::model::member::Member;

/// Separator between attribute and variant in composite keys
pub const KEY_SEPARATOR: char = '/';
/// Prefix on the variant part marking a negated key
pub const NEGATION_MARKER: char = '!';

/// Exclusion rule entry, either a plain key or an "attribute is NOT variant" gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleKey {
    /// Referenced attribute and variant
    pub key: VariantKey,
    /// Whether the entry reads `attribute/!variant`
    pub negated: bool,
}

impl RuleKey {
    /// Plain key that counts as a match when present
    pub const fn plain(key: VariantKey) -> Self {
        Self {
            key,
            negated: false,
        }
    }

    /// Gate that holds whenever the attribute is not this variant
    pub const fn negated(key: VariantKey) -> Self {
        Self { key, negated: true }
    }

    /// Parse `attribute/variant` or `attribute/!variant` against the attribute list
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is malformed or names an
    /// unknown attribute or variant
    pub fn parse(raw: &str, attributes: &[Attribute]) -> Result<Self> {
        let Some((attribute_name, variant_part)) = raw.split_once(KEY_SEPARATOR) else {
            return Err(configuration_error(format!(
                "exclusion key '{raw}' must have the form attribute/variant"
            )));
        };

        let (variant_name, negated) = match variant_part.strip_prefix(NEGATION_MARKER) {
            Some(name) => (name, true),
            None => (variant_part, false),
        };

        let attribute_index = attributes
            .iter()
            .position(|a| a.name == attribute_name)
            .ok_or_else(|| {
                configuration_error(format!(
                    "exclusion key '{raw}' references unknown attribute '{attribute_name}'"
                ))
            })?;

        let variant_index = attributes
            .get(attribute_index)
            .and_then(|a| a.variant_index(variant_name))
            .ok_or_else(|| {
                configuration_error(format!(
                    "exclusion key '{raw}' references unknown variant '{variant_name}'"
                ))
            })?;

        Ok(Self {
            key: VariantKey::new(attribute_index, variant_index),
            negated,
        })
    }

    /// Whether a negated gate is satisfied by the member's variant for its attribute
    ///
    /// A member that has not filled the attribute does not satisfy the gate.
    pub fn gate_holds(&self, member: &Member) -> bool {
        self.negated
            && member
                .key_for(self.key.attribute)
                .is_some_and(|selected| selected != self.key)
    }

    /// Human readable form, including the negation marker
    pub fn label(&self, attributes: &[Attribute]) -> String {
        let plain = self.key.label(attributes);
        if self.negated {
            plain.replacen(KEY_SEPARATOR, "/!", 1)
        } else {
            plain
        }
    }
}

/// Set of keys of which a finished member may carry at most one match
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExclusionRule {
    keys: Vec<RuleKey>,
}

impl ExclusionRule {
    /// Build a rule from already resolved keys
    pub const fn new(keys: Vec<RuleKey>) -> Self {
        Self { keys }
    }

    /// Parse every raw key of a rule
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the rule is empty or any key fails to parse
    pub fn parse<S: AsRef<str>>(raw_keys: &[S], attributes: &[Attribute]) -> Result<Self> {
        if raw_keys.is_empty() {
            return Err(configuration_error("exclusion rule has no keys"));
        }
        let keys = raw_keys
            .iter()
            .map(|raw| RuleKey::parse(raw.as_ref(), attributes))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keys })
    }

    /// All entries of the rule
    pub fn keys(&self) -> &[RuleKey] {
        &self.keys
    }

    /// Entries that count as matches when present
    pub fn plain_keys(&self) -> impl Iterator<Item = VariantKey> + '_ {
        self.keys.iter().filter(|k| !k.negated).map(|k| k.key)
    }

    /// Entries acting as gating conditions
    pub fn negated_keys(&self) -> impl Iterator<Item = VariantKey> + '_ {
        self.keys.iter().filter(|k| k.negated).map(|k| k.key)
    }

    /// Whether `key` is one of the plain entries
    pub fn triggers(&self, key: VariantKey) -> bool {
        self.plain_keys().any(|k| k == key)
    }

    /// Whether the rule demands a different variant than `key` for its attribute
    pub fn requires_other_variant(&self, key: VariantKey) -> bool {
        self.negated_keys()
            .any(|gate| gate.attribute == key.attribute && gate.variant != key.variant)
    }

    /// Whether a gate names the same attribute as one of the plain keys
    ///
    /// Such a rule can never hold for a member carrying that plain key: the
    /// gate either contradicts it or is satisfied by it, counting twice.
    pub fn gates_own_trigger(&self) -> bool {
        self.negated_keys()
            .any(|gate| self.plain_keys().any(|k| k.attribute == gate.attribute))
    }

    /// Human readable list of the entries
    pub fn label(&self, attributes: &[Attribute]) -> String {
        let labels: Vec<String> = self.keys.iter().map(|k| k.label(attributes)).collect();
        format!("[{}]", labels.join(", "))
    }
}

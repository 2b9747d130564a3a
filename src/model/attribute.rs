use serde::Deserialize;
use std::fmt;

/// Named option within an attribute with its target share of the collection
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Variant {
    /// Variant name, unique within its attribute
    pub name: String,
    /// Target percentage of collection members carrying this variant
    #[serde(rename = "allocPct", alias = "allocationPercent")]
    pub allocation_percent: u32,
}

impl Variant {
    /// Create a variant with the given allocation percentage
    pub fn new(name: impl Into<String>, allocation_percent: u32) -> Self {
        Self {
            name: name.into(),
            allocation_percent,
        }
    }
}

/// Layer category whose variants are distributed across the collection
///
/// Declaration order is significant: attributes are assembled and composited
/// in this order.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, also the layer directory name
    pub name: String,
    /// Ordered variants; the last one absorbs allocation rounding
    pub variants: Vec<Variant>,
}

impl Attribute {
    /// Create an attribute from its ordered variants
    pub fn new(name: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    /// Sum of all variant allocation percentages, widened so it cannot overflow
    pub fn allocation_total(&self) -> u64 {
        self.variants
            .iter()
            .map(|v| u64::from(v.allocation_percent))
            .sum()
    }

    /// Index of the variant with the given name
    pub fn variant_index(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }

    /// Variant at the given index
    pub fn variant(&self, index: usize) -> Option<&Variant> {
        self.variants.get(index)
    }
}

/// Composite `attribute/variant` identity, stored as indices into the configuration
///
/// Keys are only meaningful relative to the attribute list they were built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    /// Index of the attribute in declaration order
    pub attribute: usize,
    /// Index of the variant within its attribute
    pub variant: usize,
}

impl VariantKey {
    /// Create a key from attribute and variant indices
    pub const fn new(attribute: usize, variant: usize) -> Self {
        Self { attribute, variant }
    }

    /// Resolve to the human readable `attribute/variant` form
    pub fn label(self, attributes: &[Attribute]) -> String {
        let attribute = attributes.get(self.attribute);
        let variant = attribute.and_then(|a| a.variant(self.variant));
        match (attribute, variant) {
            (Some(a), Some(v)) => format!("{}/{}", a.name, v.name),
            _ => format!("#{}/#{}", self.attribute, self.variant),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}/#{}", self.attribute, self.variant)
    }
}

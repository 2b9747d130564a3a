use crate::model::attribute::{Attribute, VariantKey};

/// One assembled combination holding a single variant per attribute
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    keys: Vec<VariantKey>,
}

impl Member {
    /// Wrap keys given in attribute declaration order
    pub const fn new(keys: Vec<VariantKey>) -> Self {
        Self { keys }
    }

    /// Selected keys in attribute order
    pub fn keys(&self) -> &[VariantKey] {
        &self.keys
    }

    /// Number of filled attribute slots
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no slot has been filled
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Test whether this member carries the given key
    pub fn contains(&self, key: VariantKey) -> bool {
        self.keys.contains(&key)
    }

    /// Whether every one of `keys` is also carried by this member
    pub fn contains_all<'k>(&self, keys: impl IntoIterator<Item = &'k VariantKey>) -> bool {
        keys.into_iter().all(|&key| self.contains(key))
    }

    /// Variant key selected for the given attribute
    pub fn key_for(&self, attribute: usize) -> Option<VariantKey> {
        self.keys.iter().copied().find(|k| k.attribute == attribute)
    }

    /// Human readable `attribute/variant` labels
    pub fn labels(&self, attributes: &[Attribute]) -> Vec<String> {
        self.keys.iter().map(|k| k.label(attributes)).collect()
    }

    /// Variant names only, in attribute order
    pub fn variant_names<'a>(&self, attributes: &'a [Attribute]) -> Vec<&'a str> {
        self.keys
            .iter()
            .filter_map(|k| {
                attributes
                    .get(k.attribute)
                    .and_then(|a| a.variant(k.variant))
                    .map(|v| v.name.as_str())
            })
            .collect()
    }
}

/// Final ordered set of accepted members
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collection {
    members: Vec<Member>,
}

impl Collection {
    /// Wrap an accepted member list
    pub const fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    /// Members in final order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Number of members
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the collection holds no members
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate members with their 1-based ids
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (usize, &Member)> {
        self.members.iter().enumerate().map(|(i, m)| (i + 1, m))
    }

    /// Take ownership of the member list
    pub fn into_members(self) -> Vec<Member> {
        self.members
    }
}

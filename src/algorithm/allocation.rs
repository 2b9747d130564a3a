use crate::algorithm::shuffle::shuffle;
use crate::io::configuration::ALLOCATION_SHUFFLE_PASSES;
use crate::io::error::{GenerationError, Result};
use crate::model::attribute::{Attribute, VariantKey};
use rand::{CryptoRng, Rng};

/// Variant tokens still available to one attribute during an attempt
///
/// Each token is consumed by exactly one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationPool {
    attribute: usize,
    tokens: Vec<VariantKey>,
}

impl AllocationPool {
    /// Wrap tokens already in draw order
    pub const fn new(attribute: usize, tokens: Vec<VariantKey>) -> Self {
        Self { attribute, tokens }
    }

    /// Index of the attribute this pool serves
    pub const fn attribute(&self) -> usize {
        self.attribute
    }

    /// Remaining tokens in draw order
    pub fn tokens(&self) -> &[VariantKey] {
        &self.tokens
    }

    /// Number of remaining tokens
    pub const fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the pool is exhausted
    pub const fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Remaining tokens of one variant
    pub fn count_of(&self, variant: usize) -> usize {
        self.tokens.iter().filter(|k| k.variant == variant).count()
    }

    /// Remove and return the first token accepted by `accept`
    ///
    /// Tokens are offered front to back; the scan stops at the first acceptance.
    pub fn take_first<F>(&mut self, mut accept: F) -> Option<VariantKey>
    where
        F: FnMut(VariantKey) -> bool,
    {
        let position = self.tokens.iter().position(|&key| accept(key))?;
        Some(self.tokens.remove(position))
    }
}

/// Per-attribute pools for one attempt, indexed by attribute position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationPlan {
    pools: Vec<AllocationPool>,
}

impl AllocationPlan {
    /// Wrap pools given in attribute order
    pub const fn new(pools: Vec<AllocationPool>) -> Self {
        Self { pools }
    }

    /// All pools in attribute order
    pub fn pools(&self) -> &[AllocationPool] {
        &self.pools
    }

    /// Pool of one attribute
    pub fn pool(&self, attribute: usize) -> Option<&AllocationPool> {
        self.pools.get(attribute)
    }

    /// Mutable pool of one attribute
    pub fn pool_mut(&mut self, attribute: usize) -> Option<&mut AllocationPool> {
        self.pools.get_mut(attribute)
    }

    /// Tokens left across every pool
    pub fn remaining(&self) -> usize {
        self.pools.iter().map(AllocationPool::len).sum()
    }
}

/// Number of members each variant receives
///
/// Every variant but the last gets `floor(supply * pct / 100)`; the last one
/// absorbs the remainder so the counts always total `supply`.
///
/// # Errors
///
/// Returns an allocation error if the attribute has no variants or the earlier
/// variants already exceed `supply`
pub fn allocation_counts(attribute: &Attribute, supply: usize) -> Result<Vec<usize>> {
    let Some((_, leading)) = attribute.variants.split_last() else {
        return Err(GenerationError::Allocation {
            attribute: attribute.name.clone(),
            allocated: 0,
            supply,
        });
    };

    let mut counts: Vec<usize> = leading
        .iter()
        .map(|variant| (supply as u64 * u64::from(variant.allocation_percent) / 100) as usize)
        .collect();

    let allocated: usize = counts.iter().sum();
    let remainder = supply
        .checked_sub(allocated)
        .ok_or_else(|| GenerationError::Allocation {
            attribute: attribute.name.clone(),
            allocated,
            supply,
        })?;
    counts.push(remainder);

    Ok(counts)
}

/// Build one attribute's pool in variant declaration order, before shuffling
///
/// # Errors
///
/// Returns an allocation error if the counts cannot be satisfied
pub fn build_pool(
    attribute_index: usize,
    attribute: &Attribute,
    supply: usize,
) -> Result<AllocationPool> {
    let counts = allocation_counts(attribute, supply)?;

    let mut tokens = Vec::with_capacity(supply);
    for (variant_index, &count) in counts.iter().enumerate() {
        let key = VariantKey::new(attribute_index, variant_index);
        tokens.extend(std::iter::repeat_n(key, count));
    }

    Ok(AllocationPool::new(attribute_index, tokens))
}

/// Plan fresh, independently shuffled pools for every attribute
///
/// Percentage sums are assumed to have been validated with the configuration.
///
/// # Errors
///
/// Returns an allocation error if any attribute cannot be split exactly
pub fn plan_allocation<R>(
    attributes: &[Attribute],
    supply: usize,
    rng: &mut R,
) -> Result<AllocationPlan>
where
    R: Rng + CryptoRng,
{
    let mut pools = Vec::with_capacity(attributes.len());

    for (index, attribute) in attributes.iter().enumerate() {
        let mut pool = build_pool(index, attribute, supply)?;
        shuffle(&mut pool.tokens, ALLOCATION_SHUFFLE_PASSES, rng)?;
        pools.push(pool);
    }

    Ok(AllocationPlan::new(pools))
}

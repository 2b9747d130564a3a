use crate::model::attribute::VariantKey;
use crate::model::rule::ExclusionRule;
use bitvec::prelude::*;

/// Per-member record of which exclusion rules have become live
///
/// A rule goes live the first time any candidate scanned for the member equals
/// one of its plain keys, whether or not that candidate ends up selected.
/// Activation is therefore order dependent: rules only constrain attributes
/// assembled after their trigger was seen.
#[derive(Clone, Debug)]
pub struct ExclusionTracker<'r> {
    rules: &'r [ExclusionRule],
    active: BitVec,
}

impl<'r> ExclusionTracker<'r> {
    /// Start tracking a fresh member with every rule inactive
    pub fn new(rules: &'r [ExclusionRule]) -> Self {
        Self {
            rules,
            active: bitvec![0; rules.len()],
        }
    }

    /// Decide whether `candidate` may be placed, then record its activations
    ///
    /// Against each live rule the candidate is refused when it is one of the
    /// rule's plain keys (a second match) or when the rule gates the
    /// candidate's attribute on a different variant.
    pub fn may_place(&mut self, candidate: VariantKey) -> bool {
        let permitted = self.active.iter_ones().all(|index| {
            self.rules.get(index).is_none_or(|rule| {
                !rule.triggers(candidate) && !rule.requires_other_variant(candidate)
            })
        });

        self.activate(candidate);
        permitted
    }

    /// Mark every rule that has `candidate` as a plain key as live
    pub fn activate(&mut self, candidate: VariantKey) {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.triggers(candidate) {
                self.active.set(index, true);
            }
        }
    }

    /// Whether the rule at `index` is live for this member
    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).as_deref() == Some(&true)
    }

    /// Number of live rules
    pub fn active_count(&self) -> usize {
        self.active.count_ones()
    }
}

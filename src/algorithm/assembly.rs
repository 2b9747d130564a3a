use crate::algorithm::allocation::AllocationPlan;
use crate::algorithm::exclusion::ExclusionTracker;
use crate::io::error::{GenerationError, Result};
use crate::model::attribute::VariantKey;
use crate::model::config::CollectionConfig;
use crate::model::member::Member;

/// Whether the keys chosen so far plus `candidate` all appear in an accepted member
pub fn completes_duplicate(
    accepted: &[Member],
    chosen: &[VariantKey],
    candidate: VariantKey,
) -> bool {
    accepted.iter().any(|previous| {
        previous.contains(candidate) && previous.contains_all(chosen)
    })
}

/// Assemble one member by greedy first-fit selection from the attempt's pools
///
/// Attributes are filled in declaration order. For each one the pool is scanned
/// front to back and the first token that passes the exclusion tracker and,
/// once enough slots are filled, the duplicate guard is consumed. There is no
/// local backtracking: a dead end fails the whole attempt.
///
/// # Errors
///
/// Returns `SelectionExhausted` naming the attribute when no remaining token is
/// admissible. The member index is left at zero for the caller to stamp.
pub fn assemble_member(
    config: &CollectionConfig,
    plan: &mut AllocationPlan,
    accepted: &[Member],
) -> Result<Member> {
    let attributes = config.attributes();
    let threshold = config.duplicate_check_threshold();
    let mut tracker = ExclusionTracker::new(config.exclusion_rules());
    let mut chosen: Vec<VariantKey> = Vec::with_capacity(attributes.len());

    for (index, attribute) in attributes.iter().enumerate() {
        let guard_duplicates = chosen.len() >= threshold;

        let selected = plan.pool_mut(index).and_then(|pool| {
            pool.take_first(|candidate| {
                if !tracker.may_place(candidate) {
                    return false;
                }
                !(guard_duplicates && completes_duplicate(accepted, &chosen, candidate))
            })
        });

        let Some(key) = selected else {
            return Err(GenerationError::SelectionExhausted {
                member_index: 0,
                attribute: attribute.name.clone(),
                chosen: chosen.iter().map(|&k| config.label(k)).collect(),
            });
        };

        chosen.push(key);
    }

    Ok(Member::new(chosen))
}

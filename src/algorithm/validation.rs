//! Authoritative post-assembly checks for exclusion rules and duplication
//!
//! The incremental checks made while assembling only prune candidates; these
//! checks decide whether a finished member may join the collection.

use crate::model::attribute::Attribute;
use crate::model::member::Member;
use crate::model::rule::ExclusionRule;
use std::fmt;

/// Reason a finished member was rejected
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationFailure {
    /// An exclusion rule matched more than once
    ExclusionViolated {
        /// Index of the rule in the configuration
        rule: usize,
        /// Readable form of the rule, e.g. `[Hat/Crown, Background/!Red]`
        label: String,
        /// Plain keys present plus gates that hold
        matches: usize,
    },
    /// The member repeats an already accepted member
    Duplicate {
        /// Index of the accepted member it repeats
        previous: usize,
    },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExclusionViolated {
                rule,
                label,
                matches,
            } => {
                write!(f, "exclusion rule {rule} {label} matched {matches} times")
            }
            Self::Duplicate { previous } => {
                write!(f, "duplicate of accepted member {previous}")
            }
        }
    }
}

/// Match tally of one rule against one member
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleMatch {
    /// Plain keys carried by the member
    pub plain: usize,
    /// Negated keys whose "attribute is not this variant" condition holds
    pub gates: usize,
}

impl RuleMatch {
    /// Tally `rule` against `member`
    pub fn of(rule: &ExclusionRule, member: &Member) -> Self {
        let plain = rule.plain_keys().filter(|&k| member.contains(k)).count();
        let gates = rule.keys().iter().filter(|k| k.gate_holds(member)).count();
        Self { plain, gates }
    }

    /// Whether the rule applies to the member at all
    pub const fn is_relevant(&self) -> bool {
        self.plain > 0
    }

    /// Total matches counted against the single-match limit
    pub const fn total(&self) -> usize {
        self.plain + self.gates
    }

    /// Whether the member breaks the rule
    pub const fn is_violation(&self) -> bool {
        self.is_relevant() && self.total() > 1
    }
}

/// Check every rule carrying at least one of the member's keys
///
/// # Errors
///
/// Returns the first rule matched more than once
pub fn check_exclusions(
    member: &Member,
    rules: &[ExclusionRule],
    attributes: &[Attribute],
) -> std::result::Result<(), ValidationFailure> {
    for (index, rule) in rules.iter().enumerate() {
        let tally = RuleMatch::of(rule, member);
        if tally.is_violation() {
            return Err(ValidationFailure::ExclusionViolated {
                rule: index,
                label: rule.label(attributes),
                matches: tally.total(),
            });
        }
    }
    Ok(())
}

/// Position of the first accepted member fully contained in `member`
pub fn find_duplicate(member: &Member, accepted: &[Member]) -> Option<usize> {
    accepted
        .iter()
        .position(|previous| member.contains_all(previous.keys()))
}

/// Run both post-hoc checks
///
/// # Errors
///
/// Returns the exclusion violation or duplication that disqualifies the member
pub fn validate_member(
    member: &Member,
    rules: &[ExclusionRule],
    attributes: &[Attribute],
    accepted: &[Member],
) -> std::result::Result<(), ValidationFailure> {
    check_exclusions(member, rules, attributes)?;
    if let Some(previous) = find_duplicate(member, accepted) {
        return Err(ValidationFailure::Duplicate { previous });
    }
    Ok(())
}

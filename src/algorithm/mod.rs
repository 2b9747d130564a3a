/// Percentage-exact allocation pools per attribute
pub mod allocation;
/// Greedy first-fit assembly of a single member
pub mod assembly;
/// Per-member exclusion rule activation and placement checks
pub mod exclusion;
/// Attempt orchestration with whole-collection retry
pub mod executor;
/// Repeatable Fisher–Yates shuffling over a cryptographic generator
pub mod shuffle;
/// Post-hoc exclusion and duplicate validation
pub mod validation;

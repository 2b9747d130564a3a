//! Layered image collection generator with percentage-exact trait allocation
//!
//! Every attribute's variants are split across the collection by their
//! configured percentages, members are assembled greedily under exclusion rules
//! and a minimum-uniqueness guarantee, and any dead end restarts the whole
//! collection with freshly shuffled allocation pools.

#![forbid(unsafe_code)]

/// Allocation planning, member assembly, validation and retry orchestration
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Attributes, variants, exclusion rules, members and configuration
pub mod model;

pub use io::error::{GenerationError, Result};

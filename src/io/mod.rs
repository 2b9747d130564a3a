//! Input/output: configuration, rendering, serialization and error handling

/// Command-line interface and run orchestration
pub mod cli;
/// Collection configuration file parsing
pub mod config;
/// Generation constants and defaults
pub mod configuration;
/// Error types and context enrichment
pub mod error;
/// Layer loading, compositing and image export
pub mod image;
/// Log subscriber setup
pub mod logging;
/// Per-member metadata documents
pub mod metadata;
/// Output directory layout
pub mod output;
/// Progress display
pub mod progress;
/// CSV trait table export
pub mod table;

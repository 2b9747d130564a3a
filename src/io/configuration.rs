//! Generation constants and runtime configuration defaults

// Shuffle strength
/// Fisher–Yates passes applied to each attribute pool per attempt
pub const ALLOCATION_SHUFFLE_PASSES: usize = 10;
/// Fisher–Yates passes applied to the accepted collection
pub const COLLECTION_SHUFFLE_PASSES: usize = 100;

// Default input and output locations
/// Collection configuration file
pub const DEFAULT_CONFIG_PATH: &str = "inputs/config.json";
/// Directory holding `<attribute>/<variant>.png` layers
pub const DEFAULT_LAYERS_DIR: &str = "inputs/layers";
/// Directory receiving rendered results
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

// Output layout
/// Subdirectory for per-member metadata documents
pub const METADATA_DIR: &str = "metadata";
/// Subdirectory for full size composites
pub const IMAGES_DIR: &str = "images";
/// Subdirectory for resized previews
pub const PREVIEWS_DIR: &str = "previews";
/// File name of the trait table
pub const TABLE_FILE: &str = "table.csv";
/// Extension of layer and composite images
pub const IMAGE_EXTENSION: &str = "png";
/// Extension of preview images
pub const PREVIEW_EXTENSION: &str = "webp";

/// Edge length of preview images in pixels
pub const PREVIEW_SIZE: u32 = 600;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

//! Compositing constants and runtime configuration defaults

// Layout
/// Blank margin kept on every side of the surface before cells are laid out
pub const CELL_MARGIN: u32 = 8;

/// Smallest allowed column or row count
pub const MIN_GRID_DIMENSION: u32 = 1;
/// Largest allowed column or row count
pub const MAX_GRID_DIMENSION: u32 = 50;

/// Default column count
pub const DEFAULT_GRID_COLS: u32 = 8;
/// Default row count
pub const DEFAULT_GRID_ROWS: u32 = 6;

// Source images
/// Number of image slots available to the compositor
pub const MAX_IMAGE_SLOTS: usize = 4;

/// Scale applied to a freshly loaded image
pub const DEFAULT_SCALE_PERCENT: u8 = 80;
/// Smallest per-image scale percentage
pub const MIN_SCALE_PERCENT: u8 = 1;
/// Largest per-image scale percentage
pub const MAX_SCALE_PERCENT: u8 = 100;

// Cover-fit never shrinks an image below this multiplier
/// Lower bound on the per-image scale multiplier
pub const MIN_SCALE_MULTIPLIER: f64 = 0.01;

// Rotation hash
/// Multiplier mixing the row into the cell hash
pub const ROW_HASH_PRIME: u32 = 73_856_093;
/// Multiplier mixing the column into the cell hash
pub const COL_HASH_PRIME: u32 = 19_349_663;
/// Number of angle buckets a cell hash is reduced to
pub const ANGLE_BUCKETS: u32 = 10_000;

// Export
/// Safety ceiling on exported pixel count (e.g. 8000x6250)
pub const MAX_PIXELS: u64 = 50_000_000;

/// Default export resolution
pub const DEFAULT_DPI: u32 = 300;
/// Default export width and height in pixels
pub const DEFAULT_EXPORT_SIZE: f64 = 1024.0;

/// Inches per meter, used for `pHYs` pixels-per-meter values
pub const INCHES_PER_METER: f64 = 39.370_078_74;
/// Millimeters per inch
pub const MILLIMETERS_PER_INCH: f64 = 25.4;

// Preview surfaces fit inside this box
/// Widest preview surface
pub const PREVIEW_MAX_WIDTH: u32 = 1024;
/// Tallest preview surface
pub const PREVIEW_MAX_HEIGHT: u32 = 768;
/// Shortest allowed preview side
pub const PREVIEW_MIN_SIZE: u32 = 200;

// Output settings
/// Prefix of suggested export filenames
pub const OUTPUT_PREFIX: &str = "pattern";
/// Suffix added to preview filenames
pub const PREVIEW_SUFFIX: &str = "_preview";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

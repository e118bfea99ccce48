/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Tolerance used when checking that allocation percentages add up to 100
pub const PERCENTAGE_TOLERANCE: &str = "0.000001";

/// Default number of entries on each side of a performance ranking
pub const DEFAULT_TOP_N: usize = 5;

/// Name reported by the built-in sample dataset
pub const STATIC_SOURCE_NAME: &str = "static";

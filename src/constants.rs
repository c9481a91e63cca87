//! Domain limits and tuning constants for the color model.

/// Hue is kept in `[0, HUE_RANGE)` degrees.
pub const HUE_RANGE: f64 = 360.0;

/// Largest value of an 8-bit RGB channel.
pub const CHANNEL_MAX: f64 = 255.0;

/// Width of one hue sector in the HSV hexcone.
pub const HUE_SECTOR: f64 = 60.0;

/// Alpha drags are rounded to this many decimal places.
pub const ALPHA_DECIMALS: u32 = 2;

/// Tolerance when comparing real-valued components during reconciliation.
///
/// Integer RGB channels are always compared exactly.
pub const RECONCILE_EPSILON: f64 = 1e-9;

/// Most decimal places any rounding keeps. An `f64` holds about 15.
pub const MAX_DECIMALS: u32 = 15;

/// Number of decimals used when printing real numbers in CSS functions.
pub const CSS_DECIMALS: u32 = 3;

/// Gray level for light text drawn on dark colors.
pub const TEXT_LIGHT: u8 = 255;

/// Gray level for dark text drawn on light colors.
pub const TEXT_DARK: u8 = 0;

//! Color constants for the watch face.
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! It is the native format of most wearable panels and of the glyph assets,
//! so frames never need a conversion pass before being handed to the host.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Ambient flat fill and unlit pixels.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Lit pixels in low-bit ambient mode.
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Lit LED segment red.
pub const LED_RED: Rgb565 = Rgb565::new(31, 8, 2);

/// Unlit LED segment. Faint enough to read as "off" on top of the background.
pub const LED_OFF: Rgb565 = Rgb565::new(6, 3, 1);

/// Default transparent color key for glyph assets (pure magenta).
///
/// Glyph pixels of exactly this color are skipped when drawing, so glyphs can
/// be overlaid on the background image without a box around them.
pub const GLYPH_KEY: Rgb565 = Rgb565::MAGENTA;

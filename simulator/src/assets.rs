//! Generated LED assets.
//!
//! The simulator ships no image files. Digit, colon and spacer glyphs are
//! drawn as seven-segment LED cells at twice their on-screen size, so the
//! renderer's scaling path is exercised the same way it is with real art.
//! Everything outside the lit and unlit segments is [`GLYPH_KEY`], which the
//! renderer treats as transparent.

use std::path::Path;

use anyhow::Context;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, CornerRadii, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::Text;
use ledwatch_common::colors::{GLYPH_KEY, LED_OFF, LED_RED};
use ledwatch_common::config::{COLON_WIDTH, DIGIT_HEIGHT, DIGIT_WIDTH, SPACER_WIDTH};
use ledwatch_common::glyphs::DIGIT_COUNT;
use ledwatch_common::{Bitmap, GlyphSet};

use crate::styles::{CENTERED_MIDDLE, MERIDIEM_STYLE};

/// Native glyph resolution relative to the on-screen layout.
const ASSET_SCALE: u32 = 2;

const DIGIT_SIZE: Size = Size::new(DIGIT_WIDTH * ASSET_SCALE, DIGIT_HEIGHT * ASSET_SCALE);
const COLON_SIZE: Size = Size::new(COLON_WIDTH * ASSET_SCALE, DIGIT_HEIGHT * ASSET_SCALE);
const SPACER_SIZE: Size = Size::new(SPACER_WIDTH * ASSET_SCALE, DIGIT_HEIGHT * ASSET_SCALE);

/// Gap between the cell edge and the segments.
const MARGIN: i32 = 8;
/// Segment thickness.
const THICKNESS: u32 = 12;
const DOT_DIAMETER: u32 = 14;

const BACKGROUND_SIZE: Size = Size::new(200, 200);

const LIT: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(LED_RED);
const UNLIT: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(LED_OFF);

// =============================================================================
// Seven-Segment Geometry
// =============================================================================

/// Segment bits, `a` (top) to `g` (middle), for each digit.
const SEGMENT_MASKS: [u8; DIGIT_COUNT] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;

/// Rectangles of segments `a` to `g` in a cell of `size`.
fn segment_rects(size: Size) -> [Rectangle; 7] {
    let w = size.width as i32;
    let h = size.height as i32;
    let t = THICKNESS as i32;
    let horizontal = Size::new((w - 2 * MARGIN - 2 * t) as u32, THICKNESS);
    let upper = Size::new(THICKNESS, (h / 2 - t / 2 - MARGIN - t) as u32);
    let lower = Size::new(THICKNESS, (h - MARGIN - t - (h / 2 + t / 2)) as u32);
    let left = MARGIN;
    let right = w - MARGIN - t;
    let inner = MARGIN + t;
    let middle = h / 2 - t / 2;

    [
        Rectangle::new(Point::new(inner, MARGIN), horizontal),
        Rectangle::new(Point::new(right, inner), upper),
        Rectangle::new(Point::new(right, middle + t), lower),
        Rectangle::new(Point::new(inner, h - MARGIN - t), horizontal),
        Rectangle::new(Point::new(left, middle + t), lower),
        Rectangle::new(Point::new(left, inner), upper),
        Rectangle::new(Point::new(inner, middle), horizontal),
    ]
}

fn draw_segments(
    cell: &mut Bitmap,
    mask: u8,
    visible: u8,
) {
    let size = cell.size();
    let radii = CornerRadii::new(Size::new(THICKNESS / 2, THICKNESS / 2));
    for (i, rect) in segment_rects(size).into_iter().enumerate() {
        let bit = 1 << i;
        if visible & bit == 0 {
            continue;
        }
        let style = if mask & bit != 0 { LIT } else { UNLIT };
        RoundedRectangle::new(rect, radii).into_styled(style).draw(cell).ok();
    }
}

// =============================================================================
// Glyphs
// =============================================================================

fn digit_glyph(value: usize) -> Bitmap {
    let mut cell = Bitmap::filled(DIGIT_SIZE, GLYPH_KEY);
    draw_segments(&mut cell, SEGMENT_MASKS[value], 0x7F);
    cell
}

fn colon_glyph() -> Bitmap {
    let mut cell = Bitmap::filled(COLON_SIZE, GLYPH_KEY);
    let x = COLON_SIZE.width as i32 / 2;
    let h = COLON_SIZE.height as i32;
    for y in [h / 3, h * 2 / 3] {
        Circle::with_center(Point::new(x, y), DOT_DIAMETER)
            .into_styled(LIT)
            .draw(&mut cell)
            .ok();
    }
    cell
}

/// Unlit right-hand segments, shown in front of a lit leading digit.
fn spacer_glyph() -> Bitmap {
    let mut cell = Bitmap::filled(SPACER_SIZE, GLYPH_KEY);
    draw_segments(&mut cell, 0, SEG_B | SEG_C);
    cell
}

fn meridiem_glyph(label: &str) -> Bitmap {
    let mut cell = Bitmap::filled(DIGIT_SIZE, GLYPH_KEY);
    let center = Point::new(DIGIT_SIZE.width as i32 / 2, DIGIT_SIZE.height as i32 * 3 / 4);
    Text::with_text_style(label, center, MERIDIEM_STYLE, CENTERED_MIDDLE)
        .draw(&mut cell)
        .ok();
    cell
}

/// Full LED glyph table, keyed on [`GLYPH_KEY`].
pub fn led_glyphs() -> GlyphSet {
    GlyphSet::new(
        core::array::from_fn(digit_glyph),
        colon_glyph(),
        meridiem_glyph("AM"),
        meridiem_glyph("PM"),
    )
    .with_blank(spacer_glyph())
    .with_color_key(GLYPH_KEY)
}

// =============================================================================
// Background
// =============================================================================

/// Diagonal dusk gradient.
pub fn gradient_background() -> anyhow::Result<Bitmap> {
    let w = BACKGROUND_SIZE.width;
    let h = BACKGROUND_SIZE.height;
    let span = w + h - 2;
    let pixels = (0..h)
        .flat_map(|y| {
            (0..w).map(move |x| {
                let t = x + y;
                Rgb565::new(
                    (4 + 14 * t / span) as u8,
                    (6 + 10 * (span - t) / span) as u8,
                    (20 - 8 * t / span) as u8,
                )
            })
        })
        .collect();
    Bitmap::from_pixels(w, pixels).context("building gradient background")
}

/// Raw big-endian RGB565 image, `width` pixels per row.
pub fn load_background(
    path: &Path,
    width: u32,
) -> anyhow::Result<Bitmap> {
    let bytes = std::fs::read(path).with_context(|| format!("reading background {}", path.display()))?;
    Bitmap::from_rgb565_be(width, &bytes).with_context(|| format!("decoding background {}", path.display()))
}

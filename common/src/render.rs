//! Frame renderer.
//!
//! A frame is a pure function of the clock reading, the display mode and the
//! surface bounds (plus the read-only assets). Nothing is remembered between
//! frames; the only reuse is the surface-sized [`BackgroundCache`], and a
//! frame comes out identical whether or not that cache is warm.
//!
//! # Frame Composition
//!
//! 1. Background: scaled image (Active/Muted), gray image or flat fill (Ambient)
//! 2. Clock row: each glyph of the [`ClockPlan`] scaled to its slot and drawn
//!    left to right, AM/PM last
//!
//! # Glyph Treatment per Mode
//!
//! | Mode | Background | Glyphs |
//! |------|-----------|--------|
//! | Active | Scaled image | As is |
//! | Muted | Scaled image | Channels shifted right (dimmed) |
//! | Ambient | Gray image, else flat fill | As is; pure on/off on low-bit panels |

use embedded_graphics::image::Image;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::background::BackgroundCache;
use crate::bitmap::{Bitmap, ScaleFilter};
use crate::clock::ClockReading;
use crate::colors::{BLACK, WHITE};
use crate::config::FaceConfig;
use crate::glyphs::GlyphSet;
use crate::layout::ClockPlan;
use crate::mode::{DisplayMode, DisplayProperties};

/// 8-bit level of the brightest channel at or above which a low-bit ambient
/// pixel is lit. Saturated LED colors stay lit; unlit segment shades go dark.
const MONO_THRESHOLD: u8 = 128;

// =============================================================================
// Glyph Tint
// =============================================================================

/// Per-pixel color treatment of glyphs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum GlyphTint {
    None,
    /// Right shift of every channel.
    Dim(u8),
    /// Pure black or white.
    Mono,
}

impl GlyphTint {
    const fn for_mode(
        mode: DisplayMode,
        properties: DisplayProperties,
        dim_shift: u8,
    ) -> Self {
        match mode {
            DisplayMode::Active => Self::None,
            DisplayMode::Muted => Self::Dim(dim_shift),
            DisplayMode::Ambient if properties.low_bit_ambient => Self::Mono,
            DisplayMode::Ambient => Self::None,
        }
    }

    #[inline]
    fn apply(
        self,
        color: Rgb565,
    ) -> Rgb565 {
        match self {
            Self::None => color,
            Self::Dim(shift) => {
                let dim = |channel: u8| channel.checked_shr(u32::from(shift)).unwrap_or(0);
                Rgb565::new(dim(color.r()), dim(color.g()), dim(color.b()))
            }
            Self::Mono => {
                if brightest_channel(color) >= MONO_THRESHOLD {
                    WHITE
                } else {
                    BLACK
                }
            }
        }
    }
}

/// Highest of the three channels, expanded to 8 bits.
#[inline]
fn brightest_channel(color: Rgb565) -> u8 {
    let rgb = Rgb888::from(color);
    rgb.r().max(rgb.g()).max(rgb.b())
}

// =============================================================================
// Frame Renderer
// =============================================================================

/// Composes watch face frames from read-only assets.
#[derive(Clone, Copy)]
pub struct FrameRenderer<'a> {
    glyphs: &'a GlyphSet,
    background: &'a BackgroundCache,
    config: &'a FaceConfig,
    properties: DisplayProperties,
}

impl<'a> FrameRenderer<'a> {
    pub const fn new(
        glyphs: &'a GlyphSet,
        background: &'a BackgroundCache,
        config: &'a FaceConfig,
        properties: DisplayProperties,
    ) -> Self {
        Self {
            glyphs,
            background,
            config,
            properties,
        }
    }

    /// Glyph placements for `reading` without drawing anything.
    pub fn plan(
        &self,
        reading: &ClockReading,
    ) -> ClockPlan {
        let text = reading.text(self.config.hour_format);
        ClockPlan::new(&text, reading.meridiem(), &self.config.layout, self.glyphs)
    }

    /// Render into a new bitmap of exactly `bounds`.
    pub fn render(
        &self,
        reading: &ClockReading,
        mode: DisplayMode,
        bounds: Size,
    ) -> Bitmap {
        let mut frame = Bitmap::filled(bounds, self.config.ambient_fill);
        let Ok(_) = self.draw_frame(&mut frame, reading, mode, bounds);
        frame
    }

    /// Draw a full frame covering `bounds` of `target`. Returns the plan that was drawn.
    pub fn draw_frame<D>(
        &self,
        target: &mut D,
        reading: &ClockReading,
        mode: DisplayMode,
        bounds: Size,
    ) -> Result<ClockPlan, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.draw_background(target, mode, bounds)?;

        let plan = self.plan(reading);
        let tint = GlyphTint::for_mode(mode, self.properties, self.config.muted_dim_shift);
        let key = self.glyphs.color_key();
        for placement in plan.drawn() {
            let Some(image) = self.glyphs.get(placement.glyph) else {
                continue;
            };
            image
                .scaled(placement.size, ScaleFilter::Nearest)
                .blit(target, placement.origin, key, |color| tint.apply(color))?;
        }

        log::debug!(
            "clock frame built with {} {} ({}) on {}x{}",
            reading.text(self.config.hour_format).as_str(),
            reading.meridiem().label(),
            mode.label(),
            bounds.width,
            bounds.height
        );
        Ok(plan)
    }

    fn draw_background<D>(
        &self,
        target: &mut D,
        mode: DisplayMode,
        bounds: Size,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if mode == DisplayMode::Ambient {
            return match self.background.gray_for(bounds, self.properties) {
                Some(gray) => Image::new(gray, Point::zero()).draw(target),
                None => target.fill_solid(&Rectangle::new(Point::zero(), bounds), self.config.ambient_fill),
            };
        }

        match self.background.scaled_for(bounds) {
            Some(scaled) => Image::new(scaled, Point::zero()).draw(target),
            None => {
                let scaled = self.background.source().scaled(bounds, ScaleFilter::Bilinear);
                Image::new(&scaled, Point::zero()).draw(target)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

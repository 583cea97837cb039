//! Owned RGB565 rasters.
//!
//! [`Bitmap`] is both the asset type (background, glyphs) and the frame type
//! produced by the renderer. It plugs into `embedded-graphics` three ways:
//!
//! - [`DrawTarget`]: frames are rendered into a bitmap (out-of-bounds pixels
//!   are dropped, so glyphs may hang off the left edge)
//! - [`ImageDrawable`]: a bitmap can be drawn with `Image::new(&bitmap, pos)`
//! - [`GetPixel`]: random pixel access for tests and hosts
//!
//! # Scaling
//!
//! | Filter | Used for | Method |
//! |--------|----------|--------|
//! | [`ScaleFilter::Nearest`] | Glyphs | Center sampling, no blending |
//! | [`ScaleFilter::Bilinear`] | Background | 8.8 fixed-point blend in RGB888 |
//!
//! The output of [`Bitmap::scaled`] always has exactly the requested size.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;

use embedded_graphics::image::{GetPixel, ImageDrawable};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
#[allow(unused_imports)]
use micromath::F32Ext;

// =============================================================================
// Luminance Weights
// =============================================================================

/// Red weight of the saturation-zero color matrix.
const LUMA_R: f32 = 0.213;
/// Green weight of the saturation-zero color matrix.
const LUMA_G: f32 = 0.715;
/// Blue weight of the saturation-zero color matrix.
const LUMA_B: f32 = 0.072;

// =============================================================================
// Errors
// =============================================================================

/// Invalid raw image data.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapError {
    /// Width of zero was given.
    ZeroWidth,
    /// No pixel data at all.
    Empty,
    /// Byte data does not hold a whole number of RGB565 pixels.
    OddLength { len: usize },
    /// Pixel count is not a multiple of the width.
    Ragged { pixels: usize, width: u32 },
}

impl fmt::Display for BitmapError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::ZeroWidth => write!(f, "bitmap width must be non-zero"),
            Self::Empty => write!(f, "bitmap has no pixel data"),
            Self::OddLength { len } => write!(f, "{len} bytes is not a whole number of RGB565 pixels"),
            Self::Ragged { pixels, width } => {
                write!(f, "{pixels} pixels do not form rows of width {width}")
            }
        }
    }
}

impl core::error::Error for BitmapError {}

// =============================================================================
// Scale Filter
// =============================================================================

/// Resampling method for [`Bitmap::scaled`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScaleFilter {
    /// Pick the closest source pixel. Keeps LED glyph edges hard.
    Nearest,
    /// Blend the four closest source pixels.
    Bilinear,
}

// =============================================================================
// Bitmap
// =============================================================================

/// Owned row-major RGB565 raster.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bitmap {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl Bitmap {
    /// A bitmap of `size` filled with one color. Zero-sized bitmaps are allowed.
    pub fn filled(
        size: Size,
        color: Rgb565,
    ) -> Self {
        Self {
            size,
            pixels: vec![color; size.width as usize * size.height as usize],
        }
    }

    /// Wrap row-major pixels.
    pub fn from_pixels(
        width: u32,
        pixels: Vec<Rgb565>,
    ) -> Result<Self, BitmapError> {
        if width == 0 {
            return Err(BitmapError::ZeroWidth);
        }
        if pixels.is_empty() {
            return Err(BitmapError::Empty);
        }
        if pixels.len() % width as usize != 0 {
            return Err(BitmapError::Ragged { pixels: pixels.len(), width });
        }
        let height = (pixels.len() / width as usize) as u32;
        Ok(Self {
            size: Size::new(width, height),
            pixels,
        })
    }

    /// Decode big-endian RGB565 bytes, the layout `ImageRawBE<Rgb565>` uses.
    pub fn from_rgb565_be(
        width: u32,
        data: &[u8],
    ) -> Result<Self, BitmapError> {
        if data.len() % 2 != 0 {
            return Err(BitmapError::OddLength { len: data.len() });
        }
        let pixels = data
            .chunks_exact(2)
            .map(|pair| Rgb565::from(RawU16::new(u16::from_be_bytes([pair[0], pair[1]]))))
            .collect();
        Self::from_pixels(width, pixels)
    }

    /// Encode as big-endian RGB565 bytes.
    pub fn to_rgb565_be(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color.into_storage().to_be_bytes())
            .collect()
    }

    #[inline]
    pub const fn width(&self) -> u32 { self.size.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.size.height }

    /// Row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[Rgb565] { &self.pixels }

    #[inline]
    fn index_of(
        &self,
        point: Point,
    ) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Pixel at in-range coordinates.
    #[inline]
    fn at(
        &self,
        x: u32,
        y: u32,
    ) -> Rgb565 {
        self.pixels[y as usize * self.size.width as usize + x as usize]
    }

    /// Resample to exactly `target`.
    pub fn scaled(
        &self,
        target: Size,
        filter: ScaleFilter,
    ) -> Self {
        if target == self.size {
            return self.clone();
        }
        if target.width == 0 || target.height == 0 || self.pixels.is_empty() {
            return Self::filled(target, Rgb565::BLACK);
        }

        let mut pixels = Vec::with_capacity(target.width as usize * target.height as usize);
        match filter {
            ScaleFilter::Nearest => {
                for y in 0..target.height {
                    let sy = nearest_source(y, self.size.height, target.height);
                    for x in 0..target.width {
                        let sx = nearest_source(x, self.size.width, target.width);
                        pixels.push(self.at(sx, sy));
                    }
                }
            }
            ScaleFilter::Bilinear => {
                for y in 0..target.height {
                    let (y0, y1, wy) = bilinear_source(y, self.size.height, target.height);
                    for x in 0..target.width {
                        let (x0, x1, wx) = bilinear_source(x, self.size.width, target.width);
                        let top = lerp_color(self.at(x0, y0), self.at(x1, y0), wx);
                        let bottom = lerp_color(self.at(x0, y1), self.at(x1, y1), wx);
                        pixels.push(Rgb565::from(lerp_rgb888(top, bottom, wy)));
                    }
                }
            }
        }

        Self { size: target, pixels }
    }

    /// Gray copy of the bitmap (saturation zero).
    pub fn desaturated(&self) -> Self {
        Self {
            size: self.size,
            pixels: self.pixels.iter().map(|&color| desaturate(color)).collect(),
        }
    }

    /// Draw with `origin` as the top-left corner.
    ///
    /// Pixels equal to `key` are skipped; every other pixel passes through
    /// `tint` on its way to the target.
    pub fn blit<D, F>(
        &self,
        target: &mut D,
        origin: Point,
        key: Option<Rgb565>,
        tint: F,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        F: Fn(Rgb565) -> Rgb565,
    {
        let width = self.size.width as usize;
        let pixels = self
            .pixels
            .iter()
            .enumerate()
            .filter(|&(_, &color)| Some(color) != key)
            .map(|(i, &color)| {
                let offset = Point::new((i % width) as i32, (i / width) as i32);
                Pixel(origin + offset, tint(color))
            });
        target.draw_iter(pixels)
    }
}

// =============================================================================
// Pixel Helpers
// =============================================================================

/// Source coordinate of the sample closest to the center of target pixel `t`.
#[inline]
fn nearest_source(
    t: u32,
    source_len: u32,
    target_len: u32,
) -> u32 {
    let s = ((2 * u64::from(t) + 1) * u64::from(source_len)) / (2 * u64::from(target_len));
    (s as u32).min(source_len - 1)
}

/// Two neighbouring source coordinates and the 8-bit weight of the second.
#[inline]
fn bilinear_source(
    t: u32,
    source_len: u32,
    target_len: u32,
) -> (u32, u32, u32) {
    // Center-aligned mapping in 8.8 fixed point.
    let pos = ((2 * i64::from(t) + 1) * i64::from(source_len) * 256) / (2 * i64::from(target_len)) - 128;
    let max = i64::from(source_len - 1) * 256;
    let pos = pos.clamp(0, max);
    let s0 = (pos >> 8) as u32;
    let s1 = (s0 + 1).min(source_len - 1);
    (s0, s1, (pos & 0xFF) as u32)
}

#[inline]
fn lerp_channel(
    a: u8,
    b: u8,
    weight: u32,
) -> u8 {
    ((u32::from(a) * (256 - weight) + u32::from(b) * weight) >> 8) as u8
}

#[inline]
fn lerp_rgb888(
    a: Rgb888,
    b: Rgb888,
    weight: u32,
) -> Rgb888 {
    Rgb888::new(
        lerp_channel(a.r(), b.r(), weight),
        lerp_channel(a.g(), b.g(), weight),
        lerp_channel(a.b(), b.b(), weight),
    )
}

#[inline]
fn lerp_color(
    a: Rgb565,
    b: Rgb565,
    weight: u32,
) -> Rgb888 {
    lerp_rgb888(Rgb888::from(a), Rgb888::from(b), weight)
}

/// Gray level of `color` under the saturation-zero color matrix.
pub fn luminance(color: Rgb565) -> u8 {
    let rgb = Rgb888::from(color);
    let luma = LUMA_R * f32::from(rgb.r()) + LUMA_G * f32::from(rgb.g()) + LUMA_B * f32::from(rgb.b());
    luma.round().clamp(0.0, 255.0) as u8
}

/// Gray pixel with the same luminance as `color`.
#[inline]
pub fn desaturate(color: Rgb565) -> Rgb565 {
    let l = luminance(color);
    Rgb565::from(Rgb888::new(l, l, l))
}

// =============================================================================
// embedded-graphics Integration
// =============================================================================

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for Bitmap {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(index) = self.index_of(point) {
                self.pixels[index] = color;
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

impl ImageDrawable for Bitmap {
    type Color = Rgb565;

    fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        target.fill_contiguous(&self.bounding_box(), self.pixels.iter().copied())
    }

    fn draw_sub_image<D>(
        &self,
        target: &mut D,
        area: &Rectangle,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = area.intersection(&self.bounding_box());
        let origin = area.top_left;
        target.draw_iter(
            area.points()
                .map(|p| Pixel(p - origin, self.at(p.x as u32, p.y as u32))),
        )
    }
}

impl GetPixel for Bitmap {
    type Color = Rgb565;

    fn pixel(
        &self,
        p: Point,
    ) -> Option<Self::Color> {
        self.index_of(p).map(|index| self.pixels[index])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

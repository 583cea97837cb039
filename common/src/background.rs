//! Surface-sized background cache.
//!
//! Scaling the background image and building its gray ambient variant are the
//! two expensive steps of a frame. Both depend only on the surface size (and,
//! for the gray variant, on the panel properties), so they run when the host
//! reports a new surface and are reused by every frame after that.
//!
//! # Update Strategy
//!
//! | Element | Rebuilt when |
//! |---------|--------------|
//! | Scaled background | Surface size changes |
//! | Gray background | Surface size changes (at most once per size) |
//!
//! The gray variant is not built on panels with low-bit ambient or burn-in
//! protection, and a built one is not handed out while the panel reports
//! either; ambient frames fall back to a flat fill there.

use embedded_graphics::geometry::{OriginDimensions, Size};

use crate::bitmap::{Bitmap, ScaleFilter};
use crate::mode::DisplayProperties;

/// Background image plus its surface-sized derivatives.
#[derive(Clone, Debug)]
pub struct BackgroundCache {
    source: Bitmap,
    scaled: Option<Bitmap>,
    gray: Option<Bitmap>,
    /// Number of gray variants built so far.
    desaturations: u32,
}

impl BackgroundCache {
    pub const fn new(source: Bitmap) -> Self {
        Self {
            source,
            scaled: None,
            gray: None,
            desaturations: 0,
        }
    }

    /// The unscaled background asset.
    #[inline]
    pub const fn source(&self) -> &Bitmap { &self.source }

    /// Rebuild for a surface of `size`. Returns `true` if anything was recomputed.
    ///
    /// The gray variant is built only while `properties` allow it, and only
    /// once per surface size.
    pub fn on_surface_changed(
        &mut self,
        size: Size,
        properties: DisplayProperties,
    ) -> bool {
        let size_matches = self.scaled.as_ref().is_some_and(|b| b.size() == size);
        let want_gray = properties.allows_gray_background() && self.gray.is_none();
        if size_matches && !want_gray {
            return false;
        }

        if !size_matches {
            self.scaled = Some(self.source.scaled(size, ScaleFilter::Bilinear));
            self.gray = None;
            log::info!("background scaled to {}x{}", size.width, size.height);
        }

        if properties.allows_gray_background()
            && self.gray.is_none()
            && let Some(scaled) = &self.scaled
        {
            self.gray = Some(scaled.desaturated());
            self.desaturations += 1;
            log::info!("gray ambient background built ({} so far)", self.desaturations);
        }
        true
    }

    /// Scaled background, if the cache was built for exactly `size`.
    pub fn scaled_for(
        &self,
        size: Size,
    ) -> Option<&Bitmap> {
        self.scaled.as_ref().filter(|b| b.size() == size)
    }

    /// Gray background, if one was built for exactly `size` and `properties` allow it.
    pub fn gray_for(
        &self,
        size: Size,
        properties: DisplayProperties,
    ) -> Option<&Bitmap> {
        if !properties.allows_gray_background() {
            return None;
        }
        self.gray.as_ref().filter(|b| b.size() == size)
    }

    /// Drop the surface-sized derivatives (surface recreated).
    pub fn invalidate(&mut self) {
        self.scaled = None;
        self.gray = None;
    }

    #[inline]
    pub const fn desaturations(&self) -> u32 { self.desaturations }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::split_background;

    const SURFACE: Size = Size::new(40, 30);

    #[test]
    fn test_new_cache_is_empty() {
        let cache = BackgroundCache::new(split_background());
        assert!(cache.scaled_for(SURFACE).is_none());
        assert!(cache.gray_for(SURFACE, DisplayProperties::default()).is_none());
        assert_eq!(cache.desaturations(), 0);
    }

    #[test]
    fn test_surface_change_scales_to_exact_size() {
        let mut cache = BackgroundCache::new(split_background());
        assert!(cache.on_surface_changed(SURFACE, DisplayProperties::default()));
        assert_eq!(cache.scaled_for(SURFACE).map(OriginDimensions::size), Some(SURFACE));
        assert_eq!(cache.gray_for(SURFACE, DisplayProperties::default()).map(OriginDimensions::size), Some(SURFACE));
        assert!(cache.scaled_for(Size::new(41, 30)).is_none());
    }

    #[test]
    fn test_gray_built_once_per_size() {
        let mut cache = BackgroundCache::new(split_background());
        cache.on_surface_changed(SURFACE, DisplayProperties::default());
        for _ in 0..10 {
            assert!(!cache.on_surface_changed(SURFACE, DisplayProperties::default()));
        }
        assert_eq!(cache.desaturations(), 1);

        cache.on_surface_changed(Size::new(20, 20), DisplayProperties::default());
        assert_eq!(cache.desaturations(), 2);
    }

    #[test]
    fn test_no_gray_with_low_bit_or_burn_in() {
        let mut cache = BackgroundCache::new(split_background());
        let props = DisplayProperties {
            low_bit_ambient: true,
            burn_in_protection: false,
        };
        cache.on_surface_changed(SURFACE, props);
        assert!(cache.scaled_for(SURFACE).is_some());
        assert!(cache.gray_for(SURFACE, DisplayProperties::default()).is_none());
        assert_eq!(cache.desaturations(), 0);

        let props = DisplayProperties {
            low_bit_ambient: false,
            burn_in_protection: true,
        };
        cache.on_surface_changed(SURFACE, props);
        assert!(cache.gray_for(SURFACE, DisplayProperties::default()).is_none());
    }

    #[test]
    fn test_property_flips_do_not_rebuild_gray() {
        let mut cache = BackgroundCache::new(split_background());
        let low_bit = DisplayProperties {
            low_bit_ambient: true,
            burn_in_protection: false,
        };
        cache.on_surface_changed(SURFACE, DisplayProperties::default());
        for _ in 0..5 {
            cache.on_surface_changed(SURFACE, low_bit);
            assert!(cache.gray_for(SURFACE, low_bit).is_none());
            cache.on_surface_changed(SURFACE, DisplayProperties::default());
            assert!(cache.gray_for(SURFACE, DisplayProperties::default()).is_some());
        }
        assert_eq!(cache.desaturations(), 1);
    }

    #[test]
    fn test_gray_background_is_gray() {
        let mut cache = BackgroundCache::new(split_background());
        cache.on_surface_changed(SURFACE, DisplayProperties::default());
        let gray = cache.gray_for(SURFACE, DisplayProperties::default()).unwrap();
        let scaled = cache.scaled_for(SURFACE).unwrap();
        assert_ne!(gray.pixels(), scaled.pixels());
        assert_eq!(gray.pixels(), scaled.desaturated().pixels());
    }

    #[test]
    fn test_invalidate_drops_derivatives() {
        let mut cache = BackgroundCache::new(split_background());
        cache.on_surface_changed(SURFACE, DisplayProperties::default());
        cache.invalidate();
        assert!(cache.scaled_for(SURFACE).is_none());
        assert!(cache.on_surface_changed(SURFACE, DisplayProperties::default()));
        assert_eq!(cache.desaturations(), 2);
    }
}

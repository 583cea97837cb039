//! Display mode state machine.
//!
//! The host drives two independent flags: ambient (low-power always-on
//! screen) and mute (interruption filter set to block everything). The face
//! collapses them into one [`DisplayMode`]:
//!
//! | ambient | muted | mode |
//! |---------|-------|------|
//! | no | no | [`DisplayMode::Active`] |
//! | no | yes | [`DisplayMode::Muted`] |
//! | yes | any | [`DisplayMode::Ambient`] |
//!
//! There is no terminal state; every transition triggers a redraw.

// =============================================================================
// Display Mode
// =============================================================================

/// How the face is currently drawn.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Full color, redrawn every second.
    #[default]
    Active,
    /// Low-power screen. Gray or flat background, redrawn by host ticks only.
    Ambient,
    /// Interactive but dimmed glyphs.
    Muted,
}

impl DisplayMode {
    /// Combine the host flags. Ambient wins over mute.
    #[inline]
    pub const fn from_flags(
        ambient: bool,
        muted: bool,
    ) -> Self {
        match (ambient, muted) {
            (true, _) => Self::Ambient,
            (false, true) => Self::Muted,
            (false, false) => Self::Active,
        }
    }

    /// Whether the per-second timer may run in this mode.
    #[inline]
    pub const fn is_interactive(self) -> bool { !matches!(self, Self::Ambient) }

    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ambient => "ambient",
            Self::Muted => "muted",
        }
    }
}

// =============================================================================
// Host Display Properties
// =============================================================================

/// Panel capabilities reported by the host.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayProperties {
    /// Ambient mode can only show a few bits per pixel.
    pub low_bit_ambient: bool,
    /// Ambient content is shifted around to protect an OLED panel.
    pub burn_in_protection: bool,
}

impl DisplayProperties {
    /// A gray copy of the full-bleed background only looks right when the
    /// panel keeps full color depth and does not shift pixels in ambient.
    #[inline]
    pub const fn allows_gray_background(self) -> bool { !self.low_bit_ambient && !self.burn_in_protection }
}

// =============================================================================
// Interruption Filter
// =============================================================================

/// Notification filter level reported by the host.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptionFilter {
    #[default]
    All,
    Priority,
    Alarms,
    /// Nothing gets through. The face goes into mute mode.
    None,
}

impl InterruptionFilter {
    #[inline]
    pub const fn mutes(self) -> bool { matches!(self, Self::None) }
}

// =============================================================================
// Mode State
// =============================================================================

/// The two host flags behind [`DisplayMode`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct ModeState {
    ambient: bool,
    muted: bool,
}

impl ModeState {
    pub const fn new() -> Self {
        Self {
            ambient: false,
            muted: false,
        }
    }

    #[inline]
    pub const fn mode(&self) -> DisplayMode { DisplayMode::from_flags(self.ambient, self.muted) }

    #[inline]
    pub const fn is_ambient(&self) -> bool { self.ambient }

    /// Returns `true` if the flag changed.
    pub fn set_ambient(
        &mut self,
        ambient: bool,
    ) -> bool {
        let changed = self.ambient != ambient;
        self.ambient = ambient;
        changed
    }

    /// Returns `true` if the flag changed.
    pub fn set_muted(
        &mut self,
        muted: bool,
    ) -> bool {
        let changed = self.muted != muted;
        self.muted = muted;
        changed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_active() {
        assert_eq!(DisplayMode::default(), DisplayMode::Active);
        assert_eq!(ModeState::new().mode(), DisplayMode::Active);
    }

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(DisplayMode::from_flags(false, false), DisplayMode::Active);
        assert_eq!(DisplayMode::from_flags(false, true), DisplayMode::Muted);
        assert_eq!(DisplayMode::from_flags(true, false), DisplayMode::Ambient);
        assert_eq!(DisplayMode::from_flags(true, true), DisplayMode::Ambient);
    }

    #[test]
    fn test_interactive_modes() {
        assert!(DisplayMode::Active.is_interactive());
        assert!(DisplayMode::Muted.is_interactive());
        assert!(!DisplayMode::Ambient.is_interactive());
    }

    #[test]
    fn test_state_transitions_report_changes() {
        let mut state = ModeState::new();
        assert!(state.set_ambient(true));
        assert!(!state.set_ambient(true));
        assert_eq!(state.mode(), DisplayMode::Ambient);

        assert!(state.set_muted(true));
        assert_eq!(state.mode(), DisplayMode::Ambient);

        assert!(state.set_ambient(false));
        assert_eq!(state.mode(), DisplayMode::Muted);

        assert!(state.set_muted(false));
        assert_eq!(state.mode(), DisplayMode::Active);
    }

    #[test]
    fn test_only_filter_none_mutes() {
        assert!(InterruptionFilter::None.mutes());
        assert!(!InterruptionFilter::All.mutes());
        assert!(!InterruptionFilter::Priority.mutes());
        assert!(!InterruptionFilter::Alarms.mutes());
    }

    #[test]
    fn test_gray_background_eligibility() {
        assert!(DisplayProperties::default().allows_gray_background());
        let low_bit = DisplayProperties {
            low_bit_ambient: true,
            ..DisplayProperties::default()
        };
        let burn_in = DisplayProperties {
            burn_in_protection: true,
            ..DisplayProperties::default()
        };
        assert!(!low_bit.allows_gray_background());
        assert!(!burn_in.allows_gray_background());
    }
}

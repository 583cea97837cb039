//! Clock readings and the fixed-width time text.
//!
//! A [`ClockReading`] is taken once per frame and never changes while the
//! frame is drawn. The renderer works from its text form `HH:MM:SS`, which is
//! always exactly [`TIME_TEXT_LEN`] bytes with zero-padded fields.

use core::fmt::Write as _;

use chrono::Timelike;
use heapless::String;

/// Length of the formatted time text (`HH:MM:SS`).
pub const TIME_TEXT_LEN: usize = 8;

/// Fixed-capacity time text.
pub type TimeText = String<TIME_TEXT_LEN>;

/// Byte offsets of each field inside the time text.
pub mod text_pos {
    pub const HOUR_TENS: usize = 0;
    pub const HOUR_ONES: usize = 1;
    pub const FIRST_COLON: usize = 2;
    pub const MINUTE_TENS: usize = 3;
    pub const MINUTE_ONES: usize = 4;
    pub const SECOND_COLON: usize = 5;
    pub const SECOND_TENS: usize = 6;
    pub const SECOND_ONES: usize = 7;
}

// =============================================================================
// AM/PM
// =============================================================================

/// Half of the day, shown as the trailing AM/PM glyph.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Meridiem of a 24-hour clock hour (0-11 AM, 12-23 PM).
    #[inline]
    pub const fn from_hour(hour: u8) -> Self { if hour < 12 { Self::Am } else { Self::Pm } }

    /// Index into the AM/PM glyph pair.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Am => 0,
            Self::Pm => 1,
        }
    }

    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

// =============================================================================
// Hour Format
// =============================================================================

/// How the hour field is expanded into two digits.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// 00-23. Afternoon hours keep their leading digit ("13").
    #[default]
    TwentyFour,
    /// 01-12. Midnight and noon both read "12".
    Twelve,
}

impl HourFormat {
    /// Switch to the other format.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::TwentyFour => Self::Twelve,
            Self::Twelve => Self::TwentyFour,
        }
    }
}

// =============================================================================
// Clock Reading
// =============================================================================

/// Wall-clock time for one frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockReading {
    hour: u8,
    minute: u8,
    second: u8,
}

impl ClockReading {
    /// Build a reading from 24-hour clock fields. `None` if any field is out of range.
    pub const fn new(
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self { hour, minute, second })
    }

    /// Take a reading from any `chrono` time value.
    ///
    /// Leap seconds are reported by chrono through the nanosecond field, so
    /// `second()` is always in range here.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
        }
    }

    #[inline]
    pub const fn hour(&self) -> u8 { self.hour }

    #[inline]
    pub const fn minute(&self) -> u8 { self.minute }

    #[inline]
    pub const fn second(&self) -> u8 { self.second }

    #[inline]
    pub const fn meridiem(&self) -> Meridiem { Meridiem::from_hour(self.hour) }

    /// Hour value as it is shown on the face.
    pub const fn display_hour(
        &self,
        format: HourFormat,
    ) -> u8 {
        match format {
            HourFormat::TwentyFour => self.hour,
            HourFormat::Twelve => match self.hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }

    /// Format as `HH:MM:SS` with zero-padded fields.
    pub fn text(
        &self,
        format: HourFormat,
    ) -> TimeText {
        let mut text = TimeText::new();
        // Fields are range-checked on construction, so this fits exactly.
        write!(text, "{:02}:{:02}:{:02}", self.display_hour(format), self.minute, self.second).ok();
        text
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

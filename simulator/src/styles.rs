//! Pre-computed text styles.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use ledwatch_common::colors::LED_RED;
use profont::PROFONT_24_POINT;

/// Text centered on its position both ways. Used for toasts and AM/PM glyphs.
pub const CENTERED_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Lit LED text for the AM/PM glyphs (`ProFont` 24pt).
pub const MERIDIEM_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, LED_RED);

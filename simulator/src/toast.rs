//! Toast overlay with time-based expiration.

use std::time::Instant;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use ledwatch_common::Notification;
use ledwatch_common::colors::{BLACK, WHITE};

use crate::styles::CENTERED_MIDDLE;
use crate::timing::TOAST_DURATION;

const TOAST_WIDTH: u32 = 200;
const TOAST_HEIGHT: u32 = 36;
/// Distance of the toast's bottom edge from the bottom of the surface.
const TOAST_BOTTOM_MARGIN: u32 = 40;
const BORDER: u32 = 2;

const TEXT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);
const BORDER_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);
const BODY_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

/// A notification on screen since `shown_at`.
#[derive(Clone, Copy, Debug)]
pub struct Toast {
    notification: Notification,
    shown_at: Instant,
}

impl Toast {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification,
            shown_at: Instant::now(),
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool { self.shown_at.elapsed() >= TOAST_DURATION }

    /// Draw centered horizontally near the bottom of `bounds`.
    pub fn draw<D>(
        &self,
        display: &mut D,
        bounds: Size,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let top_left = Point::new(
            (bounds.width.saturating_sub(TOAST_WIDTH) / 2) as i32,
            bounds.height.saturating_sub(TOAST_BOTTOM_MARGIN + TOAST_HEIGHT) as i32,
        );
        let body = Rectangle::new(top_left, Size::new(TOAST_WIDTH, TOAST_HEIGHT));

        body.offset(BORDER as i32).into_styled(BORDER_FILL).draw(display).ok();
        body.into_styled(BODY_FILL).draw(display).ok();
        Text::with_text_style(self.notification.message(), body.center(), TEXT_STYLE, CENTERED_MIDDLE)
            .draw(display)
            .ok();
    }
}

//! Host-event adapter.
//!
//! [`WatchFaceEngine`] sits between a host's lifecycle callbacks and the pure
//! [`FrameRenderer`]. It keeps the little state a watch face needs between
//! frames (mode flags, panel properties, surface size, visibility) and owns
//! the per-second [`UpdateTimer`].
//!
//! The engine never draws on its own. Every [`HostEvent`] returns an
//! [`EngineResponse`] telling the host whether a redraw is due and whether
//! to show a notification; the host then calls [`WatchFaceEngine::draw`] or
//! [`WatchFaceEngine::render_frame`] when it suits it.
//!
//! # Timer Rule
//!
//! The timer runs only while the face is visible and not in ambient mode.
//! Every re-evaluation cancels the pending tick and, when the timer should
//! run, schedules the next one on the next whole second.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::background::BackgroundCache;
use crate::bitmap::Bitmap;
use crate::clock::{ClockReading, HourFormat};
use crate::config::{FaceConfig, next_tick_delay_ms};
use crate::glyphs::GlyphSet;
use crate::layout::ClockPlan;
use crate::mode::{DisplayMode, DisplayProperties, InterruptionFilter, ModeState};
use crate::render::FrameRenderer;
use crate::timer::UpdateTimer;

// =============================================================================
// Host Events
// =============================================================================

/// Kind of touch interaction reported by the host.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapType {
    /// Finger down.
    Touch,
    /// Finger down turned into some other gesture.
    TouchCancel,
    /// Finger down and up in place.
    Tap,
}

/// Lifecycle callbacks a host forwards to the engine.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    SurfaceCreated,
    SurfaceChanged { size: Size },
    PropertiesChanged(DisplayProperties),
    /// Minute tick, delivered by the host in every mode.
    TimeTick,
    AmbientModeChanged(bool),
    InterruptionFilterChanged(InterruptionFilter),
    Tap { kind: TapType, position: Point },
    VisibilityChanged(bool),
    TimeZoneChanged,
    /// The [`UpdateTimer`] deadline passed.
    TimerFired,
    Destroyed,
}

/// User-facing side effect requested by the engine.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// A tap completed at `position`.
    Tapped { position: Point },
}

impl Notification {
    #[inline]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Tapped { .. } => "The tap event has occurred",
        }
    }
}

/// What the host should do after an event.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineResponse {
    pub redraw: bool,
    pub notification: Option<Notification>,
}

impl EngineResponse {
    pub const NONE: Self = Self {
        redraw: false,
        notification: None,
    };

    pub const REDRAW: Self = Self {
        redraw: true,
        notification: None,
    };

    #[inline]
    const fn redraw_if(redraw: bool) -> Self {
        Self {
            redraw,
            notification: None,
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Watch face state driven by host events.
pub struct WatchFaceEngine<T: UpdateTimer> {
    timer: T,
    glyphs: GlyphSet,
    background: BackgroundCache,
    config: FaceConfig,
    state: ModeState,
    properties: DisplayProperties,
    visible: bool,
    /// Listening for time-zone changes (only while visible).
    time_zone_registered: bool,
    surface: Size,
    center: Point,
}

impl<T: UpdateTimer> WatchFaceEngine<T> {
    pub fn new(
        glyphs: GlyphSet,
        background: Bitmap,
        config: FaceConfig,
        timer: T,
    ) -> Self {
        Self {
            timer,
            glyphs,
            background: BackgroundCache::new(background),
            config,
            state: ModeState::new(),
            properties: DisplayProperties::default(),
            visible: false,
            time_zone_registered: false,
            surface: Size::zero(),
            center: Point::zero(),
        }
    }

    /// Apply one host event at wall-clock time `now_ms`.
    pub fn handle(
        &mut self,
        event: HostEvent,
        now_ms: u64,
    ) -> EngineResponse {
        log::trace!("host event {:?}", event);
        match event {
            HostEvent::SurfaceCreated => {
                self.state = ModeState::new();
                self.background.invalidate();
                self.surface = Size::zero();
                self.center = Point::zero();
                self.update_timer(now_ms);
                EngineResponse::REDRAW
            }
            HostEvent::SurfaceChanged { size } => {
                self.surface = size;
                self.center = Point::new(size.width as i32 / 2, size.height as i32 / 2);
                self.background.on_surface_changed(size, self.properties);
                EngineResponse::REDRAW
            }
            HostEvent::PropertiesChanged(properties) => {
                if properties != self.properties {
                    log::info!(
                        "display properties: low-bit ambient {}, burn-in protection {}",
                        properties.low_bit_ambient,
                        properties.burn_in_protection
                    );
                }
                self.properties = properties;
                EngineResponse::NONE
            }
            HostEvent::TimeTick => EngineResponse::REDRAW,
            HostEvent::AmbientModeChanged(ambient) => {
                if self.state.set_ambient(ambient) {
                    log::info!("display mode: {}", self.mode().label());
                }
                self.update_timer(now_ms);
                EngineResponse::REDRAW
            }
            HostEvent::InterruptionFilterChanged(filter) => {
                let changed = self.state.set_muted(filter.mutes());
                if changed {
                    log::info!("display mode: {}", self.mode().label());
                }
                EngineResponse::redraw_if(changed)
            }
            HostEvent::Tap { kind, position } => {
                let notification = match kind {
                    TapType::Tap => Some(Notification::Tapped { position }),
                    TapType::Touch | TapType::TouchCancel => None,
                };
                EngineResponse {
                    redraw: true,
                    notification,
                }
            }
            HostEvent::VisibilityChanged(visible) => {
                self.visible = visible;
                if visible {
                    self.register_time_zone_listener();
                } else {
                    self.unregister_time_zone_listener();
                }
                self.update_timer(now_ms);
                EngineResponse::redraw_if(visible)
            }
            HostEvent::TimeZoneChanged => EngineResponse::redraw_if(self.time_zone_registered),
            HostEvent::TimerFired => {
                if self.should_timer_run() {
                    self.timer.schedule(now_ms, next_tick_delay_ms(now_ms));
                }
                EngineResponse::REDRAW
            }
            HostEvent::Destroyed => {
                self.timer.cancel();
                self.unregister_time_zone_listener();
                EngineResponse::NONE
            }
        }
    }

    /// Cancel the pending tick and re-arm it if the timer should run.
    fn update_timer(
        &mut self,
        now_ms: u64,
    ) {
        self.timer.cancel();
        if self.should_timer_run() {
            self.timer.schedule(now_ms, next_tick_delay_ms(now_ms));
        }
    }

    #[inline]
    pub const fn should_timer_run(&self) -> bool { self.visible && !self.state.is_ambient() }

    fn register_time_zone_listener(&mut self) {
        if !self.time_zone_registered {
            self.time_zone_registered = true;
            log::debug!("time zone listener registered");
        }
    }

    fn unregister_time_zone_listener(&mut self) {
        if self.time_zone_registered {
            self.time_zone_registered = false;
            log::debug!("time zone listener unregistered");
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Renderer bound to the current assets, configuration and panel properties.
    pub fn renderer(&self) -> FrameRenderer<'_> {
        FrameRenderer::new(&self.glyphs, &self.background, &self.config, self.properties)
    }

    /// Render the current surface into a new bitmap.
    pub fn render_frame(
        &self,
        reading: &ClockReading,
    ) -> Bitmap {
        self.renderer().render(reading, self.mode(), self.surface)
    }

    /// Draw the current surface into `target`.
    pub fn draw<D>(
        &self,
        target: &mut D,
        reading: &ClockReading,
    ) -> Result<ClockPlan, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.renderer().draw_frame(target, reading, self.mode(), self.surface)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn mode(&self) -> DisplayMode { self.state.mode() }

    #[inline]
    pub const fn is_visible(&self) -> bool { self.visible }

    #[inline]
    pub const fn is_time_zone_registered(&self) -> bool { self.time_zone_registered }

    #[inline]
    pub const fn surface(&self) -> Size { self.surface }

    #[inline]
    pub const fn center(&self) -> Point { self.center }

    #[inline]
    pub const fn config(&self) -> &FaceConfig { &self.config }

    #[inline]
    pub const fn background(&self) -> &BackgroundCache { &self.background }

    #[inline]
    pub const fn timer(&self) -> &T { &self.timer }

    #[inline]
    pub fn timer_mut(&mut self) -> &mut T { &mut self.timer }

    /// Switch between 24- and 12-hour text. Takes effect on the next frame.
    pub fn set_hour_format(
        &mut self,
        hour_format: HourFormat,
    ) {
        self.config.hour_format = hour_format;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::image::GetPixel;

    use super::*;
    use crate::test_support::{marked_glyphs, split_background};
    use crate::timer::DeadlineTimer;

    const SURFACE: Size = Size::new(400, 400);

    /// 10:15:30.250 as milliseconds since midnight.
    const NOW: u64 = 36_930_250;

    fn engine() -> WatchFaceEngine<DeadlineTimer> {
        let mut engine = WatchFaceEngine::new(marked_glyphs(), split_background(), FaceConfig::new(), DeadlineTimer::new());
        engine.handle(HostEvent::SurfaceCreated, 0);
        engine.handle(HostEvent::SurfaceChanged { size: SURFACE }, 0);
        engine
    }

    fn visible_engine() -> WatchFaceEngine<DeadlineTimer> {
        let mut engine = engine();
        engine.handle(HostEvent::VisibilityChanged(true), NOW);
        engine
    }

    #[test]
    fn test_timer_waits_for_visibility() {
        let mut engine = engine();
        assert!(!engine.should_timer_run());
        assert!(!engine.timer().is_pending());

        let response = engine.handle(HostEvent::VisibilityChanged(true), NOW);
        assert!(response.redraw);
        assert!(engine.timer().is_pending());
        assert_eq!(engine.timer().deadline(), Some(36_931_000));
    }

    #[test]
    fn test_hidden_face_stops_timer() {
        let mut engine = visible_engine();
        let response = engine.handle(HostEvent::VisibilityChanged(false), NOW);
        assert!(!response.redraw);
        assert!(!engine.timer().is_pending());
    }

    #[test]
    fn test_ambient_stops_and_resumes_timer() {
        let mut engine = visible_engine();

        let response = engine.handle(HostEvent::AmbientModeChanged(true), NOW);
        assert!(response.redraw);
        assert_eq!(engine.mode(), DisplayMode::Ambient);
        assert!(!engine.timer().is_pending());

        let later = NOW + 61_450;
        engine.handle(HostEvent::AmbientModeChanged(false), later);
        assert_eq!(engine.mode(), DisplayMode::Active);
        let deadline = engine.timer().deadline().unwrap();
        assert!(deadline > later);
        assert_eq!(deadline % 1000, 0);
        assert_eq!(deadline - later, 300);
    }

    #[test]
    fn test_timer_fired_reschedules_on_next_second() {
        let mut engine = visible_engine();
        let fire_at = engine.timer().deadline().unwrap() + 3;
        assert!(engine.timer_mut().poll(fire_at));

        let response = engine.handle(HostEvent::TimerFired, fire_at);
        assert!(response.redraw);
        assert_eq!(engine.timer().deadline(), Some(36_932_000));
    }

    #[test]
    fn test_timer_fired_in_ambient_does_not_reschedule() {
        let mut engine = visible_engine();
        engine.handle(HostEvent::AmbientModeChanged(true), NOW);
        let response = engine.handle(HostEvent::TimerFired, NOW + 750);
        assert!(response.redraw);
        assert!(!engine.timer().is_pending());
    }

    #[test]
    fn test_mute_redraws_only_on_change() {
        let mut engine = visible_engine();
        assert!(!engine.handle(HostEvent::InterruptionFilterChanged(InterruptionFilter::All), NOW).redraw);
        assert!(!engine.handle(HostEvent::InterruptionFilterChanged(InterruptionFilter::Priority), NOW).redraw);

        assert!(engine.handle(HostEvent::InterruptionFilterChanged(InterruptionFilter::None), NOW).redraw);
        assert_eq!(engine.mode(), DisplayMode::Muted);
        assert!(!engine.handle(HostEvent::InterruptionFilterChanged(InterruptionFilter::None), NOW).redraw);

        // Muted keeps the per-second timer.
        assert!(engine.timer().is_pending());

        engine.handle(HostEvent::AmbientModeChanged(true), NOW);
        assert_eq!(engine.mode(), DisplayMode::Ambient);
        engine.handle(HostEvent::AmbientModeChanged(false), NOW);
        assert_eq!(engine.mode(), DisplayMode::Muted);

        assert!(engine.handle(HostEvent::InterruptionFilterChanged(InterruptionFilter::Alarms), NOW).redraw);
        assert_eq!(engine.mode(), DisplayMode::Active);
    }

    #[test]
    fn test_completed_tap_notifies() {
        let mut engine = visible_engine();
        let position = Point::new(120, 200);

        let response = engine.handle(HostEvent::Tap { kind: TapType::Touch, position }, NOW);
        assert_eq!(response, EngineResponse::REDRAW);

        let response = engine.handle(HostEvent::Tap { kind: TapType::TouchCancel, position }, NOW);
        assert_eq!(response, EngineResponse::REDRAW);

        let response = engine.handle(HostEvent::Tap { kind: TapType::Tap, position }, NOW);
        assert!(response.redraw);
        assert_eq!(response.notification, Some(Notification::Tapped { position }));
    }

    #[test]
    fn test_gray_background_built_once() {
        let mut engine = visible_engine();
        for _ in 0..5 {
            engine.handle(HostEvent::SurfaceChanged { size: SURFACE }, NOW);
            engine.handle(HostEvent::AmbientModeChanged(true), NOW);
            engine.handle(HostEvent::AmbientModeChanged(false), NOW);
        }
        assert_eq!(engine.background().desaturations(), 1);
        assert_eq!(engine.center(), Point::new(200, 200));
    }

    #[test]
    fn test_property_changes_never_rebuild_gray() {
        let mut engine = visible_engine();
        let low_bit = DisplayProperties {
            low_bit_ambient: true,
            burn_in_protection: false,
        };
        for _ in 0..5 {
            assert!(!engine.handle(HostEvent::PropertiesChanged(low_bit), NOW).redraw);
            assert!(engine.background().gray_for(SURFACE, low_bit).is_none());
        }
        engine.handle(HostEvent::PropertiesChanged(DisplayProperties::default()), NOW);
        assert!(engine.background().gray_for(SURFACE, DisplayProperties::default()).is_some());
        assert_eq!(engine.background().desaturations(), 1);
    }

    #[test]
    fn test_low_bit_panel_before_surface_skips_gray() {
        let mut engine = WatchFaceEngine::new(marked_glyphs(), split_background(), FaceConfig::new(), DeadlineTimer::new());
        let low_bit = DisplayProperties {
            low_bit_ambient: true,
            burn_in_protection: false,
        };
        engine.handle(HostEvent::SurfaceCreated, NOW);
        engine.handle(HostEvent::PropertiesChanged(low_bit), NOW);
        engine.handle(HostEvent::SurfaceChanged { size: SURFACE }, NOW);
        engine.handle(HostEvent::VisibilityChanged(true), NOW);
        engine.handle(HostEvent::AmbientModeChanged(true), NOW);

        assert_eq!(engine.background().desaturations(), 0);
        let frame = engine.render_frame(&ClockReading::new(13, 45, 7).unwrap());
        assert_eq!(frame.pixel(Point::zero()), Some(engine.config().ambient_fill));
    }

    #[test]
    fn test_properties_while_ambient_keep_timer_stopped() {
        let mut engine = visible_engine();
        engine.handle(HostEvent::AmbientModeChanged(true), NOW);
        engine.handle(
            HostEvent::PropertiesChanged(DisplayProperties {
                low_bit_ambient: false,
                burn_in_protection: true,
            }),
            NOW,
        );
        assert_eq!(engine.mode(), DisplayMode::Ambient);
        assert!(!engine.timer().is_pending());
    }

    #[test]
    fn test_time_zone_listener_follows_visibility() {
        let mut engine = engine();
        assert!(!engine.handle(HostEvent::TimeZoneChanged, NOW).redraw);

        engine.handle(HostEvent::VisibilityChanged(true), NOW);
        assert!(engine.is_time_zone_registered());
        assert!(engine.handle(HostEvent::TimeZoneChanged, NOW).redraw);

        engine.handle(HostEvent::VisibilityChanged(false), NOW);
        assert!(!engine.is_time_zone_registered());
        assert!(!engine.handle(HostEvent::TimeZoneChanged, NOW).redraw);
    }

    #[test]
    fn test_destroy_cancels_timer() {
        let mut engine = visible_engine();
        assert_eq!(engine.handle(HostEvent::Destroyed, NOW), EngineResponse::NONE);
        assert!(!engine.timer().is_pending());
        assert!(!engine.is_time_zone_registered());
    }

    #[test]
    fn test_time_tick_redraws_in_every_mode() {
        let mut engine = visible_engine();
        assert!(engine.handle(HostEvent::TimeTick, NOW).redraw);
        engine.handle(HostEvent::AmbientModeChanged(true), NOW);
        assert!(engine.handle(HostEvent::TimeTick, NOW).redraw);
    }

    #[test]
    fn test_frames_follow_surface_and_mode() {
        let mut engine = visible_engine();
        let reading = ClockReading::new(13, 45, 7).unwrap();
        let active = engine.render_frame(&reading);
        assert_eq!(active.size(), SURFACE);

        engine.handle(HostEvent::AmbientModeChanged(true), NOW);
        let ambient = engine.render_frame(&reading);
        assert_ne!(active, ambient);

        let mut target = Bitmap::filled(SURFACE, Rgb565::BLACK);
        let Ok(plan) = engine.draw(&mut target, &reading);
        assert_eq!(target, ambient);
        assert_eq!(plan.drawn_digits().count(), 6);
    }

    #[test]
    fn test_hour_format_switch() {
        let mut engine = visible_engine();
        engine.set_hour_format(HourFormat::Twelve);
        let plan = engine.renderer().plan(&ClockReading::new(13, 45, 7).unwrap());
        assert_eq!(plan.drawn_digits().count(), 5);
    }

    #[test]
    fn test_surface_created_resets_mode() {
        let mut engine = visible_engine();
        engine.handle(HostEvent::InterruptionFilterChanged(InterruptionFilter::None), NOW);
        engine.handle(HostEvent::SurfaceCreated, NOW);
        assert_eq!(engine.mode(), DisplayMode::Active);
        assert_eq!(engine.surface(), Size::zero());
        assert!(engine.background().scaled_for(SURFACE).is_none());
    }

    #[test]
    fn test_surface_created_in_ambient_restarts_timer() {
        let mut engine = visible_engine();
        engine.handle(HostEvent::AmbientModeChanged(true), NOW);
        assert!(!engine.timer().is_pending());

        engine.handle(HostEvent::SurfaceCreated, NOW);
        assert_eq!(engine.mode(), DisplayMode::Active);
        assert!(engine.should_timer_run());
        assert_eq!(engine.timer().deadline(), Some(36_931_000));
    }

    #[test]
    fn test_surface_created_while_hidden_keeps_timer_off() {
        let mut engine = engine();
        engine.handle(HostEvent::SurfaceCreated, NOW);
        assert!(!engine.timer().is_pending());
    }
}

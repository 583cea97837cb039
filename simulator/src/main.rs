//! LED watch face simulator for desktop.
//!
//! Plays the role of the watch host: it owns the window, turns keyboard and
//! mouse input into host events, polls the engine's update timer against the
//! wall clock and redraws whenever the engine asks for it.
//!
//! # Controls
//!
//! | Key / input | Host event |
//! |-------------|------------|
//! | `A` | Ambient mode on/off |
//! | `M` | Interruption filter `None` / `All` (mute) |
//! | `V` | Visibility on/off |
//! | `L` | Low-bit ambient panel on/off |
//! | `B` | Burn-in protection on/off |
//! | `H` | 24-hour / 12-hour text |
//! | `Z` | Simulated time-zone change |
//! | Mouse press / release | Touch / tap (cancelled if the pointer moved) |
//!
//! Usage: `simulator [BACKGROUND.rgb565 WIDTH]`

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod assets;
mod logging;
mod styles;
mod timing;
mod toast;

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use chrono::{Local, Timelike};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use ledwatch_common::colors::BLACK;
use ledwatch_common::{
    ClockReading,
    DeadlineTimer,
    DisplayProperties,
    EngineResponse,
    FaceConfig,
    HostEvent,
    InterruptionFilter,
    TapType,
    WatchFaceEngine,
};

use crate::logging::init_logging;
use crate::timing::FRAME_TIME;
use crate::toast::Toast;

/// Simulated watch surface.
const SURFACE: Size = Size::new(400, 400);

/// Pointer travel (in surface pixels) that turns a touch into a cancelled gesture.
const TAP_SLOP: i32 = 8;

/// Wall-clock milliseconds since the Unix epoch.
fn now_ms() -> u64 { Local::now().timestamp_millis().max(0) as u64 }

fn reading_now() -> ClockReading { ClockReading::from_time(&Local::now()) }

/// Host-side toggles mirrored into host events.
#[derive(Default)]
struct HostState {
    ambient: bool,
    muted: bool,
    visible: bool,
    properties: DisplayProperties,
    touch_start: Option<Point>,
}

/// Forward one event to the engine. Returns whether a redraw was requested.
fn dispatch(
    engine: &mut WatchFaceEngine<DeadlineTimer>,
    toast: &mut Option<Toast>,
    event: HostEvent,
) -> bool {
    let EngineResponse { redraw, notification } = engine.handle(event, now_ms());
    if let Some(notification) = notification {
        log::info!("{}", notification.message());
        *toast = Some(Toast::new(notification));
    }
    redraw
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let background = match (std::env::args().nth(1), std::env::args().nth(2)) {
        (Some(path), Some(width)) => {
            let width: u32 = width.parse().with_context(|| format!("invalid background width {width:?}"))?;
            assets::load_background(&PathBuf::from(path), width)?
        }
        (Some(_), None) => anyhow::bail!("usage: simulator [BACKGROUND.rgb565 WIDTH]"),
        _ => assets::gradient_background()?,
    };

    let mut engine = WatchFaceEngine::new(assets::led_glyphs(), background, FaceConfig::new(), DeadlineTimer::new());
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(SURFACE);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("LED Watch Face", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);
    log::info!("keys: A ambient, M mute, V visibility, L low-bit, B burn-in, H 12/24h, Z time zone");

    let mut host = HostState {
        visible: true,
        ..HostState::default()
    };
    let mut toast: Option<Toast> = None;
    let mut redraw = false;

    for event in [
        HostEvent::SurfaceCreated,
        HostEvent::PropertiesChanged(host.properties),
        HostEvent::SurfaceChanged { size: SURFACE },
        HostEvent::VisibilityChanged(true),
    ] {
        redraw |= dispatch(&mut engine, &mut toast, event);
    }

    let mut last_minute = Local::now().minute();

    loop {
        let frame_start = Instant::now();

        let mut events = Vec::new();
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    dispatch(&mut engine, &mut toast, HostEvent::Destroyed);
                    log::info!("simulator closed");
                    return Ok(());
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::A => {
                            host.ambient = !host.ambient;
                            events.push(HostEvent::AmbientModeChanged(host.ambient));
                        }
                        Keycode::M => {
                            host.muted = !host.muted;
                            let filter = if host.muted { InterruptionFilter::None } else { InterruptionFilter::All };
                            events.push(HostEvent::InterruptionFilterChanged(filter));
                        }
                        Keycode::V => {
                            host.visible = !host.visible;
                            events.push(HostEvent::VisibilityChanged(host.visible));
                        }
                        Keycode::L => {
                            host.properties.low_bit_ambient = !host.properties.low_bit_ambient;
                            events.push(HostEvent::PropertiesChanged(host.properties));
                            redraw = true;
                        }
                        Keycode::B => {
                            host.properties.burn_in_protection = !host.properties.burn_in_protection;
                            events.push(HostEvent::PropertiesChanged(host.properties));
                            redraw = true;
                        }
                        Keycode::H => {
                            let format = engine.config().hour_format.toggle();
                            engine.set_hour_format(format);
                            log::info!("hour format: {format:?}");
                            redraw = true;
                        }
                        Keycode::Z => events.push(HostEvent::TimeZoneChanged),
                        _ => {}
                    }
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    host.touch_start = Some(point);
                    events.push(HostEvent::Tap {
                        kind: TapType::Touch,
                        position: point,
                    });
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    let moved = host.touch_start.take().is_some_and(|start| {
                        let delta = point - start;
                        delta.x.abs() > TAP_SLOP || delta.y.abs() > TAP_SLOP
                    });
                    let kind = if moved { TapType::TouchCancel } else { TapType::Tap };
                    events.push(HostEvent::Tap { kind, position: point });
                }
                _ => {}
            }
        }
        for event in events {
            redraw |= dispatch(&mut engine, &mut toast, event);
        }

        if engine.timer_mut().poll(now_ms()) {
            redraw |= dispatch(&mut engine, &mut toast, HostEvent::TimerFired);
        }

        // The host's own once-a-minute tick, delivered in every mode.
        let minute = Local::now().minute();
        if minute != last_minute {
            last_minute = minute;
            redraw |= dispatch(&mut engine, &mut toast, HostEvent::TimeTick);
        }

        if let Some(ref active) = toast
            && active.is_expired()
        {
            toast = None;
            redraw = true;
        }

        if redraw && host.visible {
            engine.draw(&mut display, &reading_now()).ok();
            if let Some(ref active) = toast {
                active.draw(&mut display, SURFACE);
            }
            redraw = false;
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

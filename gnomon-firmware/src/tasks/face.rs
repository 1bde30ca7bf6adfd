//! Face task
//!
//! Owns the face controller and the display. Events arrive on one channel
//! so handlers run strictly one at a time; every handler's effects are
//! executed in order before the next event is taken.
//!
//! The `WatchBattery`/`WatchConnectivity` effects gate which events reach
//! the controller, but the latest battery and link readings are always
//! cached so option updates can re-sample the current hardware state.

use defmt::*;
use embedded_graphics::pixelcolor::BinaryColor;

use gnomon_core::clock::WallClock;
use gnomon_core::face::{BatteryReading, Effect, Effects, FaceController, TickGranularity};
use gnomon_core::options::Options;
use gnomon_face::{draw_face, Theme};
use gnomon_protocol::WatchMessage;

use crate::channels::{
    FaceEvent, FACE_EVENTS, OUTBOUND, RESYNC_REQUEST, SAVE_OPTIONS, TICK_MODE, VIBES,
};
use crate::display::SharpLcd;
use crate::timebase;

/// Face task - main coordination loop
#[embassy_executor::task]
pub async fn face_task(mut display: SharpLcd<'static>, options: Options) {
    info!("Face task started");

    // Battery is assumed full until the battery task's first sample,
    // which arrives within one poll interval
    let mut battery = BatteryReading {
        percent: 100,
        charging: false,
    };
    let mut link_up = false;
    let mut watch_battery = true;
    let mut watch_link = true;

    let mut face = FaceController::new(options, battery, link_up);

    // Publish current option values to the companion
    let report = WatchMessage::OptionsReport {
        values: face.options().report_values(),
    };
    if OUTBOUND.try_send(report).is_err() {
        warn!("Outbound channel full, dropping options report");
    }

    let clock = timebase::now();
    let effects = face.startup_effects(&clock);
    run_effects(
        &mut face,
        &mut display,
        &clock,
        &effects,
        &mut watch_battery,
        &mut watch_link,
    );

    loop {
        let event = FACE_EVENTS.receive().await;
        let now = timebase::now();

        let effects = match event {
            FaceEvent::Tick {
                clock,
                units,
                granularity,
            } => match granularity {
                TickGranularity::PerMinute => face.tick_minute(&clock, units),
                TickGranularity::PerSecond => face.tick_second(&clock, units),
            },
            FaceEvent::Battery(reading) => {
                battery = reading;
                if watch_battery {
                    face.handle_battery(reading)
                } else {
                    Effects::new()
                }
            }
            FaceEvent::Connection(up) => {
                link_up = up;
                if watch_link {
                    face.handle_connection(up)
                } else {
                    Effects::new()
                }
            }
            FaceEvent::Update(update) => face.apply_update(update, battery, link_up),
            FaceEvent::Resync => face.resync(&now),
        };

        run_effects(
            &mut face,
            &mut display,
            &now,
            &effects,
            &mut watch_battery,
            &mut watch_link,
        );
    }
}

/// Execute one handler's effects in order
fn run_effects(
    face: &mut FaceController,
    display: &mut SharpLcd<'static>,
    clock: &WallClock,
    effects: &Effects,
    watch_battery: &mut bool,
    watch_link: &mut bool,
) {
    let mut redraw = false;

    for effect in effects {
        match effect {
            Effect::RetickTimer(granularity) => {
                TICK_MODE.signal(*granularity);
            }
            Effect::Vibrate(pattern) => {
                if VIBES.try_send(*pattern).is_err() {
                    warn!("Vibe queue full, dropping pattern");
                }
            }
            // The display is a single framebuffer, so partial refreshes
            // collapse into a full redraw; only changed lines are flushed
            Effect::Redraw | Effect::RefreshNumber | Effect::RefreshCalendar => {
                redraw = true;
            }
            Effect::WatchBattery(enabled) => {
                *watch_battery = *enabled;
            }
            Effect::WatchConnectivity(enabled) => {
                *watch_link = *enabled;
            }
            Effect::SaveOptions => {
                if SAVE_OPTIONS.try_send(*face.options()).is_err() {
                    warn!("Save queue full, dropping options snapshot");
                }
            }
            Effect::ScheduleResync => {
                RESYNC_REQUEST.signal(());
            }
        }
    }

    if redraw {
        draw(face, display, clock);
    }
}

fn draw(face: &mut FaceController, display: &mut SharpLcd<'static>, clock: &WallClock) {
    let plan = face.take_redraw(clock, timebase::CLOCK_STYLE);
    let theme = Theme::from_palette(plan.palette, BinaryColor::Off, BinaryColor::On);

    // The framebuffer target cannot fail; SPI errors surface at flush
    let _ = draw_face(display, &plan, clock, &theme);
    if display.flush().is_err() {
        warn!("Display flush failed");
    }
}

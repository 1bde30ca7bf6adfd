//! Tick task
//!
//! Drives the face at the requested granularity. The base timer always
//! runs at 1 Hz so rollovers are observed on the boundary; per-minute
//! mode filters the stream down to ticks where a minute (or coarser)
//! field actually changed. A granularity change tears the ticker down
//! and rebuilds it, even when the mode is unchanged.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use gnomon_core::clock::TickUnits;
use gnomon_core::face::TickGranularity;

use crate::channels::{FaceEvent, FACE_EVENTS, TICK_MODE};
use crate::timebase;

/// Tick task - sends clock ticks at the granularity the face requested
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut mode = TickGranularity::PerMinute;
    let mut ticker = Ticker::every(Duration::from_secs(1));
    let mut prev = timebase::now();

    loop {
        match select(TICK_MODE.wait(), ticker.next()).await {
            Either::First(new_mode) => {
                debug!("Tick granularity: {:?}", new_mode);
                mode = new_mode;
                ticker = Ticker::every(Duration::from_secs(1));
            }
            Either::Second(()) => {
                let now = timebase::now();
                let units = TickUnits::between(&prev, &now);
                prev = now;

                let deliver = match mode {
                    TickGranularity::PerSecond => units.second || units.minute,
                    TickGranularity::PerMinute => units.minute || units.hour || units.day,
                };
                if !deliver {
                    continue;
                }

                let event = FaceEvent::Tick {
                    clock: now,
                    units,
                    granularity: mode,
                };
                if FACE_EVENTS.try_send(event).is_err() {
                    warn!("Face channel full, dropping tick");
                }
            }
        }
    }
}

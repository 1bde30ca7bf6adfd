//! Deferred clock-resync one-shot
//!
//! After the companion reconnects, the host clock may still be settling
//! (a time-zone change, for example). The face requests a resync and this
//! task delivers it after a fixed settle delay, without ever blocking the
//! event dispatch path.

use defmt::*;
use embassy_time::{Duration, Timer};

use crate::channels::{FaceEvent, FACE_EVENTS, RESYNC_REQUEST};

/// Settle time between the reconnect and the forced calendar refresh
const RESYNC_SETTLE: Duration = Duration::from_secs(10);

/// Resync task - arms on request, fires once after the settle delay
#[embassy_executor::task]
pub async fn resync_task() {
    info!("Resync task started");

    loop {
        RESYNC_REQUEST.wait().await;
        Timer::after(RESYNC_SETTLE).await;
        debug!("Resync settle elapsed, refreshing calendar");
        if FACE_EVENTS.try_send(FaceEvent::Resync).is_err() {
            warn!("Face channel full, dropping resync");
        }
    }
}

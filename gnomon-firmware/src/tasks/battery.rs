//! Battery sense task
//!
//! Samples the battery voltage (VSYS through the on-board 1:3 divider on
//! ADC0) and the charger sense pin, and reports a new reading whenever
//! either the percentage or the charging state changes.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use gnomon_core::face::BatteryReading;

use crate::channels::{FaceEvent, FACE_EVENTS};

/// Sample interval
const SAMPLE_INTERVAL: Duration = Duration::from_secs(5);

/// Battery voltage range mapped linearly onto 0-100%
const EMPTY_MV: u32 = 3300;
const FULL_MV: u32 = 4200;

/// Battery task - polls charge state and feeds changes to the face
#[embassy_executor::task]
pub async fn battery_task(
    mut adc: Adc<'static, Async>,
    mut vsys_channel: Channel<'static>,
    charger_sense: Input<'static>,
) {
    info!("Battery task started");

    let mut ticker = Ticker::every(SAMPLE_INTERVAL);
    let mut last: Option<BatteryReading> = None;

    loop {
        match adc.read(&mut vsys_channel).await {
            Ok(raw) => {
                let reading = BatteryReading {
                    percent: percent_from_raw(raw),
                    charging: charger_sense.is_high(),
                };
                if last != Some(reading) {
                    debug!("Battery: {}%, charging={}", reading.percent, reading.charging);
                    last = Some(reading);
                    if FACE_EVENTS.try_send(FaceEvent::Battery(reading)).is_err() {
                        warn!("Face channel full, dropping battery reading");
                    }
                }
            }
            Err(e) => {
                warn!("ADC read failed: {:?}", e);
            }
        }

        ticker.next().await;
    }
}

/// Convert a 12-bit VSYS sample to a charge percentage
fn percent_from_raw(raw: u16) -> u8 {
    // 3.3V reference, 12-bit resolution, 1:3 divider
    let mv = raw as u32 * 3300 / 4096 * 3;
    let mv = mv.clamp(EMPTY_MV, FULL_MV);
    ((mv - EMPTY_MV) * 100 / (FULL_MV - EMPTY_MV)) as u8
}

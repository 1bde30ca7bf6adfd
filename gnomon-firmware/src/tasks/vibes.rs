//! Vibration motor task
//!
//! Runs the haptic patterns the face requests. Patterns are played to
//! completion in queue order; a burst beyond the queue depth is dropped.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use gnomon_core::face::VibePattern;

use crate::channels::VIBES;

const SHORT_MS: u64 = 100;
const LONG_MS: u64 = 500;
const DOUBLE_GAP_MS: u64 = 100;

/// Controller for the vibration motor
pub struct VibrationMotor<'d> {
    /// High = on
    control_pin: Output<'d>,
}

impl<'d> VibrationMotor<'d> {
    pub fn new(control_pin: Output<'d>) -> Self {
        Self { control_pin }
    }

    /// Pulse the motor once for the given duration
    pub async fn pulse(&mut self, duration_ms: u64) {
        self.control_pin.set_high();
        Timer::after_millis(duration_ms).await;
        self.control_pin.set_low();
    }
}

/// Vibration task - plays queued patterns
#[embassy_executor::task]
pub async fn vibes_task(mut motor: VibrationMotor<'static>) {
    info!("Vibration task started");

    loop {
        let pattern = VIBES.receive().await;
        trace!("Vibe: {:?}", pattern);
        match pattern {
            VibePattern::Short => motor.pulse(SHORT_MS).await,
            VibePattern::Long => motor.pulse(LONG_MS).await,
            VibePattern::Double => {
                motor.pulse(SHORT_MS).await;
                Timer::after_millis(DOUBLE_GAP_MS).await;
                motor.pulse(SHORT_MS).await;
            }
        }
    }
}

//! The face controller
//!
//! Owns every piece of mutable face state (options, charging flags, link
//! state, battery gauge index) and turns events into state mutations plus
//! an ordered effect list. The event wiring executes all effects before
//! dispatching the next event, so handlers see a consistent world.

use gnomon_protocol::OptionUpdate;

use crate::clock::{ClockStyle, TickUnits, WallClock};
use crate::face::effects::{Effect, Effects, TickGranularity, VibePattern};
use crate::face::redraw::{HandFill, Palette, RedrawPlan};
use crate::hands::battery_hand_index;
use crate::options::Options;

/// A battery state sample: charge percentage plus charger sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryReading {
    /// Charge percentage, 0-100
    pub percent: u8,
    /// External power present
    pub charging: bool,
}

/// All mutable face state and the handlers that drive it
#[derive(Debug)]
pub struct FaceController {
    options: Options,
    is_charging: bool,
    /// Blank-the-hand phase of the charge blink; meaningful only while
    /// charging, cleared when a plan is taken
    black_charging: bool,
    was_connected: bool,
    battery_index: usize,
}

impl FaceController {
    /// Build the controller from startup peeks of battery and link state
    pub fn new(options: Options, battery: BatteryReading, connected: bool) -> Self {
        Self {
            options,
            is_charging: battery.charging,
            // Start blanked while on the charger so the first blink
            // phase is consistent
            black_charging: battery.charging,
            was_connected: connected,
            battery_index: battery_hand_index(battery.percent),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn is_charging(&self) -> bool {
        self.is_charging
    }

    pub fn battery_index(&self) -> usize {
        self.battery_index
    }

    /// The tick granularity the current state calls for
    pub fn granularity(&self) -> TickGranularity {
        if self.options.charge_blink == 1 && self.is_charging {
            TickGranularity::PerSecond
        } else {
            TickGranularity::PerMinute
        }
    }

    /// Effects to run once after construction: first calendar/number
    /// refresh, initial timer arming, event source gating
    pub fn startup_effects(&mut self, clock: &WallClock) -> Effects {
        let mut effects = Effects::new();
        self.minute_logic(clock, TickUnits::DAY, &mut effects);
        push(&mut effects, Effect::RetickTimer(self.granularity()));
        push(&mut effects, Effect::Redraw);
        push(
            &mut effects,
            Effect::WatchConnectivity(self.options.bluetooth_vibe == 1),
        );
        push(
            &mut effects,
            Effect::WatchBattery(self.options.battery_hand == 1 || self.options.charge_blink == 1),
        );
        effects
    }

    /// Minute-granularity tick
    pub fn tick_minute(&mut self, clock: &WallClock, units: TickUnits) -> Effects {
        let mut effects = Effects::new();
        self.minute_logic(clock, units, &mut effects);
        effects
    }

    /// Second-granularity tick, active while the charge blink runs
    ///
    /// Derives the blink phase from second parity every call, then re-runs
    /// the minute logic for day or hour rollovers so calendar text and the
    /// hourly vibe stay current on the fast timer.
    pub fn tick_second(&mut self, clock: &WallClock, units: TickUnits) -> Effects {
        let mut effects = Effects::new();
        self.black_charging = clock.second % 2 != 0;
        push(&mut effects, Effect::Redraw);

        if units.day {
            self.minute_logic(clock, TickUnits::DAY, &mut effects);
        } else if units.hour {
            self.minute_logic(clock, TickUnits::HOUR, &mut effects);
        }
        effects
    }

    /// Battery state change
    ///
    /// The gauge index is regenerated unconditionally; charging-edge
    /// transitions re-arm the tick timer, and a charge start with the
    /// blink enabled begins in the blanked phase.
    pub fn handle_battery(&mut self, battery: BatteryReading) -> Effects {
        let mut effects = Effects::new();
        self.battery_index = battery_hand_index(battery.percent);

        if !battery.charging && self.is_charging {
            self.is_charging = false;
            self.black_charging = false;
            push(&mut effects, Effect::RetickTimer(self.granularity()));
        }
        if !self.is_charging && battery.charging {
            self.is_charging = true;
            if self.options.charge_blink == 1 {
                push(&mut effects, Effect::RetickTimer(self.granularity()));
                self.black_charging = true;
            }
        }
        push(&mut effects, Effect::Redraw);
        effects
    }

    /// Companion-link connectivity change
    ///
    /// Connect also schedules the deferred resync: the clock may have
    /// shifted (time zone change), so a calendar refresh runs after a
    /// settle delay instead of reading a possibly stale clock now.
    pub fn handle_connection(&mut self, connected: bool) -> Effects {
        let mut effects = Effects::new();
        if !connected && self.was_connected {
            self.was_connected = false;
            push(&mut effects, Effect::Vibrate(VibePattern::Long));
        } else if connected && !self.was_connected {
            self.was_connected = true;
            push(&mut effects, Effect::Vibrate(VibePattern::Double));
            push(&mut effects, Effect::ScheduleResync);
        }
        effects
    }

    /// The deferred resync one-shot fired: force a full calendar refresh
    pub fn resync(&mut self, clock: &WallClock) -> Effects {
        let mut effects = Effects::new();
        self.minute_logic(clock, TickUnits::DAY, &mut effects);
        effects
    }

    /// Apply one synced option update
    ///
    /// `battery` and `connected` are fresh peeks of the current hardware
    /// state; several transitions re-sample them rather than trusting
    /// cached values. Every applied update ends with a persistence save.
    pub fn apply_update(
        &mut self,
        update: OptionUpdate,
        battery: BatteryReading,
        connected: bool,
    ) -> Effects {
        let mut effects = Effects::new();
        match update {
            OptionUpdate::BluetoothVibe(v) => {
                self.options.bluetooth_vibe = v;
                self.was_connected = connected;
                push(&mut effects, Effect::WatchConnectivity(v == 1));
            }
            OptionUpdate::HourlyVibe(v) => {
                self.options.hourly_vibe = v;
            }
            OptionUpdate::BatteryHand(v) => {
                self.options.battery_hand = v;
                if v == 0 && self.options.charge_blink == 0 {
                    push(&mut effects, Effect::WatchBattery(false));
                } else {
                    self.battery_index = battery_hand_index(battery.percent);
                    if self.options.charge_blink == 0 {
                        push(&mut effects, Effect::WatchBattery(true));
                    }
                }
                push(&mut effects, Effect::Redraw);
            }
            OptionUpdate::ChargeBlink(v) => {
                self.options.charge_blink = v;
                self.is_charging = battery.charging;
                push(&mut effects, Effect::RetickTimer(self.granularity()));
                if v == 0 && self.options.battery_hand == 0 {
                    push(&mut effects, Effect::WatchBattery(true));
                }
            }
            OptionUpdate::InvertedColors(v) => {
                self.options.inverted_colors = v;
                push(&mut effects, Effect::Redraw);
            }
            OptionUpdate::MinuteHands(v) => {
                self.options.minute_hands = v;
                push(&mut effects, Effect::Redraw);
            }
        }
        push(&mut effects, Effect::SaveOptions);
        effects
    }

    /// Produce the plan for the next frame
    ///
    /// The blink flag is cleared on read: a blanked frame is drawn once
    /// and the next invocation draws normally unless the per-second tick
    /// re-blanks it.
    pub fn take_redraw(&mut self, clock: &WallClock, style: ClockStyle) -> RedrawPlan {
        let number = if self.options.minute_hands == 0 {
            clock.minute
        } else {
            match style {
                ClockStyle::H24 => clock.hour,
                ClockStyle::H12 => clock.hour_12(),
            }
        };

        let angle = if self.options.minute_hands == 1 {
            crate::hands::minute_angle(clock.minute)
        } else {
            crate::hands::hour_angle(clock.hour)
        };

        let skip_hands = self.black_charging;
        self.black_charging = false;

        let fill = if self.options.battery_hand == 1 {
            HandFill::Battery {
                index: self.battery_index,
            }
        } else {
            HandFill::Hour
        };

        RedrawPlan {
            skip_hands,
            palette: Palette::from_options(&self.options),
            number,
            angle,
            fill,
        }
    }

    fn minute_logic(&mut self, _clock: &WallClock, units: TickUnits, effects: &mut Effects) {
        if units.day {
            push(effects, Effect::RefreshCalendar);
        }
        if units.hour && self.options.hourly_vibe == 1 {
            push(effects, Effect::Vibrate(VibePattern::Short));
        }

        if self.options.minute_hands == 0 {
            if units.hour {
                push(effects, Effect::Redraw);
            } else {
                // The hand only moves on the hour; the number still
                // advances every minute
                push(effects, Effect::RefreshNumber);
            }
        } else {
            push(effects, Effect::Redraw);
        }
    }
}

/// Effect lists are sized for the longest handler; overflow would mean a
/// handler grew past that bound, which is a logic error, so drop silently
/// rather than panic
fn push(effects: &mut Effects, effect: Effect) {
    let _ = effects.push(effect);
}

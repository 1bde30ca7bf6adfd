//! Option keys and updates pushed by the companion application
//!
//! Each user-configurable display option has a fixed key in a flat
//! namespace shared with the phone side and with persistent storage.

/// Key identifiers for the synced options
///
/// The values double as persistent-storage slot numbers, so they must
/// never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OptionKey {
    /// Vibrate on companion-link connect/disconnect
    BluetoothVibe = 0x00,
    /// Short vibe at the top of every hour
    HourlyVibe = 0x01,
    /// Draw the hand as a battery gauge instead of the plain hour hand
    BatteryHand = 0x02,
    /// Flash the hand off every other second while charging
    ChargeBlink = 0x03,
    /// Dark-on-light palette instead of light-on-dark
    InvertedColors = 0x04,
    /// Hand and number show minutes instead of hours
    MinuteHands = 0x05,
}

impl OptionKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(OptionKey::BluetoothVibe),
            0x01 => Some(OptionKey::HourlyVibe),
            0x02 => Some(OptionKey::BatteryHand),
            0x03 => Some(OptionKey::ChargeBlink),
            0x04 => Some(OptionKey::InvertedColors),
            0x05 => Some(OptionKey::MinuteHands),
            _ => None,
        }
    }

    /// All syncable option keys, in key order
    pub const ALL: [OptionKey; 6] = [
        OptionKey::BluetoothVibe,
        OptionKey::HourlyVibe,
        OptionKey::BatteryHand,
        OptionKey::ChargeBlink,
        OptionKey::InvertedColors,
        OptionKey::MinuteHands,
    ];
}

/// A single option update received from the companion application
///
/// One variant per key so the receiver handles every option exhaustively;
/// unrecognized keys never construct an update and are logged and dropped
/// at the link boundary.
///
/// Values are nominally 0 or 1 but carried as raw bytes - out-of-range
/// values are accepted and treated truthy by the face logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OptionUpdate {
    BluetoothVibe(u8),
    HourlyVibe(u8),
    BatteryHand(u8),
    ChargeBlink(u8),
    InvertedColors(u8),
    MinuteHands(u8),
}

impl OptionUpdate {
    /// Build an update from a raw (key, value) pair
    ///
    /// Returns `None` for unrecognized keys.
    pub fn from_key_value(key: u8, value: u8) -> Option<Self> {
        Some(match OptionKey::from_u8(key)? {
            OptionKey::BluetoothVibe => OptionUpdate::BluetoothVibe(value),
            OptionKey::HourlyVibe => OptionUpdate::HourlyVibe(value),
            OptionKey::BatteryHand => OptionUpdate::BatteryHand(value),
            OptionKey::ChargeBlink => OptionUpdate::ChargeBlink(value),
            OptionKey::InvertedColors => OptionUpdate::InvertedColors(value),
            OptionKey::MinuteHands => OptionUpdate::MinuteHands(value),
        })
    }

    /// The key this update addresses
    pub fn key(&self) -> OptionKey {
        match self {
            OptionUpdate::BluetoothVibe(_) => OptionKey::BluetoothVibe,
            OptionUpdate::HourlyVibe(_) => OptionKey::HourlyVibe,
            OptionUpdate::BatteryHand(_) => OptionKey::BatteryHand,
            OptionUpdate::ChargeBlink(_) => OptionKey::ChargeBlink,
            OptionUpdate::InvertedColors(_) => OptionKey::InvertedColors,
            OptionUpdate::MinuteHands(_) => OptionKey::MinuteHands,
        }
    }

    /// The raw value carried by this update
    pub fn value(&self) -> u8 {
        match self {
            OptionUpdate::BluetoothVibe(v)
            | OptionUpdate::HourlyVibe(v)
            | OptionUpdate::BatteryHand(v)
            | OptionUpdate::ChargeBlink(v)
            | OptionUpdate::InvertedColors(v)
            | OptionUpdate::MinuteHands(v) => *v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_byte_roundtrip() {
        for key in OptionKey::ALL {
            assert_eq!(OptionKey::from_u8(key.as_u8()), Some(key));
        }
    }

    #[test]
    fn unknown_keys_rejected() {
        assert_eq!(OptionKey::from_u8(0x06), None);
        assert_eq!(OptionKey::from_u8(0x10), None); // storage version is not syncable
        assert_eq!(OptionUpdate::from_key_value(0x42, 1), None);
    }

    #[test]
    fn update_carries_key_and_value() {
        let update = OptionUpdate::from_key_value(0x03, 1).unwrap();
        assert_eq!(update, OptionUpdate::ChargeBlink(1));
        assert_eq!(update.key(), OptionKey::ChargeBlink);
        assert_eq!(update.value(), 1);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let update = OptionUpdate::from_key_value(0x00, 7).unwrap();
        assert_eq!(update.value(), 7);
    }
}

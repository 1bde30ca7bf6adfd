//! Options store: the six synced display flags plus the storage version
//!
//! Options live in seven scalar flash slots keyed by [`OptionSlot`]. They
//! are loaded once at startup (per-slot default when a slot is absent),
//! mutated only by the sync receiver, and written back whole.

use gnomon_protocol::{OptionKey, OptionUpdate};

/// Persistent-storage slot identifiers
///
/// The syncable slots reuse the companion-link key numbers; renumbering
/// would corrupt existing flash contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OptionSlot {
    BluetoothVibe = 0x00,
    HourlyVibe = 0x01,
    BatteryHand = 0x02,
    ChargeBlink = 0x03,
    InvertedColors = 0x04,
    MinuteHands = 0x05,
    /// Layout version of the stored slots, not syncable
    StorageVersion = 0x10,
}

impl OptionSlot {
    /// Get the slot as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a slot from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(OptionSlot::BluetoothVibe),
            0x01 => Some(OptionSlot::HourlyVibe),
            0x02 => Some(OptionSlot::BatteryHand),
            0x03 => Some(OptionSlot::ChargeBlink),
            0x04 => Some(OptionSlot::InvertedColors),
            0x05 => Some(OptionSlot::MinuteHands),
            0x10 => Some(OptionSlot::StorageVersion),
            _ => None,
        }
    }

    /// All slots, in storage order
    pub const ALL: [OptionSlot; 7] = [
        OptionSlot::BluetoothVibe,
        OptionSlot::HourlyVibe,
        OptionSlot::BatteryHand,
        OptionSlot::ChargeBlink,
        OptionSlot::InvertedColors,
        OptionSlot::MinuteHands,
        OptionSlot::StorageVersion,
    ];

    /// The slot backing a syncable option key
    pub fn from_key(key: OptionKey) -> Self {
        match key {
            OptionKey::BluetoothVibe => OptionSlot::BluetoothVibe,
            OptionKey::HourlyVibe => OptionSlot::HourlyVibe,
            OptionKey::BatteryHand => OptionSlot::BatteryHand,
            OptionKey::ChargeBlink => OptionSlot::ChargeBlink,
            OptionKey::InvertedColors => OptionSlot::InvertedColors,
            OptionKey::MinuteHands => OptionSlot::MinuteHands,
        }
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for OptionSlot {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match OptionSlot::from_u8(buffer[0]) {
            Some(slot) => Ok((slot, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}

/// Errors from the options store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Slot value failed to encode or decode
    Codec,
    /// Underlying flash operation failed
    Flash,
}

/// The synced display options
///
/// Flags are nominally 0 or 1 but kept as raw bytes; callers treat any
/// nonzero value as set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Vibrate on companion-link connect/disconnect
    pub bluetooth_vibe: u8,
    /// Short vibe at the top of every hour
    pub hourly_vibe: u8,
    /// Draw the hand as a battery gauge
    pub battery_hand: u8,
    /// Flash the hand off every other second while charging
    pub charge_blink: u8,
    /// Dark-on-light palette
    pub inverted_colors: u8,
    /// Hand shows minutes, centered number shows the hour
    pub minute_hands: u8,
    /// Layout version of the persisted slots
    pub storage_version: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bluetooth_vibe: 1,
            hourly_vibe: 0,
            battery_hand: 1,
            charge_blink: 1,
            inverted_colors: 0,
            minute_hands: 0,
            storage_version: 2,
        }
    }
}

impl Options {
    /// Default value for one slot
    pub fn default_for(slot: OptionSlot) -> u8 {
        Options::default().get(slot)
    }

    /// Read one slot's current value
    pub fn get(&self, slot: OptionSlot) -> u8 {
        match slot {
            OptionSlot::BluetoothVibe => self.bluetooth_vibe,
            OptionSlot::HourlyVibe => self.hourly_vibe,
            OptionSlot::BatteryHand => self.battery_hand,
            OptionSlot::ChargeBlink => self.charge_blink,
            OptionSlot::InvertedColors => self.inverted_colors,
            OptionSlot::MinuteHands => self.minute_hands,
            OptionSlot::StorageVersion => self.storage_version,
        }
    }

    /// Write one slot's value
    pub fn set(&mut self, slot: OptionSlot, value: u8) {
        match slot {
            OptionSlot::BluetoothVibe => self.bluetooth_vibe = value,
            OptionSlot::HourlyVibe => self.hourly_vibe = value,
            OptionSlot::BatteryHand => self.battery_hand = value,
            OptionSlot::ChargeBlink => self.charge_blink = value,
            OptionSlot::InvertedColors => self.inverted_colors = value,
            OptionSlot::MinuteHands => self.minute_hands = value,
            OptionSlot::StorageVersion => self.storage_version = value,
        }
    }

    /// Assemble options from loaded slot values
    ///
    /// `loaded` maps each slot (in [`OptionSlot::ALL`] order) to its stored
    /// value, or `None` when the slot has never been written. Absent slots
    /// take their defaults; no range validation is applied.
    pub fn from_slots(loaded: [Option<u8>; 7]) -> Self {
        let mut options = Options::default();
        for (slot, value) in OptionSlot::ALL.iter().zip(loaded.iter()) {
            if let Some(value) = value {
                options.set(*slot, *value);
            }
        }
        options
    }

    /// All seven slot values in [`OptionSlot::ALL`] order, for a whole save
    pub fn to_slots(&self) -> [(OptionSlot, u8); 7] {
        let mut slots = [(OptionSlot::StorageVersion, 0); 7];
        for (out, slot) in slots.iter_mut().zip(OptionSlot::ALL.iter()) {
            *out = (*slot, self.get(*slot));
        }
        slots
    }

    /// Apply a synced update to the matching field
    pub fn apply(&mut self, update: OptionUpdate) {
        self.set(OptionSlot::from_key(update.key()), update.value());
    }

    /// Values of the six syncable options, in key order
    pub fn report_values(&self) -> [u8; 6] {
        let mut values = [0u8; 6];
        for (out, key) in values.iter_mut().zip(OptionKey::ALL.iter()) {
            *out = self.get(OptionSlot::from_key(*key));
        }
        values
    }
}

/// Encode one slot value for flash storage
pub fn encode_slot_value(value: u8, buffer: &mut [u8]) -> Result<usize, StoreError> {
    let used = postcard::to_slice(&value, buffer).map_err(|_| StoreError::Codec)?;
    Ok(used.len())
}

/// Decode one slot value read from flash
pub fn decode_slot_value(buffer: &[u8]) -> Result<u8, StoreError> {
    postcard::from_bytes(buffer).map_err(|_| StoreError::Codec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_match_shipped_configuration() {
        let options = Options::default();
        assert_eq!(options.bluetooth_vibe, 1);
        assert_eq!(options.hourly_vibe, 0);
        assert_eq!(options.battery_hand, 1);
        assert_eq!(options.charge_blink, 1);
        assert_eq!(options.inverted_colors, 0);
        assert_eq!(options.minute_hands, 0);
        assert_eq!(options.storage_version, 2);
    }

    #[test]
    fn absent_slots_take_defaults() {
        let options = Options::from_slots([None; 7]);
        assert_eq!(options, Options::default());
    }

    #[test]
    fn partial_load_mixes_stored_and_default() {
        let mut loaded = [None; 7];
        loaded[1] = Some(1); // hourly_vibe
        loaded[4] = Some(1); // inverted_colors
        let options = Options::from_slots(loaded);
        assert_eq!(options.hourly_vibe, 1);
        assert_eq!(options.inverted_colors, 1);
        assert_eq!(options.bluetooth_vibe, 1);
        assert_eq!(options.minute_hands, 0);
    }

    #[test]
    fn apply_routes_update_to_field() {
        let mut options = Options::default();
        options.apply(OptionUpdate::MinuteHands(1));
        assert_eq!(options.minute_hands, 1);
        options.apply(OptionUpdate::ChargeBlink(0));
        assert_eq!(options.charge_blink, 0);
    }

    #[test]
    fn report_values_follow_key_order() {
        let options = Options::default();
        assert_eq!(options.report_values(), [1, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn slot_byte_roundtrip() {
        for slot in OptionSlot::ALL {
            assert_eq!(OptionSlot::from_u8(slot.as_u8()), Some(slot));
        }
        assert_eq!(OptionSlot::from_u8(0x06), None);
        assert_eq!(OptionSlot::from_u8(0xFF), None);
    }

    #[test]
    fn slot_value_codec_roundtrip() {
        let mut buffer = [0u8; 4];
        for value in [0u8, 1, 2, 255] {
            let len = encode_slot_value(value, &mut buffer).unwrap();
            assert_eq!(decode_slot_value(&buffer[..len]).unwrap(), value);
        }
    }

    proptest! {
        #[test]
        fn slots_roundtrip_is_identity(
            bt in 0u8..=1, hv in 0u8..=1, bh in 0u8..=1,
            cb in 0u8..=1, inv in 0u8..=1, mh in 0u8..=1,
            version in 0u8..=255,
        ) {
            let original = Options {
                bluetooth_vibe: bt,
                hourly_vibe: hv,
                battery_hand: bh,
                charge_blink: cb,
                inverted_colors: inv,
                minute_hands: mh,
                storage_version: version,
            };
            let mut loaded = [None; 7];
            for (out, (_, value)) in loaded.iter_mut().zip(original.to_slots()) {
                *out = Some(value);
            }
            prop_assert_eq!(Options::from_slots(loaded), original);
        }
    }
}

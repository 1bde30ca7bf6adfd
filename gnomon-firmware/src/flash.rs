//! Options persistence
//!
//! Uses sequential-storage for wear-leveled key-value storage in the last
//! 64KB of flash. Each option is one slot keyed by `OptionSlot`; a slot
//! that has never been written reads back as its default.

use defmt::*;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use gnomon_core::options::{decode_slot_value, encode_slot_value, OptionSlot, Options, StoreError};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
pub const OPTIONS_PARTITION_SIZE: usize = 64 * 1024;
pub const OPTIONS_PARTITION_START: usize = FLASH_SIZE - OPTIONS_PARTITION_SIZE;

/// Flash range for the options partition
pub const OPTIONS_RANGE: core::ops::Range<u32> =
    (OPTIONS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch buffer size for sequential-storage; slot values are one byte
const DATA_BUFFER_SIZE: usize = 128;

/// Wear-leveled store for the option slots
pub struct OptionsStore<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> OptionsStore<'d> {
    /// Create a new options store on the flash tail partition
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    /// Load all options, substituting defaults for absent slots
    pub async fn load(&mut self) -> Options {
        let mut loaded = [None; 7];
        for (value, slot) in loaded.iter_mut().zip(OptionSlot::ALL.iter()) {
            *value = self.read_slot(*slot).await;
        }
        Options::from_slots(loaded)
    }

    /// Write all seven slots unconditionally
    pub async fn save(&mut self, options: &Options) -> Result<(), StoreError> {
        let mut data_buffer = [0u8; DATA_BUFFER_SIZE];
        for (slot, value) in options.to_slots() {
            let mut value_buf = [0u8; 4];
            let len = encode_slot_value(value, &mut value_buf)?;
            let data: &[u8] = &value_buf[..len];

            map::store_item(
                &mut self.flash,
                OPTIONS_RANGE,
                &mut NoCache::new(),
                &mut data_buffer,
                &slot,
                &data,
            )
            .await
            .map_err(|_| StoreError::Flash)?;
        }
        Ok(())
    }

    async fn read_slot(&mut self, slot: OptionSlot) -> Option<u8> {
        let mut data_buffer = [0u8; DATA_BUFFER_SIZE];

        let result = map::fetch_item::<OptionSlot, &[u8], _>(
            &mut self.flash,
            OPTIONS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &slot,
        )
        .await;

        match result {
            Ok(Some(data)) => match decode_slot_value(data) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Corrupt option slot {:?}, using default", slot);
                    None
                }
            },
            Ok(None) => None,
            Err(_) => {
                warn!("Flash read failed for slot {:?}, using default", slot);
                None
            }
        }
    }
}

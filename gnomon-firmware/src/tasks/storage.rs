//! Options persistence task
//!
//! Owns the flash store and writes queued options snapshots. Saves are
//! whole-struct: every applied sync update queues all seven slots.

use defmt::*;

use crate::channels::SAVE_OPTIONS;
use crate::flash::OptionsStore;

/// Storage task - persists options snapshots to flash
#[embassy_executor::task]
pub async fn storage_task(mut store: OptionsStore<'static>) {
    info!("Storage task started");

    loop {
        let options = SAVE_OPTIONS.receive().await;
        match store.save(&options).await {
            Ok(()) => debug!("Options saved"),
            Err(e) => warn!("Options save failed: {:?}", e),
        }
    }
}

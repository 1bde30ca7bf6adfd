//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod battery;
pub mod face;
pub mod link_rx;
pub mod link_tx;
pub mod resync;
pub mod storage;
pub mod tick;
pub mod vibes;

pub use battery::battery_task;
pub use face::face_task;
pub use link_rx::{link_monitor_task, link_rx_task};
pub use link_tx::link_tx_task;
pub use resync::resync_task;
pub use storage::storage_task;
pub use tick::tick_task;
pub use vibes::{vibes_task, VibrationMotor};

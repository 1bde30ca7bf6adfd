//! Companion link transmit side
//!
//! Encodes and sends queued watch-to-phone messages: heartbeat responses
//! and the startup options report.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use gnomon_protocol::SYNC_BUFFER_SIZE;

use crate::channels::OUTBOUND;

/// Link TX task - sends frames to the companion
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let msg = OUTBOUND.receive().await;

        let frame = match msg.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to encode message: {:?}", e);
                continue;
            }
        };

        let mut buf = [0u8; SYNC_BUFFER_SIZE];
        match frame.encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("UART write error: {:?}", e);
                }
            }
            Err(e) => {
                warn!("Failed to encode frame: {:?}", e);
            }
        }
    }
}

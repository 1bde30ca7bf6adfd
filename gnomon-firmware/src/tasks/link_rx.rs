//! Companion link receive side
//!
//! Receives frames from the companion application and dispatches them:
//! option updates go to the face, heartbeats keep the link marked alive
//! and get an immediate response. A separate monitor task derives the
//! connectivity state the face consumes from the heartbeat stream.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{Duration, Timer};
use embedded_io_async::Read;

use gnomon_protocol::{FrameParser, OptionUpdate, PhoneMessage, WatchMessage};

use crate::channels::{FaceEvent, FACE_EVENTS, HEARTBEAT_RECEIVED, OUTBOUND};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Missing heartbeats for this long mark the link disconnected
const LINK_TIMEOUT: Duration = Duration::from_secs(10);

/// Link RX task - receives and parses frames from the companion
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match PhoneMessage::from_frame(&frame) {
                            Ok(msg) => handle_message(msg),
                            Err(e) => {
                                warn!("Failed to parse companion message: {:?}", e);
                            }
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn handle_message(msg: PhoneMessage) {
    match msg {
        PhoneMessage::Ping => {
            trace!("PING received");
            HEARTBEAT_RECEIVED.signal(());
            if OUTBOUND.try_send(WatchMessage::Pong).is_err() {
                warn!("Outbound channel full, dropping PONG");
            }
        }
        PhoneMessage::SetOption { key, value } => match OptionUpdate::from_key_value(key, value) {
            Some(update) => {
                debug!("Option update: {:?}", update);
                if FACE_EVENTS.try_send(FaceEvent::Update(update)).is_err() {
                    warn!("Face channel full, dropping option update");
                }
            }
            None => {
                warn!("Unknown option key 0x{:02x}, dropping", key);
            }
        },
    }
}

/// Link monitor task - derives connectivity from the heartbeat stream
#[embassy_executor::task]
pub async fn link_monitor_task() {
    info!("Link monitor task started");

    let mut connected = false;

    loop {
        match select(HEARTBEAT_RECEIVED.wait(), Timer::after(LINK_TIMEOUT)).await {
            Either::First(()) => {
                if !connected {
                    connected = true;
                    info!("Companion link up");
                    let _ = FACE_EVENTS.try_send(FaceEvent::Connection(true));
                }
            }
            Either::Second(()) => {
                if connected {
                    connected = false;
                    info!("Companion link down");
                    let _ = FACE_EVENTS.try_send(FaceEvent::Connection(false));
                }
            }
        }
    }
}

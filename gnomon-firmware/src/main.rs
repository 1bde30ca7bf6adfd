//! Gnomon - Single-Hand Watchface Firmware
//!
//! Main firmware binary for RP2040-based smartwatches with a Sharp
//! memory-in-pixel display.
//!
//! Named after the gnomon, the single shadow-casting arm of a sundial -
//! one hand tells the time, and doubles as a battery gauge.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use gnomon_protocol::SYNC_BUFFER_SIZE;

mod channels;
mod display;
mod flash;
mod tasks;
mod timebase;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; SYNC_BUFFER_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; SYNC_BUFFER_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Gnomon firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load options from flash (per-slot defaults when absent)
    let mut store = flash::OptionsStore::new(p.FLASH, p.DMA_CH0);
    let options = store.load().await;
    info!("Options loaded: {:?}", options);

    // Setup UART for the companion link
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; SYNC_BUFFER_SIZE]);
    let rx_buf = RX_BUF.init([0u8; SYNC_BUFFER_SIZE]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for companion link");

    // Setup SPI for the Sharp memory LCD (write-only, active-high CS)
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = 2_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let lcd_cs = Output::new(p.PIN_17, Level::Low);
    let lcd = display::SharpLcd::new(spi, lcd_cs);

    info!("Display initialized");

    // Battery sense: VSYS/3 on ADC0, charger sense on GPIO24
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let vsys_channel = Channel::new_pin(p.PIN_26, Pull::None);
    let charger_sense = Input::new(p.PIN_24, Pull::None);

    // Vibration motor
    let motor = tasks::VibrationMotor::new(Output::new(p.PIN_15, Level::Low));

    info!("Battery sense and motor initialized");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::battery_task(adc, vsys_channel, charger_sense))
        .unwrap();
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::link_monitor_task()).unwrap();
    spawner.spawn(tasks::vibes_task(motor)).unwrap();
    spawner.spawn(tasks::resync_task()).unwrap();
    spawner.spawn(tasks::storage_task(store)).unwrap();
    spawner.spawn(tasks::face_task(lcd, options)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

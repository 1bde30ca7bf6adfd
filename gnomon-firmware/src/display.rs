//! Sharp memory-in-pixel LCD driver (LS013B7DH05 class, 144x168)
//!
//! The panel is write-only over SPI with an active-high chip select. The
//! driver keeps a 1-bit framebuffer, tracks dirty lines, and flushes only
//! the lines that changed. The panel expects LSB-first bytes while the
//! RP2040 SPI block shifts MSB-first, so address and data bytes are
//! bit-reversed on the way out.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Error as SpiError, Spi};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::Pixel;

pub const WIDTH: usize = 144;
pub const HEIGHT: usize = 168;
const LINE_BYTES: usize = WIDTH / 8;

// Mode bits, already bit-reversed for MSB-first transmission
const CMD_WRITE: u8 = 0x80;
const CMD_VCOM: u8 = 0x40;

/// Framebuffered panel driver
pub struct SharpLcd<'d> {
    spi: Spi<'d, SPI0, Blocking>,
    cs: Output<'d>,
    /// One bit per pixel, 1 = reflective (white)
    buffer: [[u8; LINE_BYTES]; HEIGHT],
    dirty: [bool; HEIGHT],
    /// VCOM polarity, toggled every flush to prevent DC bias damage
    vcom: bool,
}

impl<'d> SharpLcd<'d> {
    pub fn new(spi: Spi<'d, SPI0, Blocking>, cs: Output<'d>) -> Self {
        Self {
            spi,
            cs,
            buffer: [[0xFF; LINE_BYTES]; HEIGHT],
            dirty: [true; HEIGHT],
            vcom: false,
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, lit: bool) {
        let mask = 0x80 >> (x % 8);
        let byte = &mut self.buffer[y][x / 8];
        // Panel polarity: a cleared bit is a dark pixel
        let old = *byte;
        if lit {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        if *byte != old {
            self.dirty[y] = true;
        }
    }

    /// Send all dirty lines to the panel
    pub fn flush(&mut self) -> Result<(), SpiError> {
        let mode = CMD_WRITE | if self.vcom { CMD_VCOM } else { 0 };
        self.vcom = !self.vcom;

        self.cs.set_high();
        let result = self.write_lines(mode);
        self.cs.set_low();
        result
    }

    fn write_lines(&mut self, mode: u8) -> Result<(), SpiError> {
        self.spi.blocking_write(&[mode])?;

        for y in 0..HEIGHT {
            if !self.dirty[y] {
                continue;
            }
            // Line addresses are 1-based and sent LSB-first
            let address = (y as u8 + 1).reverse_bits();
            self.spi.blocking_write(&[address])?;

            let mut line = [0u8; LINE_BYTES];
            for (out, byte) in line.iter_mut().zip(self.buffer[y].iter()) {
                *out = byte.reverse_bits();
            }
            self.spi.blocking_write(&line)?;

            // Per-line trailer
            self.spi.blocking_write(&[0x00])?;
            self.dirty[y] = false;
        }

        // Frame trailer
        self.spi.blocking_write(&[0x00, 0x00])
    }
}

impl OriginDimensions for SharpLcd<'_> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for SharpLcd<'_> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                self.set_pixel(point.x as usize, point.y as usize, color.is_on());
            }
        }
        Ok(())
    }
}

//! Display bring-up for the Waveshare 1.28" round LCD (GC9A01, 240x240).
//!
//! Pin mapping:
//! - CLK: GPIO18 (SPI0 CLK)
//! - MOSI: GPIO19 (SPI0 TX)
//! - CS: GPIO17
//! - DC: GPIO16
//! - RST: GPIO20
//! - Backlight: GPIO21

use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::Builder;
use mipidsi::models::GC9A01;
use mipidsi::options::{ColorInversion, ColorOrder};

/// Display type alias for the round GC9A01 panel.
pub type RoundDisplay<'d> = mipidsi::Display<
    SPIInterface<ExclusiveDevice<Spi<'d, SPI0, Blocking>, Output<'d>, embedded_hal_bus::spi::NoDelay>, Output<'d>>,
    GC9A01,
    Output<'d>,
>;

/// Initialize the panel and return it ready for drawing.
pub fn init_display<'d>(
    spi: Spi<'d, SPI0, Blocking>,
    cs: Output<'d>,
    dc: Output<'d>,
    rst: Output<'d>,
) -> RoundDisplay<'d> {
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
    let di = SPIInterface::new(spi_device, dc);

    // This module wants inverted colors and BGR order; swap either if a
    // different panel revision shows wrong colors.
    Builder::new(GC9A01, di)
        .display_size(240, 240)
        .reset_pin(rst)
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .init(&mut embassy_time::Delay)
        .unwrap()
}

/// SPI configuration for the GC9A01.
///
/// The controller tops out at 62.5 MHz; 40 MHz is reliable across wiring.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 40_000_000;
    config
}

//! Screen drawing: static chrome, the numeric readout and the clock face.
//!
//! The chrome is painted once per mode change; every tick afterwards only
//! rewrites the numeric band (glyphs carry an opaque background, so equal or
//! wider readouts overpaint the old one without a flicker-inducing clear)
//! and, when liveness flips, the link icon.

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::chrome::chrome_for;
use crate::clock;
use crate::colors::{BLACK, GRAY, WHITE};
use crate::config::{
    BAND_MID_TOP,
    BAND_TOP_HEIGHT,
    CENTER_X,
    CENTER_Y,
    FACE_TOP,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    VALUE_BAND_BOTTOM,
    VALUE_BAND_TOP,
};
use crate::modes::GaugeMode;
use crate::render::Readout;

/// Large fixed-width font for the numeric readout.
const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Title line font.
const TITLE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Unit label and subtitle font.
const LABEL_FONT: &MonoFont = &PROFONT_18_POINT;

/// Top of the readout glyphs inside the numeric band.
const VALUE_TEXT_Y: i32 = 56;

/// Link icon position and size, inside the top band.
const LINK_ICON_TOP_LEFT: Point = Point::new(112, 6);
const LINK_ICON_DIAMETER: u32 = 16;

/// Paint the full static layout for `mode` over a cleared screen.
pub fn draw_chrome<D>(display: &mut D, mode: GaugeMode, live: bool)
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    // The clock is a bare black face; everything else gets banded chrome.
    let Some(chrome) = chrome_for(mode) else {
        return;
    };

    Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, BAND_TOP_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(chrome.band))
        .draw(display)
        .ok();
    Rectangle::new(
        Point::new(0, BAND_MID_TOP),
        Size::new(SCREEN_WIDTH, (FACE_TOP - BAND_MID_TOP) as u32),
    )
    .into_styled(PrimitiveStyle::with_fill(chrome.band))
    .draw(display)
    .ok();
    Rectangle::new(
        Point::new(0, FACE_TOP),
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - FACE_TOP as u32),
    )
    .into_styled(PrimitiveStyle::with_fill(chrome.face))
    .draw(display)
    .ok();

    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    let label_style = MonoTextStyle::new(LABEL_FONT, WHITE);
    let title_style = MonoTextStyle::new(TITLE_FONT, WHITE);

    Text::with_text_style(chrome.unit, Point::new(CENTER_X, 134), label_style, centered)
        .draw(display)
        .ok();
    Text::with_text_style(chrome.title.0, Point::new(CENTER_X, 170), title_style, centered)
        .draw(display)
        .ok();
    Text::with_text_style(chrome.title.1, Point::new(CENTER_X, 198), label_style, centered)
        .draw(display)
        .ok();

    draw_link_icon(display, mode, live);
}

/// Repaint just the connectivity icon; the band behind it hides it again
/// when the link goes stale.
pub fn draw_link_icon<D>(display: &mut D, mode: GaugeMode, live: bool)
where
    D: DrawTarget<Color = Rgb565>,
{
    let Some(chrome) = chrome_for(mode) else {
        return;
    };
    let color = if live { chrome.face } else { chrome.band };
    Circle::new(LINK_ICON_TOP_LEFT, LINK_ICON_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Draw the numeric readout.
///
/// `clear_first` wipes the whole numeric band before drawing (the previous
/// value was wider). The tail beyond the new text is always wiped: a value
/// one class wider that just shrank leaves glyph remnants to the right.
pub fn draw_value<D>(display: &mut D, readout: &Readout, clear_first: bool)
where
    D: DrawTarget<Color = Rgb565>,
{
    let band_height = (VALUE_BAND_BOTTOM - VALUE_BAND_TOP) as u32;

    if clear_first {
        Rectangle::new(Point::new(0, VALUE_BAND_TOP), Size::new(SCREEN_WIDTH, band_height))
            .into_styled(PrimitiveStyle::with_fill(BLACK))
            .draw(display)
            .ok();
    }

    let value_style = MonoTextStyleBuilder::new()
        .font(VALUE_FONT)
        .text_color(WHITE)
        .background_color(BLACK)
        .build();

    Text::with_baseline(
        &readout.text,
        Point::new(readout.x, VALUE_TEXT_Y),
        value_style,
        Baseline::Top,
    )
    .draw(display)
    .ok();

    let advance = VALUE_FONT.character_size.width + VALUE_FONT.character_spacing;
    let text_end = readout.x + (readout.text.len() as u32 * advance) as i32;
    // Mirror of the widest class's left margin
    let band_right = (SCREEN_WIDTH as i32) - crate::render::WidthClass::Four.x_offset();
    if text_end < band_right {
        Rectangle::new(
            Point::new(text_end, VALUE_BAND_TOP),
            Size::new((band_right - text_end) as u32, band_height),
        )
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();
    }
}

/// Repaint the clock screen for the given time.
pub fn draw_clock<D>(display: &mut D, hour: u8, minute: u8)
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    // Face marks, every fifth emphasized
    for i in 0..60u8 {
        let (p, emphasized) = clock::face_mark(i);
        if emphasized {
            Rectangle::new(p, Size::new(2, 2))
                .into_styled(PrimitiveStyle::with_fill(WHITE))
                .draw(display)
                .ok();
        } else {
            Pixel(p, GRAY).draw(display).ok();
        }
    }

    let center = Point::new(CENTER_X, CENTER_Y);

    Line::new(center, clock::endpoint(clock::hour_angle(hour, minute), clock::HOUR_HAND_RADIUS))
        .into_styled(PrimitiveStyle::with_stroke(WHITE, 2))
        .draw(display)
        .ok();
    Line::new(center, clock::endpoint(clock::minute_angle(minute), clock::MINUTE_HAND_RADIUS))
        .into_styled(PrimitiveStyle::with_stroke(WHITE, 1))
        .draw(display)
        .ok();

    Circle::with_center(center, clock::HUB_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(WHITE))
        .draw(display)
        .ok();
}

/// Startup banner shown while the bus link is brought up.
pub fn draw_boot_banner<D>(display: &mut D, version: &str)
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    Text::with_text_style(
        "OBD GAUGE",
        Point::new(CENTER_X, CENTER_Y - 16),
        MonoTextStyle::new(TITLE_FONT, WHITE),
        centered,
    )
    .draw(display)
    .ok();

    let mut line: String<16> = String::new();
    let _ = write!(line, "v{version}");
    Text::with_text_style(
        &line,
        Point::new(CENTER_X, CENTER_Y + 16),
        MonoTextStyle::new(LABEL_FONT, GRAY),
        centered,
    )
    .draw(display)
    .ok();
}

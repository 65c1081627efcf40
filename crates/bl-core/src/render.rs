//! Byte-to-pixel and byte-to-glyph transforms for the four views.
//!
//! All functions are stateless: they read a byte slice and write to a
//! [`DrawSurface`]. Every buffer access is bounds checked; positions past the
//! end of the slice are simply not drawn.

use crate::surface::DrawSurface;
use crate::types::{Argb, ByteSpan, FrameRegion};

/// Text cells taken by one hex byte (two digits and a gap).
const HEX_CELL_CELLS: i32 = 3;
/// Text cells taken by the `xxxx:xxxx` address column.
const HEX_ADDRESS_CELLS: i32 = 10;

/// Maps a brightness level to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hue {
    Amber,
    Green,
    Red,
}

impl Hue {
    pub fn color(self, bright: u8) -> Argb {
        match self {
            Hue::Amber => Argb::opaque(bright, (bright as u32 * 165 / 255) as u8, 0),
            Hue::Green => Argb::opaque(0, bright, 0),
            Hue::Red => Argb::opaque(bright, 0, 0),
        }
    }
}

/// How a `(row, col)` cell of a bit frame maps to a buffer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Consecutive bytes run left to right, then down.
    RowMajor,
    /// Consecutive bytes run top to bottom, then right.
    ColumnMajor,
}

impl ByteOrder {
    pub fn position(self, row: usize, col: usize, rows: usize, cols: usize) -> usize {
        match self {
            ByteOrder::RowMajor => col + row * cols,
            ByteOrder::ColumnMajor => col * rows + row,
        }
    }
}

/// Brightness of bit `bit` (0 = least significant) of `value`.
pub fn bit_brightness(value: u8, bit: u32) -> u8 {
    if value & (1 << bit) != 0 {
        (((8 - bit) << 4) + 63) as u8
    } else {
        0
    }
}

/// Brightness of a whole-byte glyph in the hex and ascii dumps.
pub fn glyph_brightness(value: u8) -> u8 {
    value / 2 + 128
}

/// Parameters for one bit frame.
#[derive(Debug, Clone, Copy)]
pub struct BitFrame {
    pub region: FrameRegion,
    pub order: ByteOrder,
    pub hue: Hue,
    /// Buffer positions drawn in [`Hue::Red`].
    pub highlight: Option<ByteSpan>,
}

/// Expand every byte of `buf` covered by `frame` into 8 pixels, bit 7 leftmost.
pub fn draw_bit_frame<S: DrawSurface + ?Sized>(surface: &mut S, frame: &BitFrame, buf: &[u8]) {
    let FrameRegion { x, y, rows, cols } = frame.region;

    for row in 0..rows {
        for col in 0..cols {
            let p = frame.order.position(row, col, rows, cols);
            let Some(&value) = buf.get(p) else {
                continue;
            };

            let hue = match frame.highlight {
                Some(span) if span.contains(p) => Hue::Red,
                _ => frame.hue,
            };

            let base_x = x + (col as i32) * 8;
            for bit in (0..8u32).rev() {
                let color = hue.color(bit_brightness(value, bit));
                surface.set_pixel(base_x + (7 - bit as i32), y + row as i32, color);
            }
        }
    }
}

/// Hex dump of `region.rows` lines of `region.cols` bytes starting at `buffer_offset`.
/// Each line is prefixed with the absolute file address of its first byte.
/// Text cells are `font_size` pixels square.
pub fn draw_hex_dump<S: DrawSurface + ?Sized>(
    surface: &mut S,
    region: FrameRegion,
    buf: &[u8],
    file_offset: u64,
    buffer_offset: usize,
    font_size: u32,
) {
    let cell = font_size as i32;

    for row in 0..region.rows {
        let line_y = region.y + row as i32 * cell;
        let address = file_offset + (buffer_offset + row * region.cols) as u64;
        surface.draw_text(
            region.x,
            line_y,
            Argb::INFO_TEXT,
            Argb::BLACK,
            &format_address(address),
        );

        for col in 0..region.cols {
            let Some(&value) = buf.get(buffer_offset + col + row * region.cols) else {
                continue;
            };
            surface.draw_text(
                region.x + (col as i32 * HEX_CELL_CELLS + HEX_ADDRESS_CELLS) * cell,
                line_y,
                Hue::Amber.color(glyph_brightness(value)),
                Argb::BLACK,
                &format!("{:02x}", value),
            );
        }
    }
}

/// ASCII dump: each byte drawn as the character with the same code, unescaped.
pub fn draw_ascii_dump<S: DrawSurface + ?Sized>(
    surface: &mut S,
    region: FrameRegion,
    buf: &[u8],
    buffer_offset: usize,
    font_size: u32,
) {
    let cell = font_size as i32;

    for row in 0..region.rows {
        for col in 0..region.cols {
            let Some(&value) = buf.get(buffer_offset + col + row * region.cols) else {
                continue;
            };
            let glyph = char::from(value);
            surface.draw_text(
                region.x + col as i32 * cell,
                region.y + row as i32 * cell,
                Hue::Amber.color(glyph_brightness(value)),
                Argb::BLACK,
                glyph.encode_utf8(&mut [0u8; 4]),
            );
        }
    }
}

/// `hhhh:llll`, the high and low 16 bits of a file address.
pub fn format_address(address: u64) -> String {
    format!("{:04x}:{:04x}", (address >> 16) & 0xffff, address & 0xffff)
}

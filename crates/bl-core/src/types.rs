use serde::{Deserialize, Serialize};

/// A 4-channel color, stored as alpha, red, green, blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const BLACK: Argb = Argb::opaque(0x00, 0x00, 0x00);
    /// Header and address text.
    pub const INFO_TEXT: Argb = Argb::opaque(0xff, 0xa5, 0x00);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xff, r, g, b)
    }
}

/// A rectangular screen region measured in bytes: `rows` lines of `cols` bytes
/// anchored at pixel `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRegion {
    pub x: i32,
    pub y: i32,
    pub rows: usize,
    pub cols: usize,
}

impl FrameRegion {
    pub const fn new(x: i32, y: i32, rows: usize, cols: usize) -> Self {
        Self { x, y, rows, cols }
    }

    /// Number of bytes the region covers.
    pub fn byte_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// Inclusive range of buffer positions, used for the highlighted viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    /// Span of `len` bytes starting at `start`. A zero length yields an empty span.
    pub fn with_len(start: usize, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self { start, end: start + len - 1 })
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos <= self.end
    }
}

use std::io::{Read, Seek};
use std::path::Path;

use crate::config::LayoutConfig;
use crate::file_window::{FileStat, FileWindow};
use crate::render::{self, BitFrame, ByteOrder, Hue};
use crate::surface::DrawSurface;
use crate::types::{Argb, ByteSpan};

pub const APP_NAME: &str = "bitlens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// First header line.
pub fn banner() -> String {
    format!("{} {}", APP_NAME, APP_VERSION)
}

/// Second header line: what the metadata query said about `path`.
pub fn describe_file(path: &Path, stat: &FileStat) -> String {
    match stat {
        Ok(info) => format!(
            "{}: {} ({} bytes in disk) - mode 0{:o}",
            path.display(),
            info.kind.label(),
            info.size,
            info.mode
        ),
        Err(reason) => format!("{}: metadata unavailable ({})", path.display(), reason),
    }
}

/// Draw header lines from the top of the surface, one `font_size` row each.
pub fn draw_lines<S: DrawSurface + ?Sized>(surface: &mut S, lines: &[String], font_size: u32) {
    for (i, line) in lines.iter().enumerate() {
        surface.draw_text(0, i as i32 * font_size as i32, Argb::INFO_TEXT, Argb::BLACK, line);
    }
}

/// Lays the four views out at fixed positions and presents the frame.
pub struct Compositor {
    layout: LayoutConfig,
    /// Text cell size in pixels, shared by the header and both dumps.
    font_size: u32,
    header: Vec<String>,
}

impl Compositor {
    pub fn new(layout: LayoutConfig, font_size: u32, header: Vec<String>) -> Self {
        Self { layout, font_size, header }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Replace header line `index`, growing the header if needed.
    pub fn set_header_line(&mut self, index: usize, line: String) {
        if self.header.len() <= index {
            self.header.resize(index + 1, String::new());
        }
        self.header[index] = line;
    }

    /// Drop header lines from `len` on.
    pub fn truncate_header(&mut self, len: usize) {
        self.header.truncate(len);
    }

    /// Buffer positions shown by the hex and ascii views.
    pub fn highlight<S>(window: &FileWindow<S>) -> Option<ByteSpan> {
        ByteSpan::with_len(window.buffer_offset(), window.viewport_size())
    }

    pub fn compose_frame<D, S>(&self, surface: &mut D, window: &FileWindow<S>)
    where
        D: DrawSurface + ?Sized,
        S: Read + Seek,
    {
        surface.clear(Argb::BLACK);
        draw_lines(surface, &self.header, self.font_size);

        let buf = window.buffer();
        let highlight = Self::highlight(window);

        render::draw_bit_frame(
            surface,
            &BitFrame { region: self.layout.bit_frame, order: ByteOrder::RowMajor, hue: Hue::Amber, highlight },
            buf,
        );
        render::draw_hex_dump(
            surface,
            self.layout.hex_dump,
            buf,
            window.file_offset(),
            window.buffer_offset(),
            self.font_size,
        );
        render::draw_ascii_dump(surface, self.layout.ascii_dump, buf, window.buffer_offset(), self.font_size);
        render::draw_bit_frame(
            surface,
            &BitFrame {
                region: self.layout.column_frame,
                order: ByteOrder::ColumnMajor,
                hue: Hue::Green,
                highlight,
            },
            buf,
        );

        surface.refresh();
    }
}

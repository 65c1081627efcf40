use crate::types::Argb;

/// The drawing primitives the viewer needs from a display.
pub trait DrawSurface {
    /// Set one pixel. Coordinates outside the surface are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Argb);
    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, fg: Argb, bg: Argb, text: &str);
    /// Fill the whole surface and drop any text.
    fn clear(&mut self, color: Argb);
    /// Present what has been drawn since the last refresh.
    fn refresh(&mut self);
}

/// A run of text queued on a [`FrameBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub x: i32,
    pub y: i32,
    pub fg: Argb,
    pub bg: Argb,
    pub text: String,
}

/// In-memory surface: an ARGB pixel plane plus the text drawn over it.
///
/// Display backends upload `pixels()` as a texture and paint `texts()` on top
/// whenever `generation()` changes.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Argb>,
    texts: Vec<TextRun>,
    generation: u64,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Argb::BLACK; width * height],
            texts: Vec::new(),
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the plane.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Argb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Row-major pixel plane, `width * height` entries.
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// First text run placed exactly at `(x, y)`.
    pub fn text_at(&self, x: i32, y: i32) -> Option<&TextRun> {
        self.texts.iter().find(|t| t.x == x && t.y == y)
    }

    /// Number of refreshes so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

impl DrawSurface for FrameBuffer {
    fn set_pixel(&mut self, x: i32, y: i32, color: Argb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, fg: Argb, bg: Argb, text: &str) {
        self.texts.push(TextRun { x, y, fg, bg, text: text.to_string() });
    }

    fn clear(&mut self, color: Argb) {
        self.pixels.fill(color);
        self.texts.clear();
    }

    fn refresh(&mut self) {
        self.generation += 1;
    }
}

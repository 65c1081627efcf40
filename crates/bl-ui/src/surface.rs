use egui::{Align2, Color32, ColorImage, Context, FontId, Pos2, Rect, Sense, TextureHandle, TextureOptions, Ui, Vec2};
use bl_core::{Argb, DrawSurface, FrameBuffer};

use crate::glyphs;

pub fn to_color32(c: Argb) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Drawing surface shown in an egui panel.
///
/// Drawing goes to an in-memory [`FrameBuffer`]. The pixel plane is uploaded
/// as a texture once per refresh; text runs are painted over it every frame.
pub struct EguiSurface {
    frame: FrameBuffer,
    texture: Option<TextureHandle>,
    /// Frame generation the texture was built from.
    uploaded: u64,
    font_size: f32,
}

impl EguiSurface {
    pub fn new(width: usize, height: usize, font_size: f32) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            texture: None,
            uploaded: 0,
            font_size,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Whether the last refresh has not been uploaded yet.
    pub fn needs_upload(&self) -> bool {
        self.texture.is_none() || self.uploaded != self.frame.generation()
    }

    fn upload(&mut self, ctx: &Context) {
        let image = ColorImage {
            size: [self.frame.width(), self.frame.height()],
            pixels: self.frame.pixels().iter().map(|&p| to_color32(p)).collect(),
        };

        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("bitlens_frame", image, TextureOptions::NEAREST)),
        }
        self.uploaded = self.frame.generation();
    }

    /// Paint the surface at the top-left of `ui`, one texel per point.
    pub fn show(&mut self, ui: &mut Ui) {
        if self.needs_upload() {
            self.upload(ui.ctx());
        }

        let size = Vec2::new(self.frame.width() as f32, self.frame.height() as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min;

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                Rect::from_min_size(origin, size),
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        let font = FontId::monospace(self.font_size);
        for run in self.frame.texts() {
            let pos = origin + Vec2::new(run.x as f32, run.y as f32);
            let galley = painter.layout_no_wrap(glyphs::visible(&run.text).into_owned(), font.clone(), to_color32(run.fg));
            if run.bg.a > 0 {
                painter.rect_filled(Rect::from_min_size(pos, galley.size()), 0.0, to_color32(run.bg));
            }
            painter.galley(pos, galley, to_color32(run.fg));
        }
    }

    /// Text-only screen centered in `ui`, used before a session exists.
    pub fn show_message(ui: &mut Ui, lines: &[String], font_size: f32) {
        let painter = ui.painter();
        let origin = ui.max_rect().min;
        let font = FontId::monospace(font_size);
        for (i, line) in lines.iter().enumerate() {
            painter.text(
                origin + Vec2::new(0.0, i as f32 * font_size),
                Align2::LEFT_TOP,
                line,
                font.clone(),
                to_color32(Argb::INFO_TEXT),
            );
        }
    }
}

impl DrawSurface for EguiSurface {
    fn set_pixel(&mut self, x: i32, y: i32, color: Argb) {
        self.frame.set_pixel(x, y, color);
    }

    fn draw_text(&mut self, x: i32, y: i32, fg: Argb, bg: Argb, text: &str) {
        self.frame.draw_text(x, y, fg, bg, text);
    }

    fn clear(&mut self, color: Argb) {
        self.frame.clear(color);
    }

    fn refresh(&mut self) {
        self.frame.refresh();
    }
}

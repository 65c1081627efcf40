pub mod fonts;
pub mod glyphs;
pub mod input;
pub mod surface;

pub use fonts::install_font_file;
pub use input::{default_key_map, scroll_events};
pub use surface::EguiSurface;

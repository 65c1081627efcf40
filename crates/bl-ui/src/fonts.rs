use std::path::Path;

use anyhow::{Context as _, Result};
use egui::{FontData, FontDefinitions, FontFamily};

/// Put the TrueType/OpenType font at `path` first in the monospace family.
pub fn install_font_file(ctx: &egui::Context, path: &Path) -> Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read font {}", path.display()))?;
    let fonts = font_definitions(path, bytes);
    ctx.set_fonts(fonts);
    log::info!("using font {}", path.display());
    Ok(())
}

fn font_definitions(path: &Path, bytes: Vec<u8>) -> FontDefinitions {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "user_font".to_owned());

    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(name.clone(), FontData::from_owned(bytes).into());
    fonts.families.entry(FontFamily::Monospace).or_default().insert(0, name);
    fonts
}

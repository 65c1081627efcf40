use std::path::PathBuf;

use anyhow::Result;
use bl_core::ViewConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bitlens", version, about = "Windowed bit-level viewer for binary files")]
pub struct Cli {
    /// Window width in pixels [default: 1024]
    #[arg(short = 'W', value_name = "WIDTH", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Window height in pixels [default: 768]
    #[arg(short = 'H', value_name = "HEIGHT", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Bytes per bit-frame row (accepted, the layout is fixed)
    #[arg(short = 'b', value_name = "BYTES", value_parser = clap::value_parser!(u32).range(1..))]
    pub bytes_per_row: Option<u32>,

    /// TrueType/OpenType font used for text
    #[arg(short = 'f', value_name = "FONT")]
    pub font: Option<PathBuf>,

    /// JSON layout and timing configuration
    #[arg(short = 'c', long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// File to view
    pub file: PathBuf,
}

impl Cli {
    /// Configuration file (or defaults) with the command-line overrides applied.
    pub fn view_config(&self) -> Result<ViewConfig> {
        let mut config = match &self.config {
            Some(path) => ViewConfig::load(path)?,
            None => ViewConfig::default(),
        };

        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(bytes) = self.bytes_per_row {
            log::warn!("-b {} ignored: bit frame rows are {} bytes", bytes, config.layout.bit_frame.cols);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_come_from_config() {
        let cli = Cli::try_parse_from(["bitlens", "a.bin"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("a.bin"));
        let config = cli.view_config().unwrap();
        assert_eq!((config.window.width, config.window.height), (1024, 768));
    }

    #[test]
    fn size_flags_override_window() {
        let cli = Cli::try_parse_from(["bitlens", "-W", "1280", "-H", "800", "-b", "16", "a.bin"]).unwrap();
        assert_eq!(cli.bytes_per_row, Some(16));
        let config = cli.view_config().unwrap();
        assert_eq!((config.window.width, config.window.height), (1280, 800));
        assert_eq!(config.layout.bit_frame.cols, 32);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Cli::try_parse_from(["bitlens", "-W", "800"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn zero_bytes_per_row_rejected() {
        assert!(Cli::try_parse_from(["bitlens", "-b", "0", "a.bin"]).is_err());
    }

    #[test]
    fn help_is_not_an_error() {
        let err = Cli::try_parse_from(["bitlens", "-h"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn config_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "window": {{ "width": 640, "height": 480 }} }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_owned();

        let cli = Cli::try_parse_from(["bitlens", "-c", &path, "-H", "600", "a.bin"]).unwrap();
        let config = cli.view_config().unwrap();
        assert_eq!((config.window.width, config.window.height), (640, 600));
    }
}

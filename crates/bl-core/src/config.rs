//! Layout and timing configuration.
//!
//! Every field has a default matching the stock 1024x768 layout, so a config
//! file only needs to name what it changes:
//!
//! ```json
//! { "repeat": { "first_shot_ms": 300 } }
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::types::FrameRegion;

/// Default text cell size in pixels.
pub const FONT_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub window: WindowSize,
    pub layout: LayoutConfig,
    /// Rows scrolled by one line step (multiplied by the bit frame stride).
    pub line_step_rows: usize,
    pub repeat: RepeatConfig,
    pub font_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self { width: 1024, height: 768 }
    }
}

/// Screen placement of the four views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Row-major bit frame. Its byte count is the buffer capacity.
    pub bit_frame: FrameRegion,
    /// Hex dump. Its byte count is the visible viewport.
    pub hex_dump: FrameRegion,
    pub ascii_dump: FrameRegion,
    /// Column-major bit frame.
    pub column_frame: FrameRegion,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bit_frame: FrameRegion::new(0, 48, 500, 32),
            hex_dump: FrameRegion::new(260, 48, 64, 16),
            ascii_dump: FrameRegion::new(720, 48, 64, 16),
            column_frame: FrameRegion::new(0, 570, 128, 128),
        }
    }
}

/// Auto-repeat timing for held navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatConfig {
    pub first_shot_ms: u64,
    pub interval_ms: u64,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self { first_shot_ms: 200, interval_ms: 10 }
    }
}

impl RepeatConfig {
    pub fn first_shot(&self) -> Duration {
        Duration::from_millis(self.first_shot_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window: WindowSize::default(),
            layout: LayoutConfig::default(),
            line_step_rows: 4,
            repeat: RepeatConfig::default(),
            font_size: FONT_SIZE,
        }
    }
}

impl ViewConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        let config: ViewConfig =
            serde_json::from_str(json).map_err(|e| ViewerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ViewerError> {
        serde_json::to_string_pretty(self).map_err(|e| ViewerError::Config(e.to_string()))
    }

    /// Bytes held by the paging buffer.
    pub fn capacity(&self) -> usize {
        self.layout.bit_frame.byte_count()
    }

    /// Bytes shown at once by the hex and ascii dumps.
    pub fn viewport_size(&self) -> usize {
        self.layout.hex_dump.byte_count()
    }

    /// Bytes moved by one line-down/line-up.
    pub fn line_step(&self) -> usize {
        self.line_step_rows * self.layout.bit_frame.cols
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        let layout = &self.layout;
        for (name, region) in [
            ("bit_frame", &layout.bit_frame),
            ("hex_dump", &layout.hex_dump),
            ("ascii_dump", &layout.ascii_dump),
            ("column_frame", &layout.column_frame),
        ] {
            if region.rows == 0 || region.cols == 0 {
                return Err(ViewerError::Config(format!("{} must have non-zero rows and cols", name)));
            }
        }

        if layout.ascii_dump.rows != layout.hex_dump.rows || layout.ascii_dump.cols != layout.hex_dump.cols {
            return Err(ViewerError::Config("ascii_dump must have the same rows and cols as hex_dump".into()));
        }

        if self.viewport_size() > self.capacity() {
            return Err(ViewerError::Config(format!(
                "viewport of {} bytes does not fit a buffer of {} bytes",
                self.viewport_size(),
                self.capacity()
            )));
        }

        if self.line_step_rows == 0 {
            return Err(ViewerError::Config("line_step_rows must be non-zero".into()));
        }

        if self.repeat.interval_ms == 0 {
            return Err(ViewerError::Config("repeat interval must be non-zero".into()));
        }

        if self.font_size == 0 {
            return Err(ViewerError::Config("font_size must be non-zero".into()));
        }

        Ok(())
    }
}

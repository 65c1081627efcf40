use std::path::PathBuf;

/// Errors raised by the viewer core.
#[derive(Debug)]
pub enum ViewerError {
    /// The file could not be opened. Shown on the surface, not fatal by itself.
    FileOpen { path: PathBuf, reason: String },
    /// Seek or read failure while refilling the buffer.
    Read(std::io::Error),
    /// Invalid layout or timing configuration.
    Config(String),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::FileOpen { path, reason } => {
                write!(f, "Can't open {}: {}", path.display(), reason)
            }
            ViewerError::Read(e) => write!(f, "read error: {}", e),
            ViewerError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Read(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        ViewerError::Read(e)
    }
}

pub mod types;
pub mod error;
pub mod config;
pub mod surface;
pub mod file_window;
pub mod render;
pub mod scroll;
pub mod timer;
pub mod compositor;
pub mod session;

pub use types::*;
pub use error::ViewerError;
pub use config::{ViewConfig, LayoutConfig, RepeatConfig, WindowSize, FONT_SIZE};
pub use surface::{DrawSurface, FrameBuffer, TextRun};
pub use file_window::{FileWindow, FileInfo, FileKind, FileStat};
pub use render::{BitFrame, ByteOrder, Hue};
pub use scroll::{Action, Event, KeyMap, ScrollController, ScrollState, TimerCommand, Transition};
pub use timer::{ManualTimer, RepeatSchedule, RepeatTimer, ThreadTimer};
pub use compositor::{Compositor, banner, describe_file, draw_lines, APP_NAME, APP_VERSION};
pub use session::{EventSource, SessionLoop};

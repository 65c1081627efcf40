use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::mpsc::Receiver;

use crate::compositor::{banner, describe_file, Compositor};
use crate::config::ViewConfig;
use crate::error::ViewerError;
use crate::file_window::FileWindow;
use crate::scroll::{Event, ScrollController};
use crate::surface::DrawSurface;
use crate::timer::RepeatTimer;

/// Header row used for reload errors.
const ERROR_LINE: usize = 2;

/// Where a session gets its input from.
pub trait EventSource {
    /// Block until the next event. `None` means the source is closed.
    fn wait_event(&mut self) -> Option<Event>;
    /// Next event if one is already queued.
    fn poll_event(&mut self) -> Option<Event>;
}

impl EventSource for Receiver<Event> {
    fn wait_event(&mut self) -> Option<Event> {
        self.recv().ok()
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.try_recv().ok()
    }
}

/// One viewing session: owns the window, the navigation state and the dirty flag.
/// Only this type reloads the buffer and draws.
pub struct SessionLoop<S, T> {
    window: FileWindow<S>,
    scroll: ScrollController,
    compositor: Compositor,
    timer: T,
    dirty: bool,
    frames: u64,
}

impl<T: RepeatTimer> SessionLoop<File, T> {
    /// Open `path` and prepare the first frame.
    pub fn open(path: &Path, config: &ViewConfig, timer: T) -> Result<Self, ViewerError> {
        config.validate()?;
        let (window, stat) = FileWindow::open(path, config.capacity(), config.viewport_size())?;
        let header = vec![banner(), describe_file(path, &stat)];
        Ok(Self::new(window, config, header, timer))
    }
}

impl<S: Read + Seek, T: RepeatTimer> SessionLoop<S, T> {
    pub fn new(window: FileWindow<S>, config: &ViewConfig, header: Vec<String>, timer: T) -> Self {
        let scroll = ScrollController::new(config.line_step(), config.repeat.first_shot(), config.repeat.interval());
        Self {
            window,
            scroll,
            compositor: Compositor::new(config.layout, config.font_size, header),
            timer,
            dirty: true,
            frames: 0,
        }
    }

    /// Route one event through the scroll controller and apply its timer command.
    pub fn handle_event(&mut self, event: Event) {
        let transition = self.scroll.handle(event, &mut self.window);
        if let Some(command) = transition.timer {
            self.timer.apply(command);
        }
        if transition.dirty {
            self.dirty = true;
        }
    }

    /// Handle every queued event without blocking. Returns how many were handled.
    pub fn pump<E: EventSource + ?Sized>(&mut self, events: &mut E) -> usize {
        let mut handled = 0;
        while let Some(event) = events.poll_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Reload if needed and redraw, but only when something changed.
    /// Returns whether a frame was drawn.
    pub fn render_if_dirty<D: DrawSurface + ?Sized>(&mut self, surface: &mut D) -> bool {
        if !self.dirty {
            return false;
        }

        if self.window.needs_reload() {
            match self.window.reload() {
                Ok(_) => self.compositor.truncate_header(ERROR_LINE),
                Err(e) => {
                    log::error!("reload at 0x{:x} failed: {}", self.window.file_offset(), e);
                    self.compositor
                        .set_header_line(ERROR_LINE, format!("{} at offset 0x{:x}", e, self.window.file_offset()));
                }
            }
        }

        self.compositor.compose_frame(surface, &self.window);
        self.dirty = false;
        self.frames += 1;
        true
    }

    /// Render, wait, repeat, until the event source closes.
    pub fn run<D, E>(&mut self, surface: &mut D, events: &mut E)
    where
        D: DrawSurface + ?Sized,
        E: EventSource + ?Sized,
    {
        log::info!("session started");
        loop {
            self.render_if_dirty(surface);
            match events.wait_event() {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        log::info!("session ended after {} frames", self.frames);
    }

    pub fn window(&self) -> &FileWindow<S> {
        &self.window
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

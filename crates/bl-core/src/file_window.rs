use std::fs::{File, Metadata};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::ViewerError;

/// Kind of filesystem object being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    CharDevice,
    BlockDevice,
    Pipe,
    Symlink,
    Socket,
    Unknown,
}

impl FileKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regular => "regular file",
            Self::Directory => "directory file",
            Self::CharDevice => "character device",
            Self::BlockDevice => "block device",
            Self::Pipe => "pipe",
            Self::Symlink => "symbolic link",
            Self::Socket => "socket",
            Self::Unknown => "unknown file type",
        }
    }

    fn of(metadata: &Metadata) -> Self {
        let ft = metadata.file_type();
        if ft.is_file() {
            return Self::Regular;
        }
        if ft.is_dir() {
            return Self::Directory;
        }
        if ft.is_symlink() {
            return Self::Symlink;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if ft.is_char_device() {
                return Self::CharDevice;
            }
            if ft.is_block_device() {
                return Self::BlockDevice;
            }
            if ft.is_fifo() {
                return Self::Pipe;
            }
            if ft.is_socket() {
                return Self::Socket;
            }
        }
        Self::Unknown
    }
}

/// What the metadata query reported at open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    pub size: u64,
    pub kind: FileKind,
    /// Permission bits (`0o777` mask).
    pub mode: u32,
}

impl FileInfo {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode() & 0o777
        };
        #[cfg(not(unix))]
        let mode = if metadata.permissions().readonly() { 0o444 } else { 0o644 };

        Self { size: metadata.len(), kind: FileKind::of(metadata), mode }
    }
}

/// Metadata outcome. The query can fail even on an open handle; the session
/// still runs without it.
pub type FileStat = Result<FileInfo, String>;

/// A fixed-capacity window paged over a seekable byte source.
///
/// `buffer` holds `capacity` bytes starting at `file_offset`. The hex and
/// ascii views show `viewport_size` bytes starting at `buffer_offset`.
pub struct FileWindow<S = File> {
    source: S,
    buffer: Vec<u8>,
    viewport_size: usize,
    file_offset: u64,
    buffer_offset: usize,
    needs_reload: bool,
    end_of_file_reached: bool,
    last_read: usize,
}

impl FileWindow<File> {
    /// Open `path` read-only and query its metadata.
    pub fn open(path: &Path, capacity: usize, viewport_size: usize) -> Result<(Self, FileStat), ViewerError> {
        let file = File::open(path).map_err(|e| ViewerError::FileOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let stat = match file.metadata() {
            Ok(metadata) => Ok(FileInfo::from_metadata(&metadata)),
            Err(e) => {
                log::warn!("metadata query failed for {}: {}", path.display(), e);
                Err(e.to_string())
            }
        };

        if let Ok(info) = &stat {
            log::info!("Opened: {} ({}, {} bytes)", path.display(), info.kind.label(), info.size);
        }

        Ok((Self::new(file, capacity, viewport_size)?, stat))
    }
}

impl<S: Read + Seek> FileWindow<S> {
    pub fn new(source: S, capacity: usize, viewport_size: usize) -> Result<Self, ViewerError> {
        if viewport_size == 0 || viewport_size > capacity {
            return Err(ViewerError::Config(format!(
                "viewport of {} bytes does not fit a buffer of {} bytes",
                viewport_size, capacity
            )));
        }

        Ok(Self {
            source,
            buffer: vec![0; capacity],
            viewport_size,
            file_offset: 0,
            buffer_offset: 0,
            needs_reload: true,
            end_of_file_reached: false,
            last_read: 0,
        })
    }

    /// Refill the buffer from `file_offset`. Returns the number of file bytes read;
    /// anything short of the capacity is zero fill and locks forward paging.
    ///
    /// A failed seek or read leaves an all-zero buffer that counts as empty:
    /// forward paging is locked and `needs_reload` stays set, so the next
    /// redraw tries again.
    pub fn reload(&mut self) -> Result<usize, ViewerError> {
        self.buffer.fill(0);
        let read = match self.fill_buffer() {
            Ok(read) => read,
            Err(e) => {
                self.last_read = 0;
                self.end_of_file_reached = true;
                return Err(e.into());
            }
        };

        self.last_read = read;
        self.end_of_file_reached = read < self.buffer.len();
        self.needs_reload = false;

        log::debug!(
            "reload at 0x{:x}: {} of {} bytes{}",
            self.file_offset,
            read,
            self.buffer.len(),
            if self.end_of_file_reached { " (eof)" } else { "" }
        );
        Ok(read)
    }

    fn fill_buffer(&mut self) -> std::io::Result<usize> {
        self.source.seek(SeekFrom::Start(self.file_offset))?;
        read_full(&mut self.source, &mut self.buffer)
    }

    /// Scroll forward by `step` bytes, inside the buffer while there is room,
    /// otherwise by moving the file offset.
    pub fn page_down(&mut self, step: usize) {
        if self.buffer_offset + self.viewport_size < self.capacity() {
            self.buffer_offset = (self.buffer_offset + step).min(self.max_buffer_offset());
        } else if !self.end_of_file_reached {
            self.file_offset += step as u64;
            self.needs_reload = true;
        }
    }

    /// Scroll back by `step` bytes, inside the buffer first, then the file offset.
    pub fn page_up(&mut self, step: usize) {
        if self.buffer_offset > 0 {
            self.buffer_offset = self.buffer_offset.saturating_sub(step);
        } else {
            self.file_offset = self.file_offset.saturating_sub(step as u64);
            self.needs_reload = true;
        }
    }

    /// Move the file offset forward by a whole buffer.
    pub fn jump_down(&mut self) {
        if self.end_of_file_reached {
            return;
        }
        self.file_offset += self.capacity() as u64;
        self.needs_reload = true;
    }

    /// Move the file offset back by a whole buffer, stopping at 0.
    pub fn jump_up(&mut self) {
        self.file_offset = self.file_offset.saturating_sub(self.capacity() as u64);
        self.needs_reload = true;
    }
}

impl<S> FileWindow<S> {
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn viewport_size(&self) -> usize {
        self.viewport_size
    }

    pub fn file_offset(&self) -> u64 {
        self.file_offset
    }

    pub fn buffer_offset(&self) -> usize {
        self.buffer_offset
    }

    pub fn needs_reload(&self) -> bool {
        self.needs_reload
    }

    pub fn end_of_file_reached(&self) -> bool {
        self.end_of_file_reached
    }

    /// File bytes present in the buffer after the last reload.
    pub fn last_read(&self) -> usize {
        self.last_read
    }

    fn max_buffer_offset(&self) -> usize {
        self.capacity() - self.viewport_size
    }
}

/// Read until `buf` is full or the source is exhausted.
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const COLS: usize = 32;
    const ROWS: usize = 500;
    const CAPACITY: usize = COLS * ROWS;
    const VIEWPORT: usize = 64 * 16;
    const STEP: usize = 4 * COLS;

    fn create_fixture(data: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("failed to create temp file");
        f.write_all(data).expect("failed to write fixture");
        f.flush().expect("failed to flush");
        f
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    fn window(data: Vec<u8>) -> FileWindow<Cursor<Vec<u8>>> {
        FileWindow::new(Cursor::new(data), CAPACITY, VIEWPORT).unwrap()
    }

    fn scroll_to_bottom<S: Read + Seek>(w: &mut FileWindow<S>) {
        while w.buffer_offset() + w.viewport_size() < w.capacity() {
            w.page_down(STEP);
        }
    }

    #[test]
    fn ten_byte_file_hits_eof_with_zero_fill() {
        let data = b"0123456789";
        let f = create_fixture(data);
        let (mut w, stat) = FileWindow::open(f.path(), CAPACITY, VIEWPORT).unwrap();

        assert!(w.needs_reload());
        assert_eq!(w.reload().unwrap(), 10);
        assert!(w.end_of_file_reached());
        assert!(!w.needs_reload());
        assert_eq!(&w.buffer()[..10], data);
        assert_eq!(w.buffer()[10..].len(), 15990);
        assert!(w.buffer()[10..].iter().all(|&b| b == 0));

        let info = stat.unwrap();
        assert_eq!(info.size, 10);
        assert_eq!(info.kind, FileKind::Regular);
    }

    #[test]
    fn open_missing_file_reports_path() {
        let err = FileWindow::open(Path::new("/nonexistent/file.bin"), CAPACITY, VIEWPORT)
            .err()
            .unwrap();
        match err {
            ViewerError::FileOpen { path, .. } => assert_eq!(path, Path::new("/nonexistent/file.bin")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn full_buffer_clears_eof() {
        let mut w = window(pattern(CAPACITY * 2));
        w.reload().unwrap();
        assert!(!w.end_of_file_reached());
        assert_eq!(w.last_read(), CAPACITY);
    }

    #[test]
    fn exact_capacity_file_is_not_eof_at_start() {
        let mut w = window(pattern(CAPACITY));
        w.reload().unwrap();
        assert!(!w.end_of_file_reached());

        w.jump_down();
        w.reload().unwrap();
        assert!(w.end_of_file_reached());
        assert_eq!(w.last_read(), 0);
        assert!(w.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn reload_zero_fills_stale_bytes() {
        let mut data = vec![0xAA; CAPACITY];
        data.extend_from_slice(&[0x55; 100]);
        let mut w = window(data);
        w.reload().unwrap();
        assert_eq!(w.buffer()[CAPACITY - 1], 0xAA);

        w.jump_down();
        w.reload().unwrap();
        assert_eq!(w.buffer()[99], 0x55);
        assert_eq!(w.buffer()[100], 0);
        assert_eq!(w.buffer()[CAPACITY - 1], 0);
    }

    #[test]
    fn page_down_scrolls_inside_buffer_first() {
        let mut w = window(pattern(CAPACITY * 3));
        w.reload().unwrap();
        w.page_down(STEP);
        assert_eq!(w.buffer_offset(), STEP);
        assert_eq!(w.file_offset(), 0);
        assert!(!w.needs_reload());
        assert_eq!(w.buffer()[w.buffer_offset()], w.buffer()[STEP]);
    }

    #[test]
    fn page_down_at_bottom_moves_file_offset() {
        let mut w = window(pattern(CAPACITY * 3));
        w.reload().unwrap();
        scroll_to_bottom(&mut w);
        assert_eq!(w.buffer_offset() + VIEWPORT, CAPACITY);

        w.page_down(STEP);
        assert_eq!(w.file_offset(), (4 * COLS) as u64);
        assert!(w.needs_reload());
        assert_eq!(w.buffer_offset(), CAPACITY - VIEWPORT);
    }

    #[test]
    fn page_down_refused_at_eof() {
        let mut w = window(pattern(100));
        w.reload().unwrap();
        scroll_to_bottom(&mut w);
        w.page_down(STEP);
        assert_eq!(w.file_offset(), 0);
        assert!(!w.needs_reload());
    }

    #[test]
    fn page_down_clamps_unaligned_step() {
        let mut w = FileWindow::new(Cursor::new(pattern(4096)), 1000, 300).unwrap();
        w.reload().unwrap();
        for _ in 0..10 {
            w.page_down(256);
        }
        assert_eq!(w.buffer_offset(), 700);
    }

    #[test]
    fn page_up_floors_file_offset_at_zero() {
        let mut w = window(pattern(CAPACITY * 2));
        w.reload().unwrap();
        for _ in 0..5 {
            w.page_up(STEP);
            assert_eq!(w.file_offset(), 0);
            assert!(w.needs_reload());
            w.reload().unwrap();
        }
    }

    #[test]
    fn page_up_scrolls_buffer_before_file() {
        let mut w = window(pattern(CAPACITY * 3));
        w.reload().unwrap();
        scroll_to_bottom(&mut w);
        w.page_down(STEP);
        w.reload().unwrap();

        w.page_up(STEP);
        assert_eq!(w.file_offset(), STEP as u64);
        assert_eq!(w.buffer_offset(), CAPACITY - VIEWPORT - STEP);
        assert!(!w.needs_reload());
    }

    #[test]
    fn page_up_clamps_buffer_offset() {
        let mut w = FileWindow::new(Cursor::new(pattern(4096)), 1000, 300).unwrap();
        w.reload().unwrap();
        w.page_down(100);
        w.page_up(256);
        assert_eq!(w.buffer_offset(), 0);
    }

    #[test]
    fn jump_down_refused_at_eof_and_unlocked_by_moving_back() {
        let mut w = window(pattern(CAPACITY + 10));
        w.reload().unwrap();
        w.jump_down();
        assert_eq!(w.file_offset(), CAPACITY as u64);
        w.reload().unwrap();
        assert!(w.end_of_file_reached());

        w.jump_down();
        assert_eq!(w.file_offset(), CAPACITY as u64);
        assert!(!w.needs_reload());

        w.jump_up();
        assert_eq!(w.file_offset(), 0);
        assert!(w.needs_reload());
        w.reload().unwrap();
        assert!(!w.end_of_file_reached());
    }

    #[test]
    fn jump_up_floors_at_zero() {
        let mut w = window(pattern(CAPACITY * 3));
        w.reload().unwrap();
        w.page_down(STEP);
        w.jump_up();
        assert_eq!(w.file_offset(), 0);
        assert!(w.needs_reload());
        assert_eq!(w.buffer_offset(), STEP);
    }

    #[test]
    fn viewport_larger_than_capacity_rejected() {
        assert!(FileWindow::new(Cursor::new(Vec::new()), 100, 200).is_err());
        assert!(FileWindow::new(Cursor::new(Vec::new()), 100, 0).is_err());
    }

    #[test]
    fn random_navigation_keeps_invariants() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        let file_len = CAPACITY * 3 + 777;
        let mut w = window(pattern(file_len));
        w.reload().unwrap();

        for _ in 0..2000 {
            match rng.gen_range(0..4) {
                0 => w.page_down(STEP),
                1 => w.page_up(STEP),
                2 => w.jump_down(),
                _ => w.jump_up(),
            }
            assert!(w.buffer_offset() <= CAPACITY - VIEWPORT);
            assert_eq!(w.file_offset() % COLS as u64, 0);
            if w.needs_reload() {
                let read = w.reload().unwrap();
                let expected = file_len.saturating_sub(w.file_offset() as usize).min(CAPACITY);
                assert_eq!(read, expected);
                assert_eq!(w.end_of_file_reached(), read < CAPACITY);
            }
        }
    }

    #[test]
    fn read_full_retries_interrupted_reads() {
        struct Flaky {
            inner: Cursor<Vec<u8>>,
            interrupted: bool,
        }

        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(std::io::Error::new(ErrorKind::Interrupted, "signal"));
                }
                let n = buf.len().min(3);
                self.inner.read(&mut buf[..n])
            }
        }

        let mut src = Flaky { inner: Cursor::new(b"abcdefgh".to_vec()), interrupted: false };
        let mut buf = [0u8; 16];
        assert_eq!(read_full(&mut src, &mut buf).unwrap(), 8);
        assert_eq!(&buf[..8], b"abcdefgh");
    }

    #[test]
    fn failed_reload_counts_as_empty_and_locks_forward_paging() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        struct Failing {
            inner: Cursor<Vec<u8>>,
            fail: Arc<AtomicBool>,
        }

        impl Read for Failing {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.fail.load(Ordering::SeqCst) {
                    return Err(std::io::Error::new(ErrorKind::Other, "bad sector"));
                }
                self.inner.read(buf)
            }
        }

        impl Seek for Failing {
            fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
                self.inner.seek(pos)
            }
        }

        let fail = Arc::new(AtomicBool::new(false));
        let src = Failing { inner: Cursor::new(pattern(CAPACITY * 3)), fail: Arc::clone(&fail) };
        let mut w = FileWindow::new(src, CAPACITY, VIEWPORT).unwrap();
        assert_eq!(w.reload().unwrap(), CAPACITY);

        fail.store(true, Ordering::SeqCst);
        w.jump_down();
        assert!(matches!(w.reload(), Err(ViewerError::Read(_))));
        assert_eq!(w.last_read(), 0);
        assert!(w.end_of_file_reached());
        assert!(w.needs_reload());
        assert!(w.buffer().iter().all(|&b| b == 0));

        w.jump_down();
        assert_eq!(w.file_offset(), CAPACITY as u64);

        fail.store(false, Ordering::SeqCst);
        assert_eq!(w.reload().unwrap(), CAPACITY);
        assert!(!w.end_of_file_reached());
        assert_eq!(w.buffer()[0], pattern(CAPACITY * 2)[CAPACITY]);
    }

    #[test]
    fn file_kind_labels() {
        assert_eq!(FileKind::Regular.label(), "regular file");
        assert_eq!(FileKind::Pipe.label(), "pipe");
    }
}

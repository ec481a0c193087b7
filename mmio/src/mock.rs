//! In-memory register windows for testing drivers without hardware.
//!
//! A [`MockMapper`] owns a single backing store of 32-bit words that
//! outlives the windows it hands out, the way hardware registers keep their
//! values across remaps. Tests inspect and seed the store through the
//! mapper, and can make the next open or subsequent reads fail.

use std::io;
use std::sync::Arc;

use spin::Mutex;

use crate::{AccessFault, DEFAULT_DEVICE, MapError, Mapper, Offset, RegisterMap};

#[derive(Debug, Default)]
struct State {
    words: Vec<u32>,
    deny_access: bool,
    out_of_memory: bool,
    map_failed: bool,
    fail_reads: bool,
    opened: usize,
    live: usize,
}

/// Mapper backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct MockMapper {
    state: Arc<Mutex<State>>,
}

impl MockMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make opens fail as if the memory device were not accessible.
    pub fn deny_access(&self, deny: bool) {
        self.state.lock().deny_access = deny;
    }

    /// Make opens fail as if the kernel were out of memory.
    pub fn fail_allocation(&self, fail: bool) {
        self.state.lock().out_of_memory = fail;
    }

    /// Make opens fail as if `mmap` rejected the range.
    pub fn fail_mapping(&self, fail: bool) {
        self.state.lock().map_failed = fail;
    }

    /// Make reads through every window report a bus error.
    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    /// Current value of the word at `offset`, zero if never touched.
    pub fn peek(&self, offset: Offset) -> u32 {
        self.state
            .lock()
            .words
            .get(offset.word_index())
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite the word at `offset`, as external hardware would.
    pub fn poke(&self, offset: Offset, value: u32) {
        let mut state = self.state.lock();
        let index = offset.word_index();
        if state.words.len() <= index {
            state.words.resize(index + 1, 0);
        }
        state.words[index] = value;
    }

    /// Copy of the whole backing store.
    pub fn snapshot(&self) -> Vec<u32> {
        self.state.lock().words.clone()
    }

    /// Number of windows successfully opened so far.
    pub fn windows_opened(&self) -> usize {
        self.state.lock().opened
    }

    /// Number of windows opened and not yet closed.
    pub fn live_windows(&self) -> usize {
        self.state.lock().live
    }
}

impl Mapper for MockMapper {
    type Window = MockWindow;

    fn open_window(&self, physical_base: usize, length: usize) -> Result<MockWindow, MapError> {
        let mut state = self.state.lock();

        if state.deny_access {
            return Err(MapError::PermissionDenied {
                path: DEFAULT_DEVICE.into(),
                source: io::ErrorKind::PermissionDenied.into(),
            });
        }
        if state.out_of_memory {
            return Err(MapError::OutOfMemory { length });
        }
        if state.map_failed {
            return Err(MapError::MapFailed {
                physical_base,
                length,
                source: io::ErrorKind::InvalidInput.into(),
            });
        }

        let words = length.div_ceil(4);
        if state.words.len() < words {
            state.words.resize(words, 0);
        }
        state.opened += 1;
        state.live += 1;

        Ok(MockWindow {
            state: Arc::clone(&self.state),
            len: length,
            open: true,
        })
    }
}

/// Window over a [`MockMapper`]'s backing store.
#[derive(Debug)]
pub struct MockWindow {
    state: Arc<Mutex<State>>,
    len: usize,
    open: bool,
}

impl MockWindow {
    fn check(&self, offset: Offset) -> Result<usize, AccessFault> {
        if !self.open {
            return Err(AccessFault::Closed);
        }
        if !offset.fits(self.len) {
            return Err(AccessFault::OutOfBounds {
                offset,
                len: self.len,
            });
        }
        Ok(offset.word_index())
    }
}

impl RegisterMap for MockWindow {
    fn read_word(&self, offset: Offset) -> Result<u32, AccessFault> {
        let index = self.check(offset)?;
        let state = self.state.lock();
        if state.fail_reads {
            return Err(AccessFault::Bus(offset));
        }
        Ok(state.words[index])
    }

    fn write_word(&self, offset: Offset, value: u32) -> Result<(), AccessFault> {
        let index = self.check(offset)?;
        self.state.lock().words[index] = value;
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.state.lock().live -= 1;
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        self.close();
    }
}

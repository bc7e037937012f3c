//! Test doubles shared by the unit tests

use rand_core::{impls, Error, RngCore};

use crate::traits::display::{FlashMask, SegmentDisplay, DISPLAY_CELLS};

/// In-memory display that records flushes and replays button samples
pub struct MockDisplay {
    pub cells: [u8; DISPLAY_CELLS],
    pub flash: FlashMask,
    pub flushes: usize,
    pub last_flush_ms: Option<u64>,
    pub buttons: u8,
    pub reads: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            cells: [0; DISPLAY_CELLS],
            flash: FlashMask::NONE,
            flushes: 0,
            last_flush_ms: None,
            buttons: 0,
            reads: 0,
        }
    }
}

impl SegmentDisplay for MockDisplay {
    fn cell(&self, index: usize) -> u8 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    fn set_cell(&mut self, index: usize, value: u8) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = value;
        }
    }

    fn flash(&self) -> FlashMask {
        self.flash
    }

    fn set_flash(&mut self, mask: FlashMask) {
        self.flash = mask;
    }

    fn flush(&mut self, now_ms: u64) {
        self.flushes += 1;
        self.last_flush_ms = Some(now_ms);
    }

    fn read_buttons(&mut self) -> u8 {
        self.reads += 1;
        self.buttons
    }
}

/// Random source that cycles through a fixed list of words
pub struct ScriptedRng {
    values: [u32; 8],
    len: usize,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: &[u32]) -> Self {
        assert!(!values.is_empty() && values.len() <= 8);
        let mut stored = [0; 8];
        stored[..values.len()].copy_from_slice(values);
        Self {
            values: stored,
            len: values.len(),
            next: 0,
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.len;
        value
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

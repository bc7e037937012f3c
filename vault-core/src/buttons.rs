//! Button edge detection
//!
//! Turns raw key-scan bitmasks into per-sample release events. A bit is set
//! in the returned mask exactly when that button was held in the previous
//! sample and is up in this one. Presses and held buttons report nothing.
//! There is no filtering beyond the single-sample comparison, so contact
//! bounce faster than the sample period passes straight through.

/// Edge detector over consecutive button samples
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdgeTracker {
    last_sample: u8,
}

impl ButtonEdgeTracker {
    /// Create a tracker with no buttons held
    pub const fn new() -> Self {
        Self { last_sample: 0 }
    }

    /// Feed a new sample and return the buttons released since the last one
    pub fn sample(&mut self, current: u8) -> u8 {
        let released = released_mask(self.last_sample, current);
        self.last_sample = current;
        released
    }

    /// Buttons that went down between the last sample and `current`
    ///
    /// Does not update the stored sample.
    pub fn pressed(&self, current: u8) -> u8 {
        (current ^ self.last_sample) & current
    }
}

/// Bits that went from pressed (1) to released (0)
pub const fn released_mask(previous: u8, current: u8) -> u8 {
    (current ^ previous) & !current
}

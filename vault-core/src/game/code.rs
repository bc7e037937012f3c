//! Four-digit combination
//!
//! Used for both the secret and the player's guess.

use rand_core::RngCore;

use crate::traits::display::CODE_DIGITS;

/// A four-digit code, each digit in 0-9
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Code([u8; CODE_DIGITS]);

impl Code {
    /// All zeros
    pub const ZERO: Self = Self([0; CODE_DIGITS]);

    /// Build a code from digits, wrapping each into 0-9
    pub const fn new(digits: [u8; CODE_DIGITS]) -> Self {
        Self([digits[0] % 10, digits[1] % 10, digits[2] % 10, digits[3] % 10])
    }

    /// Draw a code from a random source, one word per digit
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut digits = [0; CODE_DIGITS];
        for digit in digits.iter_mut() {
            *digit = (rng.next_u32() % 10) as u8;
        }
        Self(digits)
    }

    /// All digits, leftmost first
    pub fn digits(&self) -> &[u8; CODE_DIGITS] {
        &self.0
    }

    /// Digit at `position`
    pub fn digit(&self, position: usize) -> u8 {
        self.0[position]
    }

    /// Step the digit at `position` up by one, 9 wraps to 0
    pub fn increment(&mut self, position: usize) {
        let digit = &mut self.0[position];
        *digit = (*digit + 1) % 10;
        debug_assert!(*digit <= 9);
    }

    /// Per-position comparison against `other`
    pub fn matched_positions(&self, other: &Code) -> [bool; CODE_DIGITS] {
        let mut matched = [false; CODE_DIGITS];
        for (position, slot) in matched.iter_mut().enumerate() {
            *slot = self.0[position] == other.0[position];
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRng;

    #[test]
    fn test_increment_wraps() {
        let mut code = Code::new([9, 0, 0, 0]);
        code.increment(0);
        assert_eq!(code.digit(0), 0);
    }

    #[test]
    fn test_ten_increments_round_trip() {
        for start in 0..10 {
            let mut code = Code::new([start, 0, 0, 0]);
            for _ in 0..10 {
                code.increment(0);
                assert!(code.digit(0) <= 9);
            }
            assert_eq!(code.digit(0), start);
        }
    }

    #[test]
    fn test_new_wraps_digits() {
        assert_eq!(Code::new([10, 11, 19, 3]).digits(), &[0, 1, 9, 3]);
    }

    #[test]
    fn test_random_uses_modulo_ten() {
        let mut rng = ScriptedRng::new(&[13, 21, 4, 99]);
        assert_eq!(Code::random(&mut rng).digits(), &[3, 1, 4, 9]);
    }

    #[test]
    fn test_matched_positions() {
        let secret = Code::new([3, 1, 4, 1]);
        let guess = Code::new([3, 0, 4, 0]);
        assert_eq!(secret.matched_positions(&guess), [true, false, true, false]);
        assert_eq!(secret.matched_positions(&secret), [true; 4]);
    }
}

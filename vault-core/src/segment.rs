//! 7-segment glyph encoding
//!
//! Each glyph byte drives one digit plus its decimal point:
//!
//! ```text
//!  Msb   P G F E D C B A   Lsb
//! ```
//!
//! - P: decimal point
//! - G: middle horizontal
//! - F/E: top/bottom left
//! - D: bottom horizontal
//! - C/B: bottom/top right
//! - A: top horizontal

/// Decimal point bit
pub const DECIMAL_POINT: u8 = 0x80;

/// All segments off
pub const BLANK: u8 = 0x00;

/// Hex digit glyphs 0-F
pub const DIGITS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79,
    0x71,
];

/// The word "C0dE", shown in place of the guess before play starts
pub const CODE_WORD: [i16; 4] = [12, 0, 13, 14];

/// Encode a value as a glyph
///
/// - Negative values blank the digit
/// - Values above 15 show `value % 16` with the decimal point lit
pub fn encode_digit(value: i16) -> u8 {
    if value < 0 {
        return BLANK;
    }
    let glyph = DIGITS[(value % 16) as usize];
    if value > 15 {
        glyph | DECIMAL_POINT
    } else {
        glyph
    }
}

/// Decode a glyph back into `(digit, decimal_point)`
///
/// Returns `None` for blank cells and segment patterns outside the table.
pub fn decode_glyph(glyph: u8) -> Option<(u8, bool)> {
    let segments = glyph & !DECIMAL_POINT;
    DIGITS
        .iter()
        .position(|&g| g == segments)
        .map(|d| (d as u8, glyph & DECIMAL_POINT != 0))
}

//! Fixed 8x10 bitmap font for the lightweight overlay.
//!
//! One glyph per 10 packed row bytes, ASCII 32..=126. Bit 7 of a row byte is
//! the leftmost column; only bits 7..2 are rendered (the low two bits are
//! cell padding). Face adapted from the public-domain CP437 8x8 set, top
//! aligned in the 10-row cell.

/// Rows per glyph cell.
pub(super) const GLYPH_ROWS: usize = 10;

/// First covered character code (space).
pub(super) const FIRST_CHAR: u8 = 32;

/// Last covered character code ('~').
pub(super) const LAST_CHAR: u8 = 126;

const GLYPH_COUNT: usize = (LAST_CHAR - FIRST_CHAR + 1) as usize;

const BLANK: [u8; GLYPH_ROWS] = [0; GLYPH_ROWS];

/// Glyph rows for a character code. Codes outside the covered range map to
/// the blank glyph rather than indexing out of the table.
pub(super) fn glyph(code: u8) -> &'static [u8; GLYPH_ROWS] {
    if !(FIRST_CHAR..=LAST_CHAR).contains(&code) {
        return &BLANK;
    }
    &FONT[(code - FIRST_CHAR) as usize]
}

#[rustfmt::skip]
const FONT: [[u8; GLYPH_ROWS]; GLYPH_COUNT] = [
    // 32 ' '
    [0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00],
    // 33 '!'
    [0x18,0x18,0x18,0x18,0x18,0x00,0x18,0x00,0x00,0x00],
    // 34 '"'
    [0x6C,0x6C,0x24,0x00,0x00,0x00,0x00,0x00,0x00,0x00],
    // 35 '#'
    [0x6C,0xFE,0x6C,0x6C,0xFE,0x6C,0x00,0x00,0x00,0x00],
    // 36 '$'
    [0x18,0x7E,0xC0,0x7C,0x06,0xFC,0x18,0x00,0x00,0x00],
    // 37 '%'
    [0xC6,0xCC,0x18,0x30,0x66,0xC6,0x00,0x00,0x00,0x00],
    // 38 '&'
    [0x38,0x6C,0x38,0x76,0xDC,0xCC,0x76,0x00,0x00,0x00],
    // 39 '''
    [0x18,0x18,0x30,0x00,0x00,0x00,0x00,0x00,0x00,0x00],
    // 40 '('
    [0x0C,0x18,0x30,0x30,0x30,0x18,0x0C,0x00,0x00,0x00],
    // 41 ')'
    [0x30,0x18,0x0C,0x0C,0x0C,0x18,0x30,0x00,0x00,0x00],
    // 42 '*'
    [0x00,0x66,0x3C,0xFF,0x3C,0x66,0x00,0x00,0x00,0x00],
    // 43 '+'
    [0x00,0x18,0x18,0x7E,0x18,0x18,0x00,0x00,0x00,0x00],
    // 44 ','
    [0x00,0x00,0x00,0x00,0x00,0x18,0x18,0x30,0x00,0x00],
    // 45 '-'
    [0x00,0x00,0x00,0x7E,0x00,0x00,0x00,0x00,0x00,0x00],
    // 46 '.'
    [0x00,0x00,0x00,0x00,0x00,0x18,0x18,0x00,0x00,0x00],
    // 47 '/'
    [0x06,0x0C,0x18,0x30,0x60,0xC0,0x00,0x00,0x00,0x00],
    // 48 '0'
    [0x7C,0xCE,0xDE,0xF6,0xE6,0xC6,0x7C,0x00,0x00,0x00],
    // 49 '1'
    [0x18,0x38,0x18,0x18,0x18,0x18,0x7E,0x00,0x00,0x00],
    // 50 '2'
    [0x7C,0xC6,0x06,0x1C,0x30,0x60,0xFE,0x00,0x00,0x00],
    // 51 '3'
    [0x7C,0xC6,0x06,0x3C,0x06,0xC6,0x7C,0x00,0x00,0x00],
    // 52 '4'
    [0x1C,0x3C,0x6C,0xCC,0xFE,0x0C,0x0C,0x00,0x00,0x00],
    // 53 '5'
    [0xFE,0xC0,0xFC,0x06,0x06,0xC6,0x7C,0x00,0x00,0x00],
    // 54 '6'
    [0x3C,0x60,0xC0,0xFC,0xC6,0xC6,0x7C,0x00,0x00,0x00],
    // 55 '7'
    [0xFE,0x06,0x0C,0x18,0x30,0x30,0x30,0x00,0x00,0x00],
    // 56 '8'
    [0x7C,0xC6,0xC6,0x7C,0xC6,0xC6,0x7C,0x00,0x00,0x00],
    // 57 '9'
    [0x7C,0xC6,0xC6,0x7E,0x06,0x0C,0x78,0x00,0x00,0x00],
    // 58 ':'
    [0x00,0x18,0x18,0x00,0x00,0x18,0x18,0x00,0x00,0x00],
    // 59 ';'
    [0x00,0x18,0x18,0x00,0x00,0x18,0x18,0x30,0x00,0x00],
    // 60 '<'
    [0x0C,0x18,0x30,0x60,0x30,0x18,0x0C,0x00,0x00,0x00],
    // 61 '='
    [0x00,0x00,0x7E,0x00,0x7E,0x00,0x00,0x00,0x00,0x00],
    // 62 '>'
    [0x60,0x30,0x18,0x0C,0x18,0x30,0x60,0x00,0x00,0x00],
    // 63 '?'
    [0x7C,0xC6,0x0C,0x18,0x18,0x00,0x18,0x00,0x00,0x00],
    // 64 '@'
    [0x7C,0xC6,0xDE,0xDE,0xDC,0xC0,0x7C,0x00,0x00,0x00],
    // 65 'A'
    [0x38,0x6C,0xC6,0xC6,0xFE,0xC6,0xC6,0x00,0x00,0x00],
    // 66 'B'
    [0xFC,0xC6,0xC6,0xFC,0xC6,0xC6,0xFC,0x00,0x00,0x00],
    // 67 'C'
    [0x7C,0xC6,0xC0,0xC0,0xC0,0xC6,0x7C,0x00,0x00,0x00],
    // 68 'D'
    [0xF8,0xCC,0xC6,0xC6,0xC6,0xCC,0xF8,0x00,0x00,0x00],
    // 69 'E'
    [0xFE,0xC0,0xC0,0xFC,0xC0,0xC0,0xFE,0x00,0x00,0x00],
    // 70 'F'
    [0xFE,0xC0,0xC0,0xFC,0xC0,0xC0,0xC0,0x00,0x00,0x00],
    // 71 'G'
    [0x7C,0xC6,0xC0,0xCE,0xC6,0xC6,0x7E,0x00,0x00,0x00],
    // 72 'H'
    [0xC6,0xC6,0xC6,0xFE,0xC6,0xC6,0xC6,0x00,0x00,0x00],
    // 73 'I'
    [0x7E,0x18,0x18,0x18,0x18,0x18,0x7E,0x00,0x00,0x00],
    // 74 'J'
    [0x06,0x06,0x06,0x06,0xC6,0xC6,0x7C,0x00,0x00,0x00],
    // 75 'K'
    [0xC6,0xCC,0xD8,0xF0,0xD8,0xCC,0xC6,0x00,0x00,0x00],
    // 76 'L'
    [0xC0,0xC0,0xC0,0xC0,0xC0,0xC0,0xFE,0x00,0x00,0x00],
    // 77 'M'
    [0xC6,0xEE,0xFE,0xD6,0xC6,0xC6,0xC6,0x00,0x00,0x00],
    // 78 'N'
    [0xC6,0xE6,0xF6,0xDE,0xCE,0xC6,0xC6,0x00,0x00,0x00],
    // 79 'O'
    [0x7C,0xC6,0xC6,0xC6,0xC6,0xC6,0x7C,0x00,0x00,0x00],
    // 80 'P'
    [0xFC,0xC6,0xC6,0xFC,0xC0,0xC0,0xC0,0x00,0x00,0x00],
    // 81 'Q'
    [0x7C,0xC6,0xC6,0xC6,0xD6,0xDE,0x7C,0x06,0x00,0x00],
    // 82 'R'
    [0xFC,0xC6,0xC6,0xFC,0xD8,0xCC,0xC6,0x00,0x00,0x00],
    // 83 'S'
    [0x7C,0xC6,0xC0,0x7C,0x06,0xC6,0x7C,0x00,0x00,0x00],
    // 84 'T'
    [0xFE,0x18,0x18,0x18,0x18,0x18,0x18,0x00,0x00,0x00],
    // 85 'U'
    [0xC6,0xC6,0xC6,0xC6,0xC6,0xC6,0x7C,0x00,0x00,0x00],
    // 86 'V'
    [0xC6,0xC6,0xC6,0x6C,0x6C,0x38,0x10,0x00,0x00,0x00],
    // 87 'W'
    [0xC6,0xC6,0xC6,0xD6,0xFE,0xEE,0xC6,0x00,0x00,0x00],
    // 88 'X'
    [0xC6,0x6C,0x38,0x38,0x6C,0xC6,0xC6,0x00,0x00,0x00],
    // 89 'Y'
    [0xC6,0xC6,0x6C,0x38,0x18,0x18,0x18,0x00,0x00,0x00],
    // 90 'Z'
    [0xFE,0x0C,0x18,0x30,0x60,0xC0,0xFE,0x00,0x00,0x00],
    // 91 '['
    [0x3C,0x30,0x30,0x30,0x30,0x30,0x3C,0x00,0x00,0x00],
    // 92 '\'
    [0xC0,0x60,0x30,0x18,0x0C,0x06,0x00,0x00,0x00,0x00],
    // 93 ']'
    [0x3C,0x0C,0x0C,0x0C,0x0C,0x0C,0x3C,0x00,0x00,0x00],
    // 94 '^'
    [0x10,0x38,0x6C,0xC6,0x00,0x00,0x00,0x00,0x00,0x00],
    // 95 '_'
    [0x00,0x00,0x00,0x00,0x00,0x00,0xFE,0x00,0x00,0x00],
    // 96 '`'
    [0x30,0x18,0x0C,0x00,0x00,0x00,0x00,0x00,0x00,0x00],
    // 97 'a'
    [0x00,0x00,0x7C,0x06,0x7E,0xC6,0x7E,0x00,0x00,0x00],
    // 98 'b'
    [0xC0,0xC0,0xFC,0xC6,0xC6,0xC6,0xFC,0x00,0x00,0x00],
    // 99 'c'
    [0x00,0x00,0x7C,0xC6,0xC0,0xC6,0x7C,0x00,0x00,0x00],
    // 100 'd'
    [0x06,0x06,0x7E,0xC6,0xC6,0xC6,0x7E,0x00,0x00,0x00],
    // 101 'e'
    [0x00,0x00,0x7C,0xC6,0xFE,0xC0,0x7C,0x00,0x00,0x00],
    // 102 'f'
    [0x1C,0x36,0x30,0x7C,0x30,0x30,0x30,0x00,0x00,0x00],
    // 103 'g'
    [0x00,0x00,0x7E,0xC6,0xC6,0x7E,0x06,0x7C,0x00,0x00],
    // 104 'h'
    [0xC0,0xC0,0xFC,0xC6,0xC6,0xC6,0xC6,0x00,0x00,0x00],
    // 105 'i'
    [0x18,0x00,0x38,0x18,0x18,0x18,0x3C,0x00,0x00,0x00],
    // 106 'j'
    [0x0C,0x00,0x1C,0x0C,0x0C,0xCC,0xCC,0x78,0x00,0x00],
    // 107 'k'
    [0xC0,0xC0,0xCC,0xD8,0xF0,0xD8,0xCC,0x00,0x00,0x00],
    // 108 'l'
    [0x38,0x18,0x18,0x18,0x18,0x18,0x3C,0x00,0x00,0x00],
    // 109 'm'
    [0x00,0x00,0xCC,0xFE,0xD6,0xC6,0xC6,0x00,0x00,0x00],
    // 110 'n'
    [0x00,0x00,0xFC,0xC6,0xC6,0xC6,0xC6,0x00,0x00,0x00],
    // 111 'o'
    [0x00,0x00,0x7C,0xC6,0xC6,0xC6,0x7C,0x00,0x00,0x00],
    // 112 'p'
    [0x00,0x00,0xFC,0xC6,0xC6,0xFC,0xC0,0xC0,0x00,0x00],
    // 113 'q'
    [0x00,0x00,0x7E,0xC6,0xC6,0x7E,0x06,0x06,0x00,0x00],
    // 114 'r'
    [0x00,0x00,0xDC,0xE6,0xC0,0xC0,0xC0,0x00,0x00,0x00],
    // 115 's'
    [0x00,0x00,0x7E,0xC0,0x7C,0x06,0xFC,0x00,0x00,0x00],
    // 116 't'
    [0x30,0x30,0x7C,0x30,0x30,0x36,0x1C,0x00,0x00,0x00],
    // 117 'u'
    [0x00,0x00,0xC6,0xC6,0xC6,0xC6,0x7E,0x00,0x00,0x00],
    // 118 'v'
    [0x00,0x00,0xC6,0xC6,0x6C,0x38,0x10,0x00,0x00,0x00],
    // 119 'w'
    [0x00,0x00,0xC6,0xC6,0xD6,0xFE,0x6C,0x00,0x00,0x00],
    // 120 'x'
    [0x00,0x00,0xC6,0x6C,0x38,0x6C,0xC6,0x00,0x00,0x00],
    // 121 'y'
    [0x00,0x00,0xC6,0xC6,0xC6,0x7E,0x06,0x7C,0x00,0x00],
    // 122 'z'
    [0x00,0x00,0xFE,0x0C,0x38,0x60,0xFE,0x00,0x00,0x00],
    // 123 '{'
    [0x0E,0x18,0x18,0x70,0x18,0x18,0x0E,0x00,0x00,0x00],
    // 124 '|'
    [0x18,0x18,0x18,0x18,0x18,0x18,0x18,0x00,0x00,0x00],
    // 125 '}'
    [0x70,0x18,0x18,0x0E,0x18,0x18,0x70,0x00,0x00,0x00],
    // 126 '~'
    [0x76,0xDC,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covered_range_has_cells() {
        for code in FIRST_CHAR..=LAST_CHAR {
            let _ = glyph(code);
        }
    }

    #[test]
    fn test_out_of_range_is_blank() {
        assert_eq!(glyph(0), &BLANK);
        assert_eq!(glyph(31), &BLANK);
        assert_eq!(glyph(127), &BLANK);
        assert_eq!(glyph(255), &BLANK);
    }

    #[test]
    fn test_space_is_blank_and_digits_are_not() {
        assert_eq!(glyph(b' '), &BLANK);
        for code in b'0'..=b'9' {
            assert!(glyph(code).iter().any(|&row| row != 0));
        }
    }
}

//! Visible stand-ins for control codes.
//!
//! The ascii dump emits each byte as the character with the same code. Codes
//! that have no visible shape in Unicode fonts are drawn the way a DOS
//! codepage font shows them: C0 controls as the CP437 pictographs, DEL as a
//! house and the C1 range as the first two rows of CP850.

use std::borrow::Cow;

const C0: [char; 32] = [
    ' ', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
];

const C1: [char; 32] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', 'ø', '£', 'Ø', '×', 'ƒ',
];

/// Glyph to draw for `c`.
pub fn glyph(c: char) -> char {
    match c as u32 {
        code @ 0x00..=0x1f => C0[code as usize],
        0x7f => '⌂',
        code @ 0x80..=0x9f => C1[(code - 0x80) as usize],
        _ => c,
    }
}

/// `text` with every control code replaced by its glyph. Borrows when nothing changes.
pub fn visible(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| glyph(c) == c) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().map(glyph).collect())
    }
}

//! Byte cursor over a single line of source text.
//!
//! The cursor advances through the line byte-by-byte. Reads past the end
//! of the line return `0x00`, so scanning loops terminate on the
//! end-of-line check without a separate bounds branch on every read.
//! Lines are slices of a `&str`, so interior bytes follow UTF-8 rules;
//! [`bump_char`](Cursor::bump_char) advances past one whole character
//! when a token may start with a non-ASCII byte.

/// Byte cursor over one line.
///
/// Cheap to construct per line; the driving layer creates a fresh cursor
/// for every tokenize call and carries only byte offsets across calls.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// The full line, without its trailing newline.
    line: &'a [u8],
    /// Current read position (byte index into `line`).
    pos: u32,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over `line`, positioned at byte offset `at`.
    ///
    /// # Contract
    ///
    /// `at` must be at most `line.len()` and on a character boundary.
    pub fn new(line: &'a str, at: u32) -> Self {
        debug_assert!(
            (at as usize) <= line.len(),
            "cursor start {at} beyond line length {}",
            line.len()
        );
        debug_assert!(line.is_char_boundary(at as usize));
        Self {
            line: line.as_bytes(),
            pos: at,
        }
    }

    /// Returns the byte at the current position, or `0x00` at end of line.
    #[inline]
    pub fn current(&self) -> u8 {
        self.line.get(self.pos as usize).copied().unwrap_or(0)
    }

    /// Returns the byte one position ahead, or `0x00` past end of line.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.line.get(self.pos as usize + 1).copied().unwrap_or(0)
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Advance past one whole UTF-8 character.
    ///
    /// The character width is read from the leading byte. The line comes
    /// from a `&str`, so the encoding is valid and the width is exact.
    #[inline]
    pub fn bump_char(&mut self) {
        let b = self.current();
        let n = if b < 0x80 {
            1
        } else if b >= 0xF0 {
            4
        } else if b >= 0xE0 {
            3
        } else if b >= 0xC0 {
            2
        } else {
            1
        };
        self.pos += n;
    }

    /// Consume bytes while `pred` holds.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eol() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Returns `true` if the cursor has reached the end of the line.
    #[inline]
    pub fn is_eol(&self) -> bool {
        self.pos as usize >= self.line.len()
    }

    /// Current byte offset in the line.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// The unread remainder of the line.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.line[(self.pos as usize).min(self.line.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_returns_first_byte() {
        let cursor = Cursor::new("abc", 0);
        assert_eq!(cursor.current(), b'a');
    }

    #[test]
    fn current_at_offset() {
        let cursor = Cursor::new("abc", 2);
        assert_eq!(cursor.current(), b'c');
    }

    #[test]
    fn advance_moves_forward() {
        let mut cursor = Cursor::new("abc", 0);
        cursor.advance();
        assert_eq!(cursor.current(), b'b');
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn current_past_end_is_zero() {
        let cursor = Cursor::new("ab", 2);
        assert_eq!(cursor.current(), 0);
        assert!(cursor.is_eol());
    }

    #[test]
    fn peek_past_end_is_zero() {
        let mut cursor = Cursor::new("ab", 0);
        cursor.advance();
        assert_eq!(cursor.current(), b'b');
        assert_eq!(cursor.peek(), 0);
    }

    #[test]
    fn eat_while_stops_at_predicate_failure() {
        let mut cursor = Cursor::new("aaab", 0);
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'b');
    }

    #[test]
    fn eat_while_stops_at_end_of_line() {
        let mut cursor = Cursor::new("aaa", 0);
        cursor.eat_while(|b| b == b'a');
        assert!(cursor.is_eol());
    }

    #[test]
    fn bump_char_ascii() {
        let mut cursor = Cursor::new("ab", 0);
        cursor.bump_char();
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn bump_char_two_byte() {
        let mut cursor = Cursor::new("é!", 0);
        cursor.bump_char();
        assert_eq!(cursor.current(), b'!');
    }

    #[test]
    fn bump_char_three_and_four_byte() {
        let mut cursor = Cursor::new("€x", 0);
        cursor.bump_char();
        assert_eq!(cursor.current(), b'x');

        let mut cursor = Cursor::new("🦀x", 0);
        cursor.bump_char();
        assert_eq!(cursor.current(), b'x');
    }

    #[test]
    fn rest_returns_unread_tail() {
        let mut cursor = Cursor::new("abcd", 0);
        cursor.advance_n(2);
        assert_eq!(cursor.rest(), b"cd");
    }

    #[test]
    fn rest_at_end_is_empty() {
        let cursor = Cursor::new("ab", 2);
        assert_eq!(cursor.rest(), b"");
    }
}

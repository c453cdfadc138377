//! Hand-written line scanner producing `(RawTag, len)` pairs.
//!
//! The scanner operates on a [`Cursor`] over one line and produces
//! [`RawToken`] values with zero heap allocation. It does not resolve
//! keywords — that is deferred to the cooking layer in `rq_mode`.
//!
//! # Design
//!
//! Main dispatch matches on the current byte. Each arm calls a focused
//! method that advances the cursor and returns a tag; the caller derives
//! the length from the cursor movement. The only state that survives a
//! call is the [`LexMode`]: scanning a quoted literal switches to
//! [`LexMode::Literal`] keyed by the opening delimiter, and stays there
//! across line boundaries until the matching unescaped delimiter is
//! consumed. Everything else is permissive — an input that matches no
//! rule is consumed as a one-character word.

use memchr::memchr;

use crate::cursor::Cursor;
use crate::tag::{Punct, RawTag, RawToken};

/// Which sub-lexer is active.
///
/// Exactly one mode is active at a time; `Literal` always eventually
/// returns to `Base` (on a matching unescaped delimiter) or persists
/// across the line boundary when the literal is unterminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LexMode {
    /// Ordinary token dispatch.
    #[default]
    Base,
    /// Inside a quoted literal opened by this delimiter byte
    /// (`b'"'` or `b'\''`).
    Literal(u8),
}

/// Resumable single-line scanner.
///
/// Create one per tokenize call (cheap) or reuse one across the calls
/// for a line; the [`LexMode`] passed to [`scan`](Scanner::scan) is the
/// only cross-line state.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `line`, positioned at byte offset `at`.
    pub fn new(line: &'a str, at: u32) -> Self {
        Self {
            cursor: Cursor::new(line, at),
        }
    }

    /// Scan exactly one token.
    ///
    /// # Contract
    ///
    /// Must not be called with the cursor at end of line. Always
    /// consumes at least one byte.
    pub fn scan(&mut self, mode: &mut LexMode) -> RawToken {
        debug_assert!(!self.cursor.is_eol(), "scan called at end of line");
        let start = self.cursor.pos();
        let tag = if at_space(&self.cursor) {
            self.whitespace()
        } else {
            match *mode {
                LexMode::Literal(delim) => self.literal(delim, mode),
                LexMode::Base => self.base(mode),
            }
        };
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    fn base(&mut self, mode: &mut LexMode) -> RawTag {
        match self.cursor.current() {
            b'$' | b'?' => self.variable(),
            b'<' => self.angle(),
            quote @ (b'"' | b'\'') => {
                self.cursor.advance();
                *mode = LexMode::Literal(quote);
                self.literal(quote, mode)
            }
            b'{' => self.punct(Punct::LBrace),
            b'}' => self.punct(Punct::RBrace),
            b'(' => self.punct(Punct::LParen),
            b')' => self.punct(Punct::RParen),
            b'[' => self.punct(Punct::LBracket),
            b']' => self.punct(Punct::RBracket),
            b',' => self.punct(Punct::Comma),
            b'.' => self.punct(Punct::Dot),
            b';' => self.punct(Punct::Semicolon),
            b'#' => self.comment(),
            b'*' | b'+' | b'-' | b'>' | b'=' | b'&' | b'|' => self.operator(),
            b':' => self.local_name(),
            _ => self.word(),
        }
    }

    /// `?name` / `$name`. The name run may be empty: a lone `?` is still
    /// a variable token.
    fn variable(&mut self) -> RawTag {
        self.cursor.advance();
        self.cursor.eat_while(is_word_byte);
        RawTag::Variable
    }

    /// `<` begins an IRI unless followed by whitespace, a no-break
    /// space, or `=` — then it is an ordinary operator character
    /// (`<`, `<=`). A `<` at end of line lexes as an IRI.
    fn angle(&mut self) -> RawTag {
        let rest = self.cursor.rest();
        let operator = match rest.get(1) {
            None => false,
            Some(&b) => {
                is_line_space(b) || b == b'=' || (b == 0xC2 && rest.get(2) == Some(&0xA0))
            }
        };
        if operator {
            return self.operator();
        }
        self.cursor.advance();
        loop {
            let b = self.cursor.current();
            if self.cursor.is_eol() || is_line_space(b) || at_nbsp(&self.cursor) {
                break;
            }
            self.cursor.advance();
            if b == b'>' {
                break;
            }
        }
        RawTag::Iri
    }

    /// One chunk of a quoted literal, resuming after the opening
    /// delimiter or at the start of a continuation line.
    ///
    /// A delimiter preceded by an odd number of backslashes is escaped
    /// and does not terminate the literal. The chunk never spans lines;
    /// an unterminated literal consumes to end of line and leaves the
    /// mode unchanged, so the next line continues in literal mode. The
    /// line boundary itself never acts as an escape.
    fn literal(&mut self, delim: u8, mode: &mut LexMode) -> RawTag {
        let chunk = self.cursor.rest();
        let mut from = 0usize;
        while let Some(found) = memchr(delim, &chunk[from..]) {
            let at = from + found;
            let mut backslashes = 0;
            while backslashes < at && chunk[at - 1 - backslashes] == b'\\' {
                backslashes += 1;
            }
            if backslashes % 2 == 0 {
                self.cursor.advance_n(at as u32 + 1);
                *mode = LexMode::Base;
                return RawTag::StringLiteral;
            }
            from = at + 1;
        }
        self.cursor.advance_n(chunk.len() as u32);
        RawTag::StringLiteral
    }

    /// `#` to end of line.
    fn comment(&mut self) -> RawTag {
        let n = self.cursor.rest().len() as u32;
        self.cursor.advance_n(n);
        RawTag::Comment
    }

    /// Maximal run of operator characters.
    fn operator(&mut self) -> RawTag {
        self.cursor.eat_while(is_operator_byte);
        RawTag::Operator
    }

    /// `:name` — local name in the default namespace. The local part
    /// additionally allows `.` and `-`.
    fn local_name(&mut self) -> RawTag {
        self.cursor.advance();
        self.cursor.eat_while(is_local_name_byte);
        RawTag::LocalName
    }

    /// Single punctuation byte.
    fn punct(&mut self, p: Punct) -> RawTag {
        self.cursor.advance();
        RawTag::Punct(p)
    }

    /// Bare word run, or `prefix:name` when a colon immediately
    /// follows. The leading character may be anything (including a
    /// non-ASCII character that matched no other rule); the run after
    /// it is ASCII word characters only.
    fn word(&mut self) -> RawTag {
        self.cursor.bump_char();
        self.cursor.eat_while(is_word_byte);
        if self.cursor.current() == b':' {
            self.cursor.advance();
            self.cursor.eat_while(is_name_suffix_byte);
            return RawTag::PrefixedName;
        }
        RawTag::Word
    }

    /// Run of whitespace, including UTF-8 no-break spaces.
    fn whitespace(&mut self) -> RawTag {
        eat_space(&mut self.cursor);
        RawTag::Whitespace
    }
}

/// Width of the leading whitespace of `line`, in bytes.
///
/// This is the value the driving layer records as the line's
/// indentation when tokenization reaches a new line.
pub fn leading_whitespace(line: &str) -> u32 {
    let mut cursor = Cursor::new(line, 0);
    eat_space(&mut cursor);
    cursor.pos()
}

fn eat_space(cursor: &mut Cursor<'_>) {
    loop {
        if is_line_space(cursor.current()) {
            cursor.advance();
        } else if at_nbsp(cursor) {
            cursor.advance_n(2);
        } else {
            break;
        }
    }
}

fn is_line_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

/// No-break space (U+00A0), the one non-ASCII character the original
/// SPARQL grammar treats as spacing.
fn at_nbsp(cursor: &Cursor<'_>) -> bool {
    cursor.current() == 0xC2 && cursor.peek() == 0xA0
}

fn at_space(cursor: &Cursor<'_>) -> bool {
    is_line_space(cursor.current()) || at_nbsp(cursor)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_operator_byte(b: u8) -> bool {
    matches!(b, b'*' | b'+' | b'-' | b'<' | b'>' | b'=' | b'&' | b'|')
}

fn is_local_name_byte(b: u8) -> bool {
    is_word_byte(b) || b == b'.' || b == b'-'
}

fn is_name_suffix_byte(b: u8) -> bool {
    is_word_byte(b) || b == b'-'
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Helper: scan a whole line from `Base` mode, returning tags with
    /// their lexemes. Asserts the spans tile the line exactly.
    fn scan_line(line: &str) -> Vec<(RawTag, &str)> {
        let mut mode = LexMode::Base;
        scan_line_in(line, &mut mode)
    }

    /// Helper: scan a whole line in the given carried mode.
    fn scan_line_in<'a>(line: &'a str, mode: &mut LexMode) -> Vec<(RawTag, &'a str)> {
        let mut out = Vec::new();
        let mut at = 0u32;
        while (at as usize) < line.len() {
            let tok = Scanner::new(line, at).scan(mode);
            assert!(tok.len >= 1, "scanner must always advance");
            let end = at + tok.len;
            out.push((tok.tag, &line[at as usize..end as usize]));
            at = end;
        }
        at = 0;
        for (_, text) in &out {
            at += text.len() as u32;
        }
        assert_eq!(at as usize, line.len(), "spans must tile the line");
        out
    }

    fn tags(line: &str) -> Vec<RawTag> {
        scan_line(line).into_iter().map(|(t, _)| t).collect()
    }

    // === Variables ===

    #[test]
    fn question_and_dollar_variables() {
        assert_eq!(
            scan_line("?x $y"),
            vec![
                (RawTag::Variable, "?x"),
                (RawTag::Whitespace, " "),
                (RawTag::Variable, "$y"),
            ]
        );
    }

    #[test]
    fn lone_sigil_is_a_variable_with_empty_name() {
        assert_eq!(scan_line("?"), vec![(RawTag::Variable, "?")]);
        assert_eq!(scan_line("$"), vec![(RawTag::Variable, "$")]);
    }

    #[test]
    fn variable_name_stops_at_non_word() {
        assert_eq!(
            scan_line("?abc_1."),
            vec![
                (RawTag::Variable, "?abc_1"),
                (RawTag::Punct(Punct::Dot), "."),
            ]
        );
    }

    // === IRIs and angle operators ===

    #[test]
    fn iri_consumes_through_closing_angle() {
        assert_eq!(
            scan_line("<http://example.org/a> ?x"),
            vec![
                (RawTag::Iri, "<http://example.org/a>"),
                (RawTag::Whitespace, " "),
                (RawTag::Variable, "?x"),
            ]
        );
    }

    #[test]
    fn unterminated_iri_runs_to_end_of_line() {
        assert_eq!(scan_line("<http://ex"), vec![(RawTag::Iri, "<http://ex")]);
    }

    #[test]
    fn iri_stops_at_whitespace_without_consuming_it() {
        assert_eq!(
            scan_line("<http://ex x"),
            vec![
                (RawTag::Iri, "<http://ex"),
                (RawTag::Whitespace, " "),
                (RawTag::Word, "x"),
            ]
        );
    }

    #[test]
    fn lone_angle_at_end_of_line_is_an_iri() {
        assert_eq!(scan_line("<"), vec![(RawTag::Iri, "<")]);
    }

    #[test]
    fn angle_before_space_or_equals_is_an_operator() {
        assert_eq!(
            scan_line("< 2"),
            vec![
                (RawTag::Operator, "<"),
                (RawTag::Whitespace, " "),
                (RawTag::Word, "2"),
            ]
        );
        assert_eq!(tags("<="), vec![RawTag::Operator]);
    }

    #[test]
    fn angle_before_nbsp_is_an_operator() {
        assert_eq!(tags("<\u{a0}x"), vec![RawTag::Operator, RawTag::Whitespace, RawTag::Word]);
    }

    // === Quoted literals ===

    #[test]
    fn simple_double_quoted_literal() {
        let mut mode = LexMode::Base;
        assert_eq!(
            scan_line_in("\"abc\" ?x", &mut mode),
            vec![
                (RawTag::StringLiteral, "\"abc\""),
                (RawTag::Whitespace, " "),
                (RawTag::Variable, "?x"),
            ]
        );
        assert_eq!(mode, LexMode::Base);
    }

    #[test]
    fn escaped_quote_does_not_terminate() {
        // One token spanning the whole literal, both quotes included.
        assert_eq!(
            scan_line("\"abc\\\"def\""),
            vec![(RawTag::StringLiteral, "\"abc\\\"def\"")]
        );
    }

    #[test]
    fn double_backslash_is_not_an_escape() {
        assert_eq!(
            scan_line(r#""a\\" x"#),
            vec![
                (RawTag::StringLiteral, r#""a\\""#),
                (RawTag::Whitespace, " "),
                (RawTag::Word, "x"),
            ]
        );
    }

    #[test]
    fn single_quoted_literal_ignores_double_quotes() {
        assert_eq!(
            scan_line("'a\"b'"),
            vec![(RawTag::StringLiteral, "'a\"b'")]
        );
    }

    #[test]
    fn unterminated_literal_stays_in_literal_mode() {
        let mut mode = LexMode::Base;
        assert_eq!(
            scan_line_in("\"abc", &mut mode),
            vec![(RawTag::StringLiteral, "\"abc")]
        );
        assert_eq!(mode, LexMode::Literal(b'"'));

        // The next line continues the literal through the closing quote.
        assert_eq!(
            scan_line_in("def\" ?x", &mut mode),
            vec![
                (RawTag::StringLiteral, "def\""),
                (RawTag::Whitespace, " "),
                (RawTag::Variable, "?x"),
            ]
        );
        assert_eq!(mode, LexMode::Base);
    }

    #[test]
    fn continuation_line_leading_whitespace_is_not_part_of_the_literal() {
        let mut mode = LexMode::Literal(b'"');
        assert_eq!(
            scan_line_in("  tail\"", &mut mode),
            vec![
                (RawTag::Whitespace, "  "),
                (RawTag::StringLiteral, "tail\""),
            ]
        );
        assert_eq!(mode, LexMode::Base);
    }

    #[test]
    fn trailing_backslash_does_not_escape_the_line_boundary() {
        let mut mode = LexMode::Base;
        scan_line_in("\"abc\\", &mut mode);
        assert_eq!(mode, LexMode::Literal(b'"'));
        // The continuation line closes immediately: the backslash on the
        // previous line does not escape the quote.
        assert_eq!(scan_line_in("\"", &mut mode), vec![(RawTag::StringLiteral, "\"")]);
        assert_eq!(mode, LexMode::Base);
    }

    // === Comments ===

    #[test]
    fn hash_comment_runs_to_end_of_line() {
        assert_eq!(
            scan_line("?x # trailing { \" junk"),
            vec![
                (RawTag::Variable, "?x"),
                (RawTag::Whitespace, " "),
                (RawTag::Comment, "# trailing { \" junk"),
            ]
        );
    }

    // === Punctuation and operators ===

    #[test]
    fn all_nine_punctuation_characters() {
        assert_eq!(
            tags("{}()[],.;"),
            vec![
                RawTag::Punct(Punct::LBrace),
                RawTag::Punct(Punct::RBrace),
                RawTag::Punct(Punct::LParen),
                RawTag::Punct(Punct::RParen),
                RawTag::Punct(Punct::LBracket),
                RawTag::Punct(Punct::RBracket),
                RawTag::Punct(Punct::Comma),
                RawTag::Punct(Punct::Dot),
                RawTag::Punct(Punct::Semicolon),
            ]
        );
    }

    #[test]
    fn operator_run_is_maximal() {
        assert_eq!(scan_line("a && b")[2], (RawTag::Operator, "&&"));
        assert_eq!(scan_line(">=*"), vec![(RawTag::Operator, ">=*")]);
    }

    // === Names ===

    #[test]
    fn default_namespace_local_name() {
        assert_eq!(
            scan_line(":foo.bar-baz"),
            vec![(RawTag::LocalName, ":foo.bar-baz")]
        );
    }

    #[test]
    fn prefixed_name() {
        assert_eq!(scan_line("foaf:name"), vec![(RawTag::PrefixedName, "foaf:name")]);
    }

    #[test]
    fn prefixed_name_local_part_excludes_dot() {
        // `.` continues a `:local` name but not a `prefix:local` name.
        assert_eq!(
            scan_line("foaf:name.x"),
            vec![
                (RawTag::PrefixedName, "foaf:name"),
                (RawTag::Punct(Punct::Dot), "."),
                (RawTag::Word, "x"),
            ]
        );
    }

    // === Words and fallback ===

    #[test]
    fn bare_words_and_numbers_scan_as_words() {
        assert_eq!(
            scan_line("SELECT 42"),
            vec![
                (RawTag::Word, "SELECT"),
                (RawTag::Whitespace, " "),
                (RawTag::Word, "42"),
            ]
        );
    }

    #[test]
    fn unmatched_character_is_consumed_as_a_word() {
        assert_eq!(scan_line("^"), vec![(RawTag::Word, "^")]);
        assert_eq!(scan_line("é"), vec![(RawTag::Word, "é")]);
    }

    #[test]
    fn nbsp_scans_as_whitespace() {
        assert_eq!(
            scan_line("\u{a0}x"),
            vec![(RawTag::Whitespace, "\u{a0}"), (RawTag::Word, "x")]
        );
    }

    // === Leading whitespace ===

    #[test]
    fn leading_whitespace_width() {
        assert_eq!(leading_whitespace(""), 0);
        assert_eq!(leading_whitespace("  ?x"), 2);
        assert_eq!(leading_whitespace("\t?x"), 1);
        assert_eq!(leading_whitespace("   "), 3);
    }

    // === Properties ===

    proptest! {
        /// Concatenating the consumed spans reproduces the line exactly,
        /// and every scan call advances, regardless of the carried mode.
        #[test]
        fn spans_tile_any_line(line in "[^\n]{0,160}", literal in proptest::bool::ANY) {
            let mut mode = if literal { LexMode::Literal(b'"') } else { LexMode::Base };
            let mut at = 0u32;
            while (at as usize) < line.len() {
                let tok = Scanner::new(&line, at).scan(&mut mode);
                prop_assert!(tok.len >= 1);
                at += tok.len;
            }
            prop_assert_eq!(at as usize, line.len());
        }
    }
}

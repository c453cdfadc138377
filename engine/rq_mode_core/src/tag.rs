//! Raw lexical tags produced by the scanner.
//!
//! Tags are deliberately raw: a [`RawTag::Word`] is just a bare word
//! run — whether it is a keyword, a bare operator word, or a plain
//! identifier is decided by the cooking layer in `rq_mode`, which owns
//! the keyword tables. Grouping punctuation carries its [`Punct`]
//! identity in the tag so the context-stack layer can react to it
//! without re-reading the source; this replaces the shared
//! "current punctuation" flag of older highlighter designs with an
//! explicit return value.

/// Raw lexical category of one scanned token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawTag {
    /// Run of spaces, tabs, carriage returns, or no-break spaces.
    Whitespace,
    /// `?name` or `$name` — the sigil plus a (possibly empty) word run.
    Variable,
    /// `<...>` IRI reference, including an unterminated `<...` tail.
    Iri,
    /// `:name` — a local name in the default namespace.
    LocalName,
    /// `prefix:name` — a prefixed name.
    PrefixedName,
    /// Any chunk of a quoted literal, including its delimiters. An
    /// unterminated literal yields one chunk per physical line.
    StringLiteral,
    /// `#` comment running to the end of the line.
    Comment,
    /// Maximal run of operator characters (`* + - < > = & |`).
    Operator,
    /// One grouping or statement punctuation character.
    Punct(Punct),
    /// Bare word run; resolved to keyword / bare operator / identifier
    /// by the cooking layer.
    Word,
}

/// The nine grouping and statement punctuation characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Punct {
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
}

impl Punct {
    /// The source byte this punctuation token was scanned from.
    pub fn as_byte(self) -> u8 {
        match self {
            Punct::LBrace => b'{',
            Punct::RBrace => b'}',
            Punct::LParen => b'(',
            Punct::RParen => b')',
            Punct::LBracket => b'[',
            Punct::RBracket => b']',
            Punct::Comma => b',',
            Punct::Dot => b'.',
            Punct::Semicolon => b';',
        }
    }
}

/// One scanned token: a tag plus the number of bytes consumed.
///
/// The scanner never materializes the token text; the caller slices the
/// line with the running offset when it needs the lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    /// Lexical category.
    pub tag: RawTag,
    /// Bytes consumed, always at least 1.
    pub len: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punct_bytes_round_match_source_characters() {
        assert_eq!(Punct::LBrace.as_byte(), b'{');
        assert_eq!(Punct::RBrace.as_byte(), b'}');
        assert_eq!(Punct::LParen.as_byte(), b'(');
        assert_eq!(Punct::RParen.as_byte(), b')');
        assert_eq!(Punct::LBracket.as_byte(), b'[');
        assert_eq!(Punct::RBracket.as_byte(), b']');
        assert_eq!(Punct::Comma.as_byte(), b',');
        assert_eq!(Punct::Dot.as_byte(), b'.');
        assert_eq!(Punct::Semicolon.as_byte(), b';');
    }

    #[test]
    fn raw_token_is_small() {
        // Tag + length should stay register-sized.
        assert!(std::mem::size_of::<RawToken>() <= 8);
    }
}

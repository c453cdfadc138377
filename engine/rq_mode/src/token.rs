//! Public token classes and their display styles.

/// Semantic category assigned to a classified span.
///
/// Punctuation and operator runs carry no class (`None` in a
/// [`Span`]): they render in the default style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenClass {
    /// `?name` / `$name` sigil variables.
    Variable,
    /// IRIs, local names, and prefixed names.
    Atom,
    /// Quoted literals (any chunk of one, for multi-line literals).
    String,
    /// `#` comments.
    Comment,
    /// Query keywords (`SELECT`, `WHERE`, ...), case-insensitive.
    Keyword,
    /// Any other word: a plain identifier or an unclassified character.
    Identifier,
}

impl TokenClass {
    /// Display style name for this class, for rendering layers keyed by
    /// CodeMirror-style class names.
    pub fn style(self) -> &'static str {
        match self {
            TokenClass::Variable => "variable-2",
            TokenClass::Atom => "atom",
            TokenClass::String => "string",
            TokenClass::Comment => "comment",
            TokenClass::Keyword => "keyword",
            TokenClass::Identifier => "variable",
        }
    }

    /// Content tokens open and align implicit pattern regions;
    /// keywords, comments, punctuation, and operators do not.
    pub fn is_content(self) -> bool {
        matches!(
            self,
            TokenClass::Variable | TokenClass::Atom | TokenClass::String | TokenClass::Identifier
        )
    }
}

/// One classified span of a line: `start..end` byte range plus class.
///
/// Spans produced for a line tile it exactly — whitespace runs appear
/// as class-less spans — so concatenating the sliced text of all spans
/// reproduces the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Display class, or `None` for whitespace, punctuation, operator
    /// runs, and bare operator words.
    pub class: Option<TokenClass>,
    /// Byte offset of the first byte of the span.
    pub start: u32,
    /// Byte offset one past the last byte of the span.
    pub end: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_names_match_the_fixed_mapping_table() {
        assert_eq!(TokenClass::Variable.style(), "variable-2");
        assert_eq!(TokenClass::Atom.style(), "atom");
        assert_eq!(TokenClass::String.style(), "string");
        assert_eq!(TokenClass::Comment.style(), "comment");
        assert_eq!(TokenClass::Keyword.style(), "keyword");
        assert_eq!(TokenClass::Identifier.style(), "variable");
    }

    #[test]
    fn keywords_and_comments_are_not_content() {
        assert!(TokenClass::Variable.is_content());
        assert!(TokenClass::Atom.is_content());
        assert!(TokenClass::String.is_content());
        assert!(TokenClass::Identifier.is_content());
        assert!(!TokenClass::Keyword.is_content());
        assert!(!TokenClass::Comment.is_content());
    }
}

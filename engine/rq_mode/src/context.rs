//! Nesting contexts tracked for indentation.
//!
//! Every `(`, `[`, or `{` opens a context; a bare content token inside
//! a `]`/`}` context opens an implicit *pattern* context (a
//! bracket-less triple/pattern region). The stack of live contexts is
//! owned by [`ModeState`](crate::ModeState); this module defines the
//! frames themselves.

use rq_mode_core::Punct;

/// What terminates a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextKind {
    /// Opened by `(`, closed by `)`.
    Paren,
    /// Opened by `[`, closed by `]`.
    Bracket,
    /// Opened by `{`, closed by `}`.
    Brace,
    /// Implicit pattern region; closed by any bracket closer or by the
    /// statement terminator `.`.
    Pattern,
}

impl ContextKind {
    /// The punctuation that closes this context, if it is a bracket.
    pub fn closer(self) -> Option<Punct> {
        match self {
            ContextKind::Paren => Some(Punct::RParen),
            ContextKind::Bracket => Some(Punct::RBracket),
            ContextKind::Brace => Some(Punct::RBrace),
            ContextKind::Pattern => None,
        }
    }
}

/// Alignment strategy for continuation lines inside a context.
///
/// Decided at most once: `Undecided` can move to `Aligned` (line up
/// under the recorded column) or `Stepped` (fixed step from the
/// opener's line indentation), and never changes again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Not yet decided.
    Undecided,
    /// Align continuation lines to [`Context::col`].
    Aligned,
    /// Indent continuation lines one unit past [`Context::indent`].
    Stepped,
}

/// One live nesting level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    /// What closes this context.
    pub kind: ContextKind,
    /// Column of the opener, or of the alignment anchor token for
    /// pattern and aligned contexts.
    pub col: u32,
    /// Indentation of the line the context was opened on; the base for
    /// stepped indentation. Restored into the state when the context is
    /// popped.
    pub indent: u32,
    /// Alignment decision.
    pub align: Align,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closers_pair_with_their_openers() {
        assert_eq!(ContextKind::Paren.closer(), Some(Punct::RParen));
        assert_eq!(ContextKind::Bracket.closer(), Some(Punct::RBracket));
        assert_eq!(ContextKind::Brace.closer(), Some(Punct::RBrace));
        assert_eq!(ContextKind::Pattern.closer(), None);
    }
}

//! Per-document carried state.

use rq_mode_core::LexMode;
use tracing::trace;

use crate::context::{Align, Context, ContextKind};

/// The state a host carries for one document, mutated in place by every
/// tokenize call and snapshotted (cloned) at line starts for
/// indentation queries.
///
/// One instance per document; never shared across documents, never
/// mutated concurrently.
#[derive(Clone, Debug, Default)]
pub struct ModeState {
    /// Active sub-lexer; `Literal` persists across lines for
    /// unterminated quoted literals.
    pub(crate) lex: LexMode,
    /// Live nesting contexts, innermost last.
    pub(crate) stack: Vec<Context>,
    /// Indentation of the line currently being tokenized.
    pub(crate) indent: u32,
}

impl ModeState {
    /// Number of live nesting contexts.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The innermost context, if any.
    pub fn top(&self) -> Option<&Context> {
        self.stack.last()
    }

    /// `true` while an unterminated quoted literal is being carried
    /// across line boundaries.
    pub fn in_literal(&self) -> bool {
        matches!(self.lex, LexMode::Literal(_))
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Context> {
        self.stack.last_mut()
    }

    /// Push a context opened at column `col`.
    pub(crate) fn push(&mut self, kind: ContextKind, col: u32) {
        trace!(?kind, col, depth = self.stack.len(), "push context");
        self.stack.push(Context {
            kind,
            col,
            indent: self.indent,
            align: Align::Undecided,
        });
    }

    /// Pop the innermost context, restoring the indentation that was
    /// current when it was opened.
    pub(crate) fn pop(&mut self) {
        if let Some(ctx) = self.stack.pop() {
            self.indent = ctx.indent;
            trace!(kind = ?ctx.kind, restored = ctx.indent, "pop context");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_restores_indentation_of_the_opening_line() {
        let mut state = ModeState::default();
        state.indent = 4;
        state.push(ContextKind::Brace, 6);
        state.indent = 8;
        assert_eq!(state.depth(), 1);
        state.pop();
        assert_eq!(state.indent, 4);
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn pop_on_empty_stack_is_a_no_op() {
        let mut state = ModeState::default();
        state.indent = 3;
        state.pop();
        assert_eq!(state.indent, 3);
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn pushed_context_starts_undecided() {
        let mut state = ModeState::default();
        state.push(ContextKind::Paren, 2);
        let top = state.top().copied();
        assert_eq!(
            top,
            Some(Context {
                kind: ContextKind::Paren,
                col: 2,
                indent: 0,
                align: Align::Undecided,
            })
        );
    }
}

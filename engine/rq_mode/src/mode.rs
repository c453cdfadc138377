//! The editor mode: per-token driver and indentation oracle.
//!
//! The driver wraps the raw scanner from `rq_mode_core`, cooks bare
//! words into keywords/identifiers, and runs the context-stack
//! transitions after every token:
//!
//! - an opening bracket pushes a context at its column;
//! - a closing bracket discards any pattern regions, then pops its
//!   matching context (an unmatched closer pops nothing);
//! - `.` ends the innermost pattern region;
//! - a content token inside a `[...]`/`{...}` context opens a pattern
//!   region anchored at the token's column.
//!
//! The indentation oracle is a pure function of a state snapshot taken
//! at the target line's start plus the line's first character; it
//! never mutates the state.

use rq_mode_core::{leading_whitespace, Punct, RawTag, Scanner};

use crate::context::{Align, ContextKind};
use crate::state::ModeState;
use crate::token::{Span, TokenClass};
use crate::words::{self, WordKind};

/// Default indentation step, in columns.
pub const DEFAULT_INDENT_UNIT: u32 = 2;

/// The SPARQL editor mode. Holds the one piece of configuration — the
/// indentation step — and no per-document state.
#[derive(Clone, Copy, Debug)]
pub struct RqMode {
    indent_unit: u32,
}

impl Default for RqMode {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_UNIT)
    }
}

impl RqMode {
    /// Create a mode with the given indentation step.
    pub fn new(indent_unit: u32) -> Self {
        Self { indent_unit }
    }

    /// Fresh state for a new document.
    pub fn start_state(&self) -> ModeState {
        ModeState::default()
    }

    /// Consume one token of `line` starting at byte offset `at`,
    /// updating `state`, and return the classified span.
    ///
    /// # Contract
    ///
    /// `at` must be less than `line.len()`. The first call for a line
    /// must be at offset 0 (start-of-line bookkeeping happens there);
    /// subsequent calls resume at the previous span's `end`.
    pub fn token(&self, line: &str, at: u32, state: &mut ModeState) -> Span {
        if at == 0 {
            // An alignment still undecided when the opener's line ends
            // is decided negatively; the new line's indentation becomes
            // the base for any contexts opened on it.
            if let Some(top) = state.top_mut() {
                if top.align == Align::Undecided {
                    top.align = Align::Stepped;
                }
            }
            state.indent = leading_whitespace(line);
        }

        let raw = Scanner::new(line, at).scan(&mut state.lex);
        let end = at + raw.len;
        if raw.tag == RawTag::Whitespace {
            return Span {
                class: None,
                start: at,
                end,
            };
        }
        let (class, punct) = cook(raw.tag, &line[at as usize..end as usize]);

        // The first non-comment token inside a bracket context fixes
        // that context as aligned; comments never decide alignment.
        if class != Some(TokenClass::Comment) {
            if let Some(top) = state.top_mut() {
                if top.align == Align::Undecided && top.kind != ContextKind::Pattern {
                    top.align = Align::Aligned;
                }
            }
        }

        match punct {
            Some(Punct::LParen) => state.push(ContextKind::Paren, at),
            Some(Punct::LBracket) => state.push(ContextKind::Bracket, at),
            Some(Punct::LBrace) => state.push(ContextKind::Brace, at),
            Some(p @ (Punct::RParen | Punct::RBracket | Punct::RBrace)) => {
                // Pattern regions never match a bracket closer; discard
                // them before checking the real nesting. An unmatched
                // closer leaves the stack untouched.
                while state.top().is_some_and(|c| c.kind == ContextKind::Pattern) {
                    state.pop();
                }
                if state.top().is_some_and(|c| c.kind.closer() == Some(p)) {
                    state.pop();
                }
            }
            Some(Punct::Dot) => {
                // Statement terminator ends the innermost pattern region.
                if state.top().is_some_and(|c| c.kind == ContextKind::Pattern) {
                    state.pop();
                }
            }
            Some(Punct::Comma | Punct::Semicolon) => {}
            None => {
                if class.is_some_and(TokenClass::is_content) {
                    let top_kind = state.top().map(|c| c.kind);
                    if matches!(top_kind, Some(ContextKind::Bracket | ContextKind::Brace)) {
                        state.push(ContextKind::Pattern, at);
                    }
                    // The token that opens a pattern region is also its
                    // first content token: it fixes the alignment
                    // anchor, which never moves afterwards.
                    if let Some(top) = state.top_mut() {
                        if top.kind == ContextKind::Pattern && top.align == Align::Undecided {
                            top.align = Align::Aligned;
                            top.col = at;
                        }
                    }
                }
            }
        }

        Span {
            class,
            start: at,
            end,
        }
    }

    /// Tokenize a whole line, returning spans that tile it exactly
    /// (whitespace included). An empty line yields no spans and leaves
    /// the state untouched.
    pub fn tokenize_line(&self, line: &str, state: &mut ModeState) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut at = 0u32;
        while (at as usize) < line.len() {
            let span = self.token(line, at, state);
            debug_assert!(span.end > at, "token must advance");
            at = span.end;
            spans.push(span);
        }
        spans
    }

    /// Suggested indentation column for a line, given the state
    /// snapshot captured at that line's start and the text of the line
    /// itself (only its first non-whitespace character matters).
    ///
    /// Pure: no side effects, callable at any time.
    pub fn indent(&self, state: &ModeState, text_after: &str) -> u32 {
        let first = text_after.trim_start().bytes().next();

        // A closing bracket aligns with its opener even through
        // pattern regions.
        let mut depth = state.stack.len();
        if matches!(first, Some(b']' | b'}')) {
            while depth > 0 && state.stack[depth - 1].kind == ContextKind::Pattern {
                depth -= 1;
            }
        }
        let Some(ctx) = depth.checked_sub(1).and_then(|i| state.stack.get(i)) else {
            return 0;
        };

        let closing = match (ctx.kind.closer(), first) {
            (Some(c), Some(f)) => c.as_byte() == f,
            _ => false,
        };
        match ctx.kind {
            ContextKind::Pattern => ctx.col,
            _ if ctx.align == Align::Aligned => ctx.col + u32::from(!closing),
            _ => ctx.indent + if closing { 0 } else { self.indent_unit },
        }
    }
}

/// Map a raw tag (plus its lexeme, for word resolution) to the public
/// token class and the punctuation signal.
fn cook(tag: RawTag, text: &str) -> (Option<TokenClass>, Option<Punct>) {
    match tag {
        RawTag::Whitespace | RawTag::Operator => (None, None),
        RawTag::Variable => (Some(TokenClass::Variable), None),
        RawTag::Iri | RawTag::LocalName | RawTag::PrefixedName => (Some(TokenClass::Atom), None),
        RawTag::StringLiteral => (Some(TokenClass::String), None),
        RawTag::Comment => (Some(TokenClass::Comment), None),
        RawTag::Punct(p) => (None, Some(p)),
        RawTag::Word => match words::classify(text) {
            Some(WordKind::Keyword) => (Some(TokenClass::Keyword), None),
            Some(WordKind::BareOperator) => (None, None),
            None => (Some(TokenClass::Identifier), None),
        },
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use crate::context::Context;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn classes(line: &str) -> Vec<Option<TokenClass>> {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line(line, &mut state)
            .into_iter()
            .filter(|s| {
                // Drop pure whitespace spans for readability.
                line[s.start as usize..s.end as usize]
                    .trim_start()
                    .chars()
                    .next()
                    .is_some()
            })
            .map(|s| s.class)
            .collect()
    }

    // === Classification ===

    #[test]
    fn sigil_variables_classify_as_variable() {
        use TokenClass::Variable;
        assert_eq!(classes("?x $x"), vec![Some(Variable), Some(Variable)]);
        // A lone sigil is a variable with an empty identifier.
        assert_eq!(classes("?"), vec![Some(Variable)]);
    }

    #[test]
    fn keywords_classify_case_insensitively() {
        use TokenClass::Keyword;
        assert_eq!(
            classes("SELECT select SeLeCt"),
            vec![Some(Keyword), Some(Keyword), Some(Keyword)]
        );
    }

    #[test]
    fn bare_operator_words_are_unstyled() {
        assert_eq!(classes("a UNION isIRI"), vec![None, None, None]);
    }

    #[test]
    fn names_and_iris_classify_as_atoms() {
        use TokenClass::Atom;
        assert_eq!(
            classes("<http://ex/> foaf:name :local"),
            vec![Some(Atom), Some(Atom), Some(Atom)]
        );
    }

    #[test]
    fn escaped_literal_is_one_string_span() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        let line = "\"abc\\\"def\"";
        let spans = mode.tokenize_line(line, &mut state);
        assert_eq!(
            spans,
            vec![Span {
                class: Some(TokenClass::String),
                start: 0,
                end: line.len() as u32,
            }]
        );
    }

    #[test]
    fn plain_words_classify_as_identifiers() {
        use TokenClass::Identifier;
        assert_eq!(classes("foo 42"), vec![Some(Identifier), Some(Identifier)]);
    }

    #[test]
    fn punctuation_and_operators_are_unstyled() {
        assert_eq!(classes("{ } ="), vec![None, None, None]);
    }

    // === Cross-line literals ===

    #[test]
    fn unterminated_literal_continues_on_the_next_line() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        let spans = mode.tokenize_line("?x \"abc", &mut state);
        assert_eq!(spans.last().unwrap().class, Some(TokenClass::String));

        let spans = mode.tokenize_line("def\" ?y", &mut state);
        assert_eq!(
            spans
                .iter()
                .map(|s| s.class)
                .collect::<Vec<_>>(),
            vec![
                Some(TokenClass::String), // def"
                None,                     // space
                Some(TokenClass::Variable),
            ]
        );
        assert_eq!(spans[0].end, 4);
    }

    // === Context stack ===

    #[test]
    fn brace_pushes_context_at_opener_column_and_content_opens_pattern() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("SELECT * WHERE { ?s ?p ?o", &mut state);
        assert_eq!(state.depth(), 2);
        assert_eq!(
            state.stack[0],
            Context {
                kind: ContextKind::Brace,
                col: 15,
                indent: 0,
                align: Align::Aligned,
            }
        );
        // The pattern is anchored at `?s`, the first content token, and
        // later tokens on the line do not move the anchor.
        assert_eq!(
            state.stack[1],
            Context {
                kind: ContextKind::Pattern,
                col: 17,
                indent: 0,
                align: Align::Aligned,
            }
        );
    }

    #[test]
    fn continuation_line_aligns_under_the_pattern_anchor() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("SELECT * WHERE { ?s ?p ?o", &mut state);
        assert_eq!(mode.indent(&state, "?s2 ?p2 ?o2"), 17);
    }

    #[test]
    fn closing_brace_aligns_with_its_opener_through_patterns() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("SELECT * WHERE { ?s ?p ?o", &mut state);
        mode.tokenize_line("                 ?s2 ?p2 ?o2", &mut state);
        // The pattern context is skipped; the brace context aligned at
        // the column of `{`.
        assert_eq!(mode.indent(&state, "}"), 15);

        mode.tokenize_line("}", &mut state);
        assert_eq!(state.depth(), 0);
        assert_eq!(mode.indent(&state, "?x"), 0);
    }

    #[test]
    fn trailing_opener_steps_the_next_line() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("SELECT * WHERE {", &mut state);
        // Nothing followed `{` on its line: stepped indent from the
        // opener line's indentation.
        assert_eq!(mode.indent(&state, "?s"), 2);

        mode.tokenize_line("  ?s ?p ?o .", &mut state);
        // `.` ended the pattern region; `}` closes back to column 0.
        assert_eq!(mode.indent(&state, "}"), 0);
    }

    #[test]
    fn dot_pops_only_a_pattern_context() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("{ ?s ?p ?o .", &mut state);
        assert_eq!(state.depth(), 1);
        assert_eq!(state.top().map(|c| c.kind), Some(ContextKind::Brace));

        // A `.` with no pattern region open changes nothing.
        mode.tokenize_line(".", &mut state);
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn unmatched_closer_leaves_the_stack_untouched() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line(")", &mut state);
        assert_eq!(state.depth(), 0);
        assert_eq!(mode.indent(&state, "?x"), 0);

        mode.tokenize_line("( ?x", &mut state);
        mode.tokenize_line("]", &mut state);
        // `]` does not match the `(` context.
        assert_eq!(state.top().map(|c| c.kind), Some(ContextKind::Paren));
    }

    #[test]
    fn parens_group_without_opening_a_pattern() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("( ?x", &mut state);
        assert_eq!(state.depth(), 1);
        // Content on the opener's line: the group aligns one past `(`.
        assert_eq!(mode.indent(&state, "?y"), 1);
        assert_eq!(mode.indent(&state, ")"), 0);
    }

    #[test]
    fn bracket_content_opens_a_pattern_region() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("[ foaf:name", &mut state);
        assert_eq!(state.depth(), 2);
        assert_eq!(mode.indent(&state, "foaf:age"), 2);
        assert_eq!(mode.indent(&state, "]"), 0);
    }

    #[test]
    fn comma_and_semicolon_do_not_touch_the_stack() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("{ ?s ?p ?o ; ?p2 ?o2 , ?o3", &mut state);
        assert_eq!(state.depth(), 2);
        assert_eq!(state.top().map(|c| c.kind), Some(ContextKind::Pattern));
    }

    #[test]
    fn comment_does_not_decide_alignment() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("( # opener line ends in a comment", &mut state);
        assert_eq!(state.top().map(|c| c.align), Some(Align::Undecided));
        // Undecided reads as stepped at indent time.
        assert_eq!(mode.indent(&state, "?x"), 2);

        // A non-comment token in the same position decides it.
        let mut state = mode.start_state();
        mode.tokenize_line("( 5", &mut state);
        assert_eq!(state.top().map(|c| c.align), Some(Align::Aligned));
        assert_eq!(mode.indent(&state, "?x"), 1);
    }

    #[test]
    fn indent_unit_is_configurable() {
        let mode = RqMode::new(4);
        let mut state = mode.start_state();
        mode.tokenize_line("{", &mut state);
        assert_eq!(mode.indent(&state, "?s"), 4);
    }

    #[test]
    fn empty_line_emits_no_spans() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        assert_eq!(mode.tokenize_line("", &mut state), vec![]);
    }

    #[test]
    fn nested_groups_restore_outer_indentation() {
        let mode = RqMode::default();
        let mut state = mode.start_state();
        mode.tokenize_line("{", &mut state);
        mode.tokenize_line("  { ?a ?b ?c }", &mut state);
        // Inner brace opened and closed; back to the outer context.
        assert_eq!(state.depth(), 1);
        assert_eq!(mode.indent(&state, "}"), 0);
    }

    // === Properties ===

    proptest! {
        /// Spans tile every line and the driver terminates, for
        /// arbitrary multi-line input carrying state across lines.
        #[test]
        fn spans_tile_arbitrary_documents(lines in proptest::collection::vec("[^\n]{0,80}", 0..8)) {
            let mode = RqMode::default();
            let mut state = mode.start_state();
            for line in &lines {
                let spans = mode.tokenize_line(line, &mut state);
                let mut at = 0u32;
                for span in &spans {
                    prop_assert_eq!(span.start, at);
                    prop_assert!(span.end > span.start);
                    at = span.end;
                }
                prop_assert_eq!(at as usize, line.len());
                // The oracle never panics on any snapshot.
                let _ = mode.indent(&state, line);
            }
        }
    }
}

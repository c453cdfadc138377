//! SPARQL editor mode: a resumable tokenizer with context-stack
//! indentation, for host editing surfaces that re-tokenize one line at
//! a time.
//!
//! The host owns the document and one [`ModeState`] per document. It
//! feeds lines to [`RqMode::token`] (or [`RqMode::tokenize_line`]),
//! carrying the same state object across lines, and asks
//! [`RqMode::indent`] for the suggested column of a line using the
//! state snapshot captured at that line's start.
//!
//! ```
//! use rq_mode::{RqMode, TokenClass};
//!
//! let mode = RqMode::new(2);
//! let mut state = mode.start_state();
//! let spans = mode.tokenize_line("SELECT * WHERE { ?s ?p ?o", &mut state);
//! assert_eq!(spans[0].class, Some(TokenClass::Keyword));
//! // A continuation line aligns under `?s`:
//! assert_eq!(mode.indent(&state, "?s2 ?p2 ?o2"), 17);
//! // And a closing brace aligns with its opener:
//! assert_eq!(mode.indent(&state, "}"), 15);
//! ```
//!
//! Nothing here ever fails: malformed input yields best-effort token
//! classes and best-effort indentation, never an error.

mod context;
mod mode;
mod state;
mod token;
mod words;

pub use context::{Align, Context, ContextKind};
pub use mode::{RqMode, DEFAULT_INDENT_UNIT};
pub use state::ModeState;
pub use token::{Span, TokenClass};

//! Low-level SPARQL tokenizer for editor tooling.
//!
//! This crate is the resumable lexing layer of the `rq_mode` engine: it
//! converts one line of query text at a time into `(tag, length)` pairs,
//! carrying only a small [`LexMode`] across line boundaries (so an
//! unterminated quoted literal keeps lexing as a literal on the next
//! line). It knows nothing about keywords, indentation, or display
//! styles — those live in the `rq_mode` crate.
//!
//! # Permissiveness
//!
//! The scanner never fails. Malformed input (an unterminated literal, a
//! stray byte, a lone `<`) produces a best-effort tag, and every call
//! consumes at least one byte, so a driver looping over a line always
//! terminates. This is a highlighter front end, not a validator.
//!
//! # Positions
//!
//! All positions, lengths, and columns are byte offsets into the line,
//! as `u32`. Multi-byte characters are never split: token boundaries
//! always fall on UTF-8 character boundaries.

mod cursor;
mod scanner;
mod tag;

pub use cursor::Cursor;
pub use scanner::{leading_whitespace, LexMode, Scanner};
pub use tag::{Punct, RawTag, RawToken};

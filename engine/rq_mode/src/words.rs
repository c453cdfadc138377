//! Keyword and bare-operator-word resolution.
//!
//! Two fixed word sets, both matched case-insensitively:
//!
//! 1. **Keywords** — query structure words (`SELECT`, `WHERE`, ...),
//!    highlighted as keywords.
//! 2. **Bare operator words** — built-in test functions plus `UNION`
//!    and the type-assertion `a`, rendered unstyled like punctuation.
//!
//! The lookup is length-bucketed: a word whose length falls outside
//! the 1–11 range (the sets span `a` through `langmatches`) is
//! rejected before any comparison, and case-folding happens into a
//! fixed stack buffer, so resolution never allocates.

/// How a bare word resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WordKind {
    /// Query keyword, highlighted.
    Keyword,
    /// Operator-like word, unstyled.
    BareOperator,
}

/// Longest word in either set (`langmatches`).
const MAX_WORD: usize = 11;

/// Resolve a bare word against both word sets, case-insensitively.
///
/// Returns `None` for plain identifiers.
pub(crate) fn classify(text: &str) -> Option<WordKind> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    // Guard: every keyword and operator word is 1-11 ASCII letters.
    if !(1..=MAX_WORD).contains(&len) || !bytes[0].is_ascii_alphabetic() {
        return None;
    }
    let mut buf = [0u8; MAX_WORD];
    for (dst, b) in buf.iter_mut().zip(bytes) {
        *dst = b.to_ascii_lowercase();
    }
    let word = &buf[..len];

    use WordKind::{BareOperator, Keyword};
    match len {
        1 => match word {
            b"a" => Some(BareOperator),
            _ => None,
        },
        2 => match word {
            b"by" => Some(Keyword),
            _ => None,
        },
        3 => match word {
            b"str" => Some(BareOperator),
            b"ask" | b"asc" => Some(Keyword),
            _ => None,
        },
        4 => match word {
            b"lang" => Some(BareOperator),
            b"base" | b"from" | b"desc" | b"data" => Some(Keyword),
            _ => None,
        },
        5 => match word {
            b"bound" | b"isiri" | b"isuri" | b"union" => Some(BareOperator),
            b"named" | b"where" | b"group" | b"order" | b"limit" | b"graph" => Some(Keyword),
            _ => None,
        },
        6 => match word {
            b"prefix" | b"select" | b"offset" | b"filter" | b"insert" | b"delete" => Some(Keyword),
            _ => None,
        },
        7 => match word {
            b"isblank" => Some(BareOperator),
            b"reduced" => Some(Keyword),
            _ => None,
        },
        8 => match word {
            b"datatype" | b"sameterm" => Some(BareOperator),
            b"distinct" | b"describe" | b"optional" => Some(Keyword),
            _ => None,
        },
        9 => match word {
            b"isliteral" => Some(BareOperator),
            b"construct" => Some(Keyword),
            _ => None,
        },
        11 => match word {
            b"langmatches" => Some(BareOperator),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_matching_is_case_insensitive() {
        assert_eq!(classify("SELECT"), Some(WordKind::Keyword));
        assert_eq!(classify("select"), Some(WordKind::Keyword));
        assert_eq!(classify("SeLeCt"), Some(WordKind::Keyword));
    }

    #[test]
    fn every_keyword_resolves() {
        for kw in [
            "base", "prefix", "select", "distinct", "reduced", "construct", "describe", "ask",
            "from", "named", "where", "group", "order", "limit", "offset", "filter", "optional",
            "graph", "by", "asc", "desc", "insert", "data", "delete",
        ] {
            assert_eq!(classify(kw), Some(WordKind::Keyword), "{kw}");
        }
    }

    #[test]
    fn every_bare_operator_word_resolves() {
        for op in [
            "str", "lang", "langmatches", "datatype", "bound", "sameterm", "isiri", "isuri",
            "isblank", "isliteral", "union", "a",
        ] {
            assert_eq!(classify(op), Some(WordKind::BareOperator), "{op}");
        }
    }

    #[test]
    fn plain_identifiers_do_not_resolve() {
        assert_eq!(classify("foo"), None);
        assert_eq!(classify("selector"), None); // prefix of nothing
        assert_eq!(classify("sel"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("42"), None);
        assert_eq!(classify("_where"), None);
        assert_eq!(classify("wherefore_art_thou"), None);
    }
}

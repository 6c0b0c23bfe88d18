//! Address bar input classification

use serde::{Deserialize, Serialize};

use crate::tables::BLANK_URL;

/// Prefixes that mark input as an already-formed URL.
const SCHEME_PREFIXES: &[&str] = &["https://", "http://", "about:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Empty input or the blank-page marker
    Blank,
    /// Starts with a recognized scheme
    Url,
    /// Looks like a host name; gets `https://` prepended
    BareDomain,
    /// Free text for the search engine
    Query,
}

/// Classify trimmed address-bar input.
///
/// A dot alone is not enough for a domain: anything containing whitespace is
/// a query.
pub fn classify(input: &str) -> InputKind {
    let input = input.trim();

    if input.is_empty() || input.eq_ignore_ascii_case(BLANK_URL) {
        return InputKind::Blank;
    }

    if has_scheme_prefix(input) {
        return InputKind::Url;
    }

    if input.contains('.') && !input.chars().any(char::is_whitespace) {
        return InputKind::BareDomain;
    }

    InputKind::Query
}

fn has_scheme_prefix(input: &str) -> bool {
    SCHEME_PREFIXES.iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

//! Identifier cleanup utilities, applied by callers to ID columns.

use std::fmt;

use crate::error::CoreError;
use crate::model::ArticleId;

/// Strips the hyphenated suffix from a compound article id.
///
/// `"123-456"` → `123`; an already-numeric id passes through unchanged.
/// A string without a leading numeric segment is an error, not a guess.
pub fn scrub_article_id(id: &ArticleId) -> Result<i64, CoreError> {
    match id {
        ArticleId::Numeric(n) => Ok(*n),
        ArticleId::Compound(s) => s
            .split('-')
            .next()
            .and_then(|head| head.parse().ok())
            .ok_or_else(|| CoreError::BadArticleId(s.clone())),
    }
}

/// Article id recovered from a raw URL, or the URL itself when it carries
/// no digits. Callers must handle both variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UrlId {
    Extracted(i64),
    Raw(String),
}

impl fmt::Display for UrlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlId::Extracted(id) => write!(f, "{id}"),
            UrlId::Raw(url) => f.write_str(url),
        }
    }
}

/// Extracts the first run of decimal digits in `url` as an integer.
/// Never fails: a URL without digits (or with a run too long for i64)
/// comes back as [`UrlId::Raw`].
pub fn id_from_url(url: &str) -> UrlId {
    let mut digits = String::new();
    for c in url.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !digits.is_empty() {
            break;
        }
    }
    match digits.parse() {
        Ok(id) => UrlId::Extracted(id),
        Err(_) => UrlId::Raw(url.to_string()),
    }
}

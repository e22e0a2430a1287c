//! Topic name filtering.
use regex::Regex;

use crate::error::{Error, Result};

/// A topic name pattern.
///
/// Matches anywhere in the name unless anchored.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl NamePattern {
    /// Compiles the pattern, failing right away if it is malformed.
    pub fn compile(pattern: &str) -> Result<Self> {
        let compiled = Regex::new(pattern)?;
        Ok(Self {
            source: pattern.to_owned(),
            compiled: Ok(compiled),
        })
    }

    /// Compiles the pattern, but reports a malformed one only once it is matched against.
    pub fn deferred(pattern: &str) -> Self {
        Self {
            source: pattern.to_owned(),
            compiled: Regex::new(pattern),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Checks whether `name` passes `pattern`.
///
/// An absent pattern matches everything.
pub fn matches(pattern: Option<&NamePattern>, name: &str) -> Result<bool> {
    match pattern {
        None => Ok(true),
        Some(pattern) => match &pattern.compiled {
            Ok(regex) => Ok(regex.is_match(name)),
            Err(e) => Err(Error::FilterPattern(e.clone())),
        },
    }
}

/// Result of running [`filter_names`].
#[derive(Debug, Default)]
pub struct FilteredNames {
    /// Names that matched, in input order.
    pub matched: Vec<String>,

    /// One entry per name the predicate failed on.
    pub failures: Vec<Error>,
}

/// Keeps the names matching `pattern`.
///
/// Every name is evaluated, even after the predicate failed. A failing evaluation counts as a
/// non-match.
pub fn filter_names(
    pattern: Option<&NamePattern>,
    names: impl IntoIterator<Item = String>,
) -> FilteredNames {
    let mut filtered = FilteredNames::default();

    for name in names {
        match matches(pattern, &name) {
            Ok(true) => filtered.matched.push(name),
            Ok(false) => {}
            Err(e) => filtered.failures.push(e),
        }
    }

    filtered
}

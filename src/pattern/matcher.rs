use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const MATCH_ANYTHING: &str = "^(?:.*)$";

/// Result of running a [`Matcher`] against one segment.
///
/// `positional[0]` is the whole segment; every capture group follows in
/// order, named or not. Groups that did not participate are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captures {
    pub positional: Vec<Option<String>>,
    pub named: BTreeMap<String, String>,
}

impl Captures {
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    #[inline]
    pub fn at(&self, index: usize) -> Option<&str> {
        self.positional.get(index).and_then(|c| c.as_deref())
    }
}

#[derive(Clone)]
pub struct Matcher {
    pattern: Box<str>,
    regex: Regex,
    case_sensitive: bool,
}

impl Matcher {
    pub(crate) fn new(pattern: &str, regex: Regex, case_sensitive: bool) -> Self {
        Self {
            pattern: pattern.into(),
            regex,
            case_sensitive,
        }
    }

    /// The matcher of the root state: accepts any segment.
    pub fn any() -> Self {
        let regex = Regex::new(MATCH_ANYTHING).expect("match-anything pattern should compile");
        Self::new("", regex, false)
    }

    /// The pattern as it was written.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Stable identifier of the compiled form. Two matchers with the same id
    /// accept exactly the same segments.
    #[inline]
    pub fn id(&self) -> &str {
        self.regex.as_str()
    }

    #[inline]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn is_match(&self, segment: &str) -> bool {
        self.regex.is_match(segment)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(pattern = %self.pattern, segment = %segment))]
    pub fn exec(&self, segment: &str) -> Option<Captures> {
        let caps = self.regex.captures(segment)?;

        let positional = caps
            .iter()
            .map(|m| m.map(|m| m.as_str().to_string()))
            .collect();

        let named = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();

        Some(Captures { positional, named })
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id() && self.case_sensitive == other.case_sensitive
    }
}

impl Eq for Matcher {}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("pattern", &self.pattern)
            .field("source", &self.regex.as_str())
            .field("case_sensitive", &self.case_sensitive)
            .finish()
    }
}

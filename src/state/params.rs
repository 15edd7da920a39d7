use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::pattern::Captures;

/// What a state matched on its last activation.
///
/// Equality covers the positional captures, the named captures and the
/// derived path; nothing else about the match takes part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    captures: Captures,
    path: String,
}

impl Params {
    pub fn new(captures: Captures, path: impl Into<String>) -> Self {
        Self {
            captures,
            path: path.into(),
        }
    }

    pub(crate) fn root() -> Self {
        Self::new(Captures::default(), "/")
    }

    /// Full path from the root down to this state, e.g. `/albums/page1`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Named capture.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures.get(name)
    }

    /// Positional capture; index 0 is the whole segment.
    #[inline]
    pub fn at(&self, index: usize) -> Option<&str> {
        self.captures.at(index)
    }

    #[inline]
    pub fn named(&self) -> &BTreeMap<String, String> {
        &self.captures.named
    }

    #[inline]
    pub fn positional(&self) -> &[Option<String>] {
        &self.captures.positional
    }

    #[inline]
    pub fn captures(&self) -> &Captures {
        &self.captures
    }
}

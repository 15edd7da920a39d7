mod memory;

pub use memory::{DEFAULT_ORIGIN, MemoryHistory};

use std::fmt;

/// The navigation history the router keeps in sync with its active states.
///
/// In a browser this is backed by `history.pushState`/`replaceState` and
/// `location`; [`MemoryHistory`] keeps it in process.
pub trait History: Send + Sync + fmt::Debug {
    /// Current location as path plus query, e.g. `/albums/page1?sort=asc`.
    fn location(&self) -> String;

    /// Scheme, host and port of the document, e.g. `https://example.com`.
    fn origin(&self) -> String;

    /// Adds a new entry after the current one, discarding forward entries.
    fn push_entry(&self, path: &str);

    /// Rewrites the current entry without growing the back stack.
    fn replace_entry(&self, path: &str);
}

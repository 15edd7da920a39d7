use parking_lot::RwLock;

use super::History;

pub const DEFAULT_ORIGIN: &str = "http://localhost";

#[derive(Debug)]
struct Entries {
    stack: Vec<String>,
    cursor: usize,
}

/// An in-process [`History`] with a back/forward cursor.
#[derive(Debug)]
pub struct MemoryHistory {
    origin: String,
    inner: RwLock<Entries>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self::with_origin(DEFAULT_ORIGIN, initial)
    }

    pub fn with_origin(origin: &str, initial: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            inner: RwLock::new(Entries {
                stack: vec![initial.to_string()],
                cursor: 0,
            }),
        }
    }

    /// Moves one entry back. Returns `false` at the start of the stack.
    pub fn back(&self) -> bool {
        let mut guard = self.inner.write();
        if guard.cursor == 0 {
            return false;
        }
        guard.cursor -= 1;
        true
    }

    /// Moves one entry forward. Returns `false` at the end of the stack.
    pub fn forward(&self) -> bool {
        let mut guard = self.inner.write();
        if guard.cursor + 1 >= guard.stack.len() {
            return false;
        }
        guard.cursor += 1;
        true
    }

    pub fn entries(&self) -> Vec<String> {
        self.inner.read().stack.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().stack.is_empty()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        let guard = self.inner.read();
        guard.stack[guard.cursor].clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn push_entry(&self, path: &str) {
        let mut guard = self.inner.write();
        let keep = guard.cursor + 1;
        guard.stack.truncate(keep);
        guard.stack.push(path.to_string());
        guard.cursor = keep;
    }

    fn replace_entry(&self, path: &str) {
        let mut guard = self.inner.write();
        let cursor = guard.cursor;
        guard.stack[cursor] = path.to_string();
    }
}

use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;

use super::{Handler, HandlerResult};
use crate::state::State;

type HandlerList = SmallVec<[Handler; 2]>;

/// Ordered per-event handler lists owned by one state.
#[derive(Debug, Default)]
pub struct Sequencer {
    handlers: RwLock<FastHashMap<Box<str>, HandlerList>>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, event: &str, handler: Handler) {
        let mut guard = self.handlers.write();
        match guard.get_mut(event) {
            Some(list) => list.push(handler),
            None => {
                let mut list = HandlerList::new();
                list.push(handler);
                guard.insert(event.into(), list);
            }
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.handlers.read().get(event).map_or(0, |list| list.len())
    }

    // snapshot so no lock is held while handlers run
    fn snapshot(&self, event: &str) -> HandlerList {
        self.handlers
            .read()
            .get(event)
            .cloned()
            .unwrap_or_default()
    }

    /// Runs every handler registered for `event`, one at a time and in
    /// registration order, with `state` as the receiver. Stops at the first
    /// failure.
    pub async fn emit(&self, state: &State, event: &str) -> HandlerResult {
        let handlers = self.snapshot(event);
        if handlers.is_empty() {
            return Ok(());
        }

        tracing::trace!(event, count = handlers.len(), "emitting");

        for (idx, handler) in handlers.iter().enumerate() {
            if let Err(err) = handler.invoke(state, event).await {
                tracing::debug!(event, index = idx, error = %err, "handler failed");
                return Err(err);
            }
        }

        Ok(())
    }
}

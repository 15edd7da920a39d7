use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::history::History;
use crate::router::RouterOptions;

/// Router-wide collaborators shared by every state of one tree.
#[derive(Debug)]
pub(crate) struct RouterContext {
    pub(crate) history: Arc<dyn History>,
    pub(crate) options: RouterOptions,
    running: AtomicBool,
}

impl RouterContext {
    pub(crate) fn new(history: Arc<dyn History>, options: RouterOptions) -> Self {
        Self {
            history,
            options,
            running: AtomicBool::new(false),
        }
    }

    #[inline]
    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Flips the running flag, returning `false` when it already had `value`.
    #[inline]
    pub(crate) fn set_running(&self, value: bool) -> bool {
        self.running
            .compare_exchange(!value, value, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

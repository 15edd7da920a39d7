use thiserror::Error;

use crate::events::HandlerError;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("'{event}' handler on state '{state}' failed")]
    Handler {
        state: String,
        event: String,
        #[source]
        source: HandlerError,
    },
    #[error("cannot navigate relative to inactive state '{pattern}'")]
    InactiveContext { pattern: String },
    #[error("path '{path}' has {depth} segments, exceeding the limit of {limit}")]
    TooDeep {
        path: String,
        depth: usize,
        limit: usize,
    },
}

impl NavigationError {
    pub(crate) fn handler(state: String, event: &str, source: HandlerError) -> Self {
        Self::Handler {
            state,
            event: event.to_string(),
            source,
        }
    }

    /// The handler failure behind this error, if any.
    pub fn handler_error(&self) -> Option<&HandlerError> {
        match self {
            Self::Handler { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type NavigationResult<T> = Result<T, NavigationError>;

use std::error::Error as StdError;
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{message}")]
    Failed {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
    #[error("handler for '{event}' dropped its completion without signalling")]
    Abandoned { event: String },
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            source: None,
        }
    }

    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Failed {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

pub type HandlerResult = Result<(), HandlerError>;

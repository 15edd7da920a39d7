use crate::events::HandlerError;
use crate::navigation::NavigationError;
use crate::pattern::PatternError;
use crate::router::RouterOptionsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Options(#[from] RouterOptionsError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Handler(#[from] HandlerError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

pub type RouterResult<T> = Result<T, RouterError>;

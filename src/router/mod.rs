mod context;
mod link;
mod options;
mod service;

pub(crate) use context::RouterContext;
pub use link::LinkClick;
pub use options::{DEFAULT_MAX_DEPTH, RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use service::Router;

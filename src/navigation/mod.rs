mod engine;
mod error;

pub use error::{NavigationError, NavigationResult};

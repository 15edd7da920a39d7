mod error;
mod handler;
mod sequencer;

pub use error::{HandlerError, HandlerResult};
pub use handler::{Completion, Handler, HandlerKind};
pub use sequencer::Sequencer;

pub const OPEN: &str = "open";
pub const CLOSE: &str = "close";
pub const BEFORE_CLOSE: &str = "before close";
pub const AT: &str = "at";

mod compile;
mod error;
mod matcher;

pub use compile::{compile, compile_with};
pub use error::{PatternError, PatternResult};
pub use matcher::{Captures, Matcher};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("segment pattern '{pattern}' does not compile (expanded to '{expanded}')")]
    InvalidPattern {
        pattern: String,
        expanded: String,
        #[source]
        source: regex::Error,
    },
}

pub type PatternResult<T> = Result<T, PatternError>;

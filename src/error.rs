use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Candidate scalar is zero or not below the curve order. The partitioner
    /// guarantees in-range candidates, so hitting this means broken range math
    /// and every downstream address would be garbage. Fatal.
    #[error("invalid private scalar: zero or >= curve order")]
    InvalidScalar,

    /// An encoder was handed a hash or point of the wrong size. Programming
    /// error, fatal.
    #[error("encoding invariant violation: {0}")]
    Encoding(&'static str),

    /// Target list could not be read at startup.
    #[error("target source unavailable: {0}")]
    Source(#[source] std::io::Error),

    /// Appending to the match sink failed. The loop halts rather than keep
    /// finding matches it cannot record.
    #[error("match sink write failed: {0}")]
    Sink(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error kinds produced anywhere in the pipeline.

/// Alias used at the CLI boundary, where any error is just reported and the
/// process exits non-zero.
pub type DynErr = Box<dyn std::error::Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("malformed input: {0}")]
    Input(String),

    #[error("codebook overfill: no TBR entry available for dynamic insertion")]
    CodebookOverfill,

    #[error("incomplete coverage: {uncovered} position(s) left unrouted in partition {partition}")]
    IncompleteCoverage { partition: usize, uncovered: usize },

    #[error("model extraction failed: PBO solver found no model within limits")]
    ModelExtraction,

    #[error("validation failed: round-trip mismatch at bit {0}")]
    Validation(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// `CodebookOverfill` is recoverable (the caller skips the insertion and
/// continues); every other kind aborts its partition or the whole program.
impl Error {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::CodebookOverfill)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_overfill_is_recoverable() {
        assert!(Error::CodebookOverfill.is_recoverable());
        assert!(!Error::ModelExtraction.is_recoverable());
        assert!(!Error::Validation(3).is_recoverable());
    }
}

use thiserror::Error;

/// Malformed or contradictory ingest data. Non-retryable without changing
/// the input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("duplicate class id: {0}")]
    DuplicateClassId(String),
}

/// An invariant was violated during decoding. Indicates a bug in the
/// encoder or decoder, not in the input.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("cell ({day}, {period}) for class {class_id} written twice")]
    DoubleWrite {
        class_id: String,
        day: usize,
        period: usize,
    },
    #[error("engine phase called out of order: expected {expected}, was {actual}")]
    PhaseOutOfOrder {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("solver returned a variable assignment referencing unknown index {0}")]
    UnknownIndex(usize),
}

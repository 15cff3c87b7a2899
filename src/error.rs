// ============================================================
// Error Types
// ============================================================
// Every fallible operation in the crate returns ModelError.
// None of these are recoverable inside a forward call: they
// signal that the caller broke the shape or index contract,
// so the call aborts and the error goes straight back to the
// training harness.

use thiserror::Error;

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Two tensors that must agree on a dimension do not
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context:  &'static str,
        expected: String,
        actual:   String,
    },

    /// A token index fell outside [0, vocab_size)
    #[error("Token index {index} out of range for vocabulary of size {vocab_size}")]
    TokenOutOfRange {
        index:      i64,
        vocab_size: usize,
    },

    /// A sentence had no token positions, so softmax has nothing to normalise
    #[error("Sentence {sentence} has length 0; every sentence needs at least one token")]
    EmptySentence { sentence: u8 },

    /// The batch carried no sentence pairs
    #[error("Batch contains no sentence pairs")]
    EmptyBatch,

    /// A hyper-parameter was outside its valid range
    #[error("Invalid config value for {param}: {reason}")]
    InvalidConfig {
        param:  &'static str,
        reason: String,
    },
}

impl ModelError {
    pub(crate) fn shape(
        context:  &'static str,
        expected: impl ToString,
        actual:   impl ToString,
    ) -> Self {
        Self::ShapeMismatch {
            context,
            expected: expected.to_string(),
            actual:   actual.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = ModelError::TokenOutOfRange { index: 12, vocab_size: 10 };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("10"));

        let err = ModelError::shape("pretrained embedding", "[10, 4]", "[10, 3]");
        assert!(err.to_string().contains("pretrained embedding"));
    }
}

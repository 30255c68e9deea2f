//! Error taxonomy for the simulation core.

use thiserror::Error;

/// Errors surfaced at the validation boundaries of the core.
///
/// All computation is pure, so no failure is retried or logged-and-swallowed;
/// every violation is returned to the caller immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Malformed input: wrong sequence length, non-positive capacity,
    /// negative price or demand, SOC outside its range.
    #[error("invalid input: {field} — {message}")]
    InvalidInput {
        /// Name of the offending parameter or field.
        field: String,
        /// Constraint that was violated.
        message: String,
    },

    /// NaN or infinite value caught before it can propagate into the ledger.
    #[error("arithmetic domain error: {field} is not a finite number")]
    ArithmeticDomain {
        /// Name of the offending parameter or field.
        field: String,
    },
}

impl SimError {
    /// Builds an [`SimError::InvalidInput`] for `field`.
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Rejects NaN and infinite values with [`SimError::ArithmeticDomain`].
pub fn ensure_finite(field: &str, value: f32) -> Result<(), SimError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::ArithmeticDomain {
            field: field.to_string(),
        })
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    /// A loan field is outside the range the calculator accepts.
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    /// The schedule would run past the representable calendar.
    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let e = MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least one year".into(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid input: term_years — Term must be at least one year"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: MortgageError = bad.into();
        assert!(matches!(e, MortgageError::SerializationError(_)));
    }
}

use crate::validation::FieldErrors;
use thiserror::Error;

pub type RecordResult<T> = Result<T, RecordError>;

#[derive(Debug, Error)]
pub enum RecordError {
    /// The form did not pass the entity's rules; nothing was written
    #[error("invalid {entity}: {}", summarize(.errors))]
    Validation {
        entity: &'static str,
        errors: FieldErrors,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid {entity} id: {value:?}")]
    InvalidId { entity: &'static str, value: String },

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl RecordError {
    /// Field errors when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            RecordError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

use thiserror::Error;

/// A single failed recipe-form field, reported inline next to its input.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error type for `mm:ss` duration parsing.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
pub enum DurationError {
    #[error("invalid duration '{input}': expected mm:ss with seconds 0-59")]
    InvalidFormat { input: String },
}

/// Error type for the numeric text-field gate (grounds, water).
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
pub enum EntryError {
    #[error("not a number: '{input}'")]
    NotNumeric { input: String },

    #[error("negative values are not allowed")]
    Negative,
}

/// Error type for brew-session commands.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
pub enum SessionError {
    #[error("the timer cannot be edited while brewing")]
    EditLocked,

    #[error("invalid duration '{input}': expected mm:ss or total seconds")]
    InvalidDuration { input: String },
}

/// Error type for recipe store mutations.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
pub enum StoreError {
    #[error("recipe validation failed")]
    Validation { errors: Vec<FieldError> },

    #[error("the last remaining recipe cannot be deleted")]
    LastRecipe,

    #[error("no recipe with id '{id}'")]
    NotFound { id: String },
}

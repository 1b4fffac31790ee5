use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("client file not found: {0}")]
    NotFound(String),

    #[error("malformed client file '{file}': {reason}")]
    Malformed { file: String, reason: String },

    #[error("invalid client file name '{0}': must be a plain file name inside the clients directory")]
    InvalidFileName(String),

    #[error("client file already exists: {0}")]
    ClientExists(String),

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("report template not found: {0}")]
    TemplateNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl IntakeError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        IntakeError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

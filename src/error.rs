use thiserror::Error;

#[derive(Error, Debug)]
pub enum NlpError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Label already registered: {0}")]
    DuplicateLabel(String),

    #[error("No documents registered")]
    EmptyRegistry,

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Parser failed on {path}: {message}")]
    Parser { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, NlpError>;

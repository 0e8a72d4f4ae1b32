use thiserror::Error;

#[derive(Error, Debug)]
pub enum SublistError {
    #[error("HTTP error: {0}")]
    HttpError(reqwest::StatusCode),

    #[error("API error {code}: {message}")]
    ApiError { code: i64, message: String },

    #[error("Unexpected listing content: {0}")]
    UnexpectedContent(String),

    #[error("Response does not contain a raw url")]
    MissingRawUrl,

    #[error("Invalid folder {name:?}: {reason}")]
    InvalidFolder { name: String, reason: &'static str },

    #[error("Lister task panicked: {0}")]
    TaskPanicked(String),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yaml::Error),
}

pub type SublistResult<T> = Result<T, SublistError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("feed file not found: {0}")]
    FeedNotFound(String),

    #[error("invalid commit data in {repo}: {reason}")]
    Data { repo: String, reason: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PulseError {
    pub fn data(repo: &str, reason: impl Into<String>) -> Self {
        PulseError::Data {
            repo: repo.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PulseError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WlError {
    #[error("invalid white-label config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("invalid url checker config: {}", .0.join("; "))]
    InvalidUrlConfig(Vec<String>),

    #[error("no 'com' package root in path: {0}")]
    PackageRootNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl WlError {
    /// Individual violation messages for the two validation variants.
    pub fn violations(&self) -> &[String] {
        match self {
            WlError::InvalidConfig(v) | WlError::InvalidUrlConfig(v) => v,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, WlError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the simulation core
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("presentation surface error: {0}")]
    Surface(String),
}

impl Error {
    pub fn surface(message: impl Into<String>) -> Self {
        Self::Surface(message.into())
    }
}

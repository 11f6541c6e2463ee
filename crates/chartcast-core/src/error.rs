use thiserror::Error;

/// Errors shared across chartcast crates.
#[derive(Debug, Error)]
pub enum ChartcastError {
    #[error("config error: {0}")]
    Config(String),
}

impl ChartcastError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            ChartcastError::Config(_) => "CONFIG",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartcastError>;

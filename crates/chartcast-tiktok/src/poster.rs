use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chartcast_core::PrivacyLevel;

/// Outcome of one outbound post attempt, as reported to the webhook caller.
///
/// Serializes as `{"skipped":true,"reason":…}` or
/// `{"skipped":false,"mock":…,"privacy_level":…}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResult {
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_level: Option<PrivacyLevel>,
}

impl PostResult {
    /// No post was attempted.
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            skipped: true,
            reason: Some(reason.into()),
            mock: None,
            privacy_level: None,
        }
    }

    /// A post was performed (or simulated, when `mock` is true).
    pub fn posted(mock: bool, privacy_level: PrivacyLevel) -> Self {
        Self {
            skipped: false,
            reason: None,
            mock: Some(mock),
            privacy_level: Some(privacy_level),
        }
    }
}

/// Interface for the outbound poster.
///
/// Implementations perform at most one outbound call per invocation and
/// surface failures as errors, never panics. The gateway holds posters
/// through this trait so tests can substitute doubles.
#[async_trait]
pub trait Poster: Send + Sync {
    async fn post(&self, caption: &str) -> Result<PostResult, TikTokError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TikTokError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TikTok API error ({status}): {message}")]
    Api { status: u16, message: String },
}

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use chartcast_core::config::TikTokConfig;

use crate::poster::{PostResult, Poster, TikTokError};

/// Client for the TikTok content-post API.
///
/// Posture is decided entirely by [`TikTokConfig`]: without an access token
/// every post is skipped; with a token and `mock = true` (the default) the
/// post is logged and simulated; with `mock = false` one real API call is
/// made, bounded by the configured timeout.
pub struct TikTokClient {
    http: reqwest::Client,
    config: TikTokConfig,
}

impl TikTokClient {
    pub fn new(config: TikTokConfig) -> Result<Self, TikTokError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl Poster for TikTokClient {
    async fn post(&self, caption: &str) -> Result<PostResult, TikTokError> {
        let Some(token) = self.config.access_token.as_deref() else {
            debug!("no access token configured, skipping post");
            return Ok(PostResult::skipped("no access token"));
        };

        if self.config.mock {
            info!(
                privacy_level = %self.config.privacy_level,
                caption = %caption,
                "mock post (no network call)"
            );
            return Ok(PostResult::posted(true, self.config.privacy_level));
        }

        let url = format!("{}/v2/post/publish/content/init/", self.config.base_url);
        let body = serde_json::json!({
            "post_info": {
                "title": caption,
                "privacy_level": self.config.privacy_level,
            }
        });

        debug!(url = %url, "sending TikTok post");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, "TikTok API error");
            return Err(TikTokError::Api {
                status,
                message: text,
            });
        }

        info!(privacy_level = %self.config.privacy_level, "caption posted");
        Ok(PostResult::posted(false, self.config.privacy_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartcast_core::PrivacyLevel;

    #[tokio::test]
    async fn no_token_skips_without_calling_out() {
        let client = TikTokClient::new(TikTokConfig::default()).unwrap();
        let result = client.post("a caption").await.unwrap();
        assert_eq!(result, PostResult::skipped("no access token"));
    }

    #[tokio::test]
    async fn token_with_mock_simulates_post() {
        let config = TikTokConfig {
            access_token: Some("tok-123".into()),
            ..TikTokConfig::default()
        };
        let client = TikTokClient::new(config).unwrap();
        let result = client.post("a caption").await.unwrap();
        assert_eq!(result, PostResult::posted(true, PrivacyLevel::SelfOnly));
    }

    #[tokio::test]
    async fn privacy_level_carries_through() {
        let config = TikTokConfig {
            access_token: Some("tok-123".into()),
            privacy_level: PrivacyLevel::PublicToEveryone,
            ..TikTokConfig::default()
        };
        let client = TikTokClient::new(config).unwrap();
        let result = client.post("a caption").await.unwrap();
        assert_eq!(
            result.privacy_level,
            Some(PrivacyLevel::PublicToEveryone)
        );
        assert!(!result.skipped);
    }
}

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;

// Gateway defaults
pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_POST_TIMEOUT_SECS: u64 = 10; // outbound TikTok call ceiling
pub const RECENT_EVENTS_CAP: usize = 50; // per-process debug buffer size

/// Top-level config (chartcast.toml + CHARTCAST_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChartcastConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub caption: CaptionConfig,
    #[serde(default)]
    pub recorder: RecorderConfig,
    #[serde(default)]
    pub tiktok: TikTokConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Shared secret required as `?secret=` on POST /webhook.
    /// When unset the endpoint is open; startup logs a warning.
    pub secret: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            secret: None,
        }
    }
}

/// Caption rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CaptionConfig {
    /// Variant used when the payload carries no recognized `alert_kind` tag.
    #[serde(default)]
    pub default_variant: CaptionVariant,
}

/// The two known payload-to-caption template mappings.
///
/// `Limit` renders low/high limit bullets and keeps missing fields visible
/// as `n/a`; `Liquidity` renders buy/sell liquidity bullets and drops the
/// line when the field is missing. Both policies are deliberate upstream
/// behavior and are not unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionVariant {
    #[default]
    Limit,
    Liquidity,
}

impl CaptionVariant {
    /// Parse a payload `alert_kind` tag. Strict lowercase match; anything
    /// else means "not selected" and callers fall back to the default.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "limit" => Some(CaptionVariant::Limit),
            "liquidity" => Some(CaptionVariant::Liquidity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaptionVariant::Limit => "limit",
            CaptionVariant::Liquidity => "liquidity",
        }
    }
}

impl fmt::Display for CaptionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event recorder (debug page) options. Capacity is fixed at
/// [`RECENT_EVENTS_CAP`]; only the toggle is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Outbound TikTok posting options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TikTokConfig {
    /// Bearer token for the content-post API. When unset every post is
    /// skipped with a `no access token` result (safe mode).
    pub access_token: Option<String>,
    /// Visibility of posted content. Defaults to the most restrictive level.
    #[serde(default)]
    pub privacy_level: PrivacyLevel,
    /// When true (the default) a configured token still performs no network
    /// call; the post is logged and reported as `mock`.
    #[serde(default = "bool_true")]
    pub mock: bool,
    #[serde(default = "default_post_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_tiktok_base_url")]
    pub base_url: String,
}

impl Default for TikTokConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            privacy_level: PrivacyLevel::default(),
            mock: true,
            timeout_secs: DEFAULT_POST_TIMEOUT_SECS,
            base_url: default_tiktok_base_url(),
        }
    }
}

/// TikTok post visibility, serialized in the platform's own spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyLevel {
    /// Visible to the posting account only (most restrictive).
    #[default]
    SelfOnly,
    MutualFollowFriends,
    FollowerOfCreator,
    PublicToEveryone,
}

impl PrivacyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::SelfOnly => "SELF_ONLY",
            PrivacyLevel::MutualFollowFriends => "MUTUAL_FOLLOW_FRIENDS",
            PrivacyLevel::FollowerOfCreator => "FOLLOWER_OF_CREATOR",
            PrivacyLevel::PublicToEveryone => "PUBLIC_TO_EVERYONE",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn bool_true() -> bool {
    true
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_post_timeout_secs() -> u64 {
    DEFAULT_POST_TIMEOUT_SECS
}
fn default_tiktok_base_url() -> String {
    "https://open.tiktokapis.com".to_string()
}

impl ChartcastConfig {
    /// Load config from a TOML file with CHARTCAST_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.chartcast/chartcast.toml
    ///
    /// A missing file is not an error; every key has a default. Env keys use
    /// `__` between nesting levels so multi-word keys survive, e.g.
    /// `CHARTCAST_GATEWAY__SECRET`, `CHARTCAST_TIKTOK__ACCESS_TOKEN`,
    /// `CHARTCAST_CAPTION__DEFAULT_VARIANT`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: ChartcastConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CHARTCAST_").split("__"))
            .extract()
            .map_err(|e| crate::error::ChartcastError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.chartcast/chartcast.toml", home)
}

//! Outbound posting to the TikTok content API.
//!
//! Three postures, decided by config: no access token means every post is
//! skipped (safe mode), `mock = true` logs instead of calling out, and
//! `mock = false` performs exactly one real post. No retries in any mode.

pub mod client;
pub mod poster;

pub use client::TikTokClient;
pub use poster::{PostResult, Poster, TikTokError};

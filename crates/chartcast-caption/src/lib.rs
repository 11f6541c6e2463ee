//! Caption rendering for chart alerts.
//!
//! A caption is a deterministic function of (payload, variant, now). The
//! builder is total: malformed fields degrade to fallback text, never to an
//! error.

pub mod builder;
pub mod variant;

pub use builder::build_caption;
pub use variant::{select_variant, FieldSpec, MissingPolicy, VariantSpec};

/// The inbound alert payload: an untyped string-to-value mapping. Arbitrary
/// extra keys are ignored; every recognized field is optional.
pub type InboundPayload = serde_json::Map<String, serde_json::Value>;

//! The closed set of caption variants and their template data.

use chartcast_core::CaptionVariant;

use crate::InboundPayload;

/// How a variant renders a numeric field whose value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Keep the line, render the literal `n/a`.
    RenderNa,
    /// Drop the line entirely.
    OmitLine,
}

/// One bullet line: payload key and rendered label.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
}

/// Template data for one caption variant: its bullet fields in render
/// order, the missing-field policy, and the fixed hashtag line.
#[derive(Debug, Clone, Copy)]
pub struct VariantSpec {
    pub fields: &'static [FieldSpec],
    pub missing: MissingPolicy,
    pub hashtags: &'static str,
}

static LIMIT: VariantSpec = VariantSpec {
    fields: &[
        FieldSpec {
            key: "limit_low",
            label: "Limit Low",
        },
        FieldSpec {
            key: "limit_high_next_open",
            label: "Limit High (Next Open)",
        },
    ],
    missing: MissingPolicy::RenderNa,
    hashtags: "#trading #futures #daytrading #priceaction #fyp",
};

static LIQUIDITY: VariantSpec = VariantSpec {
    fields: &[
        FieldSpec {
            key: "buy_liquidity",
            label: "Buy Liquidity",
        },
        FieldSpec {
            key: "sell_liquidity",
            label: "Sell Liquidity",
        },
    ],
    missing: MissingPolicy::OmitLine,
    hashtags: "#trading #liquidity #orderflow #smartmoney #fyp",
};

impl VariantSpec {
    pub fn of(variant: CaptionVariant) -> &'static VariantSpec {
        match variant {
            CaptionVariant::Limit => &LIMIT,
            CaptionVariant::Liquidity => &LIQUIDITY,
        }
    }
}

/// Pick the caption variant for a payload.
///
/// An `alert_kind` key with a recognized tag (`"limit"` / `"liquidity"`)
/// selects explicitly; anything else falls back to the configured default.
pub fn select_variant(payload: &InboundPayload, default: CaptionVariant) -> CaptionVariant {
    payload
        .get("alert_kind")
        .and_then(|v| v.as_str())
        .and_then(CaptionVariant::from_tag)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: serde_json::Value) -> InboundPayload {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn alert_kind_selects_variant() {
        let p = payload(json!({"alert_kind": "liquidity"}));
        assert_eq!(
            select_variant(&p, CaptionVariant::Limit),
            CaptionVariant::Liquidity
        );
    }

    #[test]
    fn unrecognized_or_missing_kind_uses_default() {
        let p = payload(json!({"alert_kind": "momentum"}));
        assert_eq!(
            select_variant(&p, CaptionVariant::Limit),
            CaptionVariant::Limit
        );

        let p = payload(json!({}));
        assert_eq!(
            select_variant(&p, CaptionVariant::Liquidity),
            CaptionVariant::Liquidity
        );

        // non-string tags never select
        let p = payload(json!({"alert_kind": 7}));
        assert_eq!(
            select_variant(&p, CaptionVariant::Limit),
            CaptionVariant::Limit
        );
    }

    #[test]
    fn variant_specs_carry_their_hashtags() {
        assert!(VariantSpec::of(CaptionVariant::Limit)
            .hashtags
            .contains("#priceaction"));
        assert!(VariantSpec::of(CaptionVariant::Liquidity)
            .hashtags
            .contains("#orderflow"));
    }
}

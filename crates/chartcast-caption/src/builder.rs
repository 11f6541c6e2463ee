//! Payload-to-caption rendering.

use chartcast_core::CaptionVariant;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::variant::{MissingPolicy, VariantSpec};
use crate::InboundPayload;

/// Render the caption for a payload.
///
/// Total over arbitrary payloads: every missing or malformed field degrades
/// to fallback text instead of failing. `now` is used only when `bar_time`
/// is absent or not numeric; callers inject it so rendering stays
/// deterministic under test.
///
/// Template, in order: title line (`TYPE: symbol`), one `Label: value` line
/// per variant field (subject to the variant's missing policy), the time
/// line, a blank line, the variant's hashtag line.
pub fn build_caption(
    payload: &InboundPayload,
    variant: CaptionVariant,
    now: DateTime<Utc>,
) -> String {
    let spec = VariantSpec::of(variant);

    let alert_type = payload
        .get("type")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("tiktok_alert")
        .to_uppercase()
        .replace('_', " ");
    let symbol = text_field(payload.get("symbol"), "Unknown symbol");

    let mut lines = Vec::with_capacity(spec.fields.len() + 4);
    lines.push(format!("{alert_type}: {symbol}"));

    for field in spec.fields {
        match render_value(payload.get(field.key)) {
            Some(value) => lines.push(format!("{}: {}", field.label, value)),
            None => match spec.missing {
                MissingPolicy::RenderNa => lines.push(format!("{}: n/a", field.label)),
                MissingPolicy::OmitLine => {}
            },
        }
    }

    lines.push(format!("Time: {}", render_time(payload.get("bar_time"), now)));
    lines.push(String::new());
    lines.push(spec.hashtags.to_string());

    lines.join("\n")
}

/// Display text for a free-text field, or the fallback when the value is
/// absent, `null`, or an empty string. No numeric coercion here; a symbol
/// like `"0050"` keeps its leading zeros.
fn text_field(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        None | Some(Value::Null) | Some(Value::String(_)) => fallback.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Resolve a bullet-field value to display text.
///
/// Absent keys, `null`, and empty strings count as missing (`None`); the
/// caller applies the variant's missing policy. Present values go through
/// numeric coercion first and fall back to raw text when coercion fails.
fn render_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) => Some(render_number(n)),
        Value::String(s) => Some(coerce_numeric_str(s).unwrap_or_else(|| s.clone())),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Canonical text for a JSON number: integers without a decimal part,
/// floats via the shortest round-trip rendering (`4800.0` prints `4800`).
fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(f) = n.as_f64() {
        f.to_string()
    } else {
        n.to_string()
    }
}

/// Numeric coercion for string values: integer first, then finite float.
/// `None` means the string is not a plain number and the raw text passes
/// through. `inf` and `nan` are deliberately not numbers here.
fn coerce_numeric_str(s: &str) -> Option<String> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(i.to_string());
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(u.to_string());
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.to_string())
}

/// The time line value: `bar_time` read as epoch milliseconds when
/// coercible and in range, otherwise the injected `now`. Rendered as a UTC
/// RFC-3339 instant at seconds precision (`2024-11-29T17:45:00Z`).
fn render_time(value: Option<&Value>, now: DateTime<Utc>) -> String {
    let instant = value
        .and_then(coerce_millis)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or(now);
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Epoch-millisecond coercion: integers directly, floats and numeric
/// strings truncated toward zero.
fn coerce_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => s.parse::<i64>().ok().or_else(|| {
            s.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> InboundPayload {
        v.as_object().cloned().unwrap_or_default()
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn title_defaults_when_type_and_symbol_missing() {
        let caption = build_caption(&payload(json!({})), CaptionVariant::Limit, fixed_now());
        assert!(caption.starts_with("TIKTOK ALERT: Unknown symbol\n"));
    }

    #[test]
    fn type_renders_uppercase_with_spaces() {
        let caption = build_caption(
            &payload(json!({"type": "liquidity_sweep", "symbol": "NQZ2024"})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.starts_with("LIQUIDITY SWEEP: NQZ2024\n"));
    }

    #[test]
    fn numeric_strings_render_canonically() {
        assert_eq!(coerce_numeric_str("007").as_deref(), Some("7"));
        assert_eq!(coerce_numeric_str("4800.00").as_deref(), Some("4800"));
        assert_eq!(coerce_numeric_str("4825.25").as_deref(), Some("4825.25"));
        assert_eq!(coerce_numeric_str("-12").as_deref(), Some("-12"));
        assert_eq!(coerce_numeric_str("1e3").as_deref(), Some("1000"));
        assert_eq!(coerce_numeric_str("wide"), None);
        assert_eq!(coerce_numeric_str("inf"), None);
        assert_eq!(coerce_numeric_str("NaN"), None);
    }

    #[test]
    fn non_numeric_raw_values_pass_through() {
        let caption = build_caption(
            &payload(json!({"limit_low": "wide", "limit_high_next_open": true})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.contains("Limit Low: wide\n"));
        assert!(caption.contains("Limit High (Next Open): true\n"));
    }

    #[test]
    fn non_scalar_values_render_compact_json() {
        let caption = build_caption(
            &payload(json!({"limit_low": [1, 2]})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.contains("Limit Low: [1,2]\n"));
    }

    #[test]
    fn limit_variant_keeps_missing_lines_as_na() {
        let caption = build_caption(
            &payload(json!({"limit_high_next_open": 4860.75})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.contains("Limit Low: n/a\n"));
        assert!(caption.contains("Limit High (Next Open): 4860.75\n"));
    }

    #[test]
    fn liquidity_variant_omits_missing_lines() {
        let caption = build_caption(
            &payload(json!({"sell_liquidity": 17250})),
            CaptionVariant::Liquidity,
            fixed_now(),
        );
        assert!(!caption.contains("Buy Liquidity"));
        assert!(caption.contains("Sell Liquidity: 17250\n"));
    }

    #[test]
    fn empty_string_and_null_count_as_missing() {
        let caption = build_caption(
            &payload(json!({"limit_low": "", "limit_high_next_open": null})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.contains("Limit Low: n/a\n"));
        assert!(caption.contains("Limit High (Next Open): n/a\n"));
    }

    #[test]
    fn integer_bar_time_renders_iso8601() {
        let caption = build_caption(
            &payload(json!({"bar_time": 1732902300000i64})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.contains("Time: 2024-11-29T17:45:00Z\n"));
    }

    #[test]
    fn out_of_range_bar_time_falls_back_to_now() {
        let caption = build_caption(
            &payload(json!({"bar_time": 1e300})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.contains("Time: 2023-11-14T22:13:20Z\n"));
    }

    #[test]
    fn symbol_keeps_leading_zeros() {
        let caption = build_caption(
            &payload(json!({"symbol": "0050"})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.starts_with("TIKTOK ALERT: 0050\n"));
    }

    #[test]
    fn numeric_symbol_renders_as_text() {
        let caption = build_caption(
            &payload(json!({"symbol": 6758})),
            CaptionVariant::Limit,
            fixed_now(),
        );
        assert!(caption.starts_with("TIKTOK ALERT: 6758\n"));
    }
}

//! Display Formatting
//!
//! Currency, timestamp and stock-change formatting shared by the table,
//! feed and form renderers, plus the `key: value` attribute parser used by
//! the add-item form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::api::{coerce_string, Attributes};

/// Separator between attribute pairs in the inventory name cell
pub const ATTRIBUTE_SEPARATOR: &str = " • ";

/// Format a decimal amount as US dollars, e.g. `$1,234.50`.
///
/// Rounds half away from zero to cents. Negative amounts render as
/// `-$5.00`; a value that rounds to zero never carries a sign.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u32()
        .unwrap_or(0);
    let whole = group_thousands(whole.to_u128().unwrap_or(0));

    format!("{}${}.{:02}", if negative { "-" } else { "" }, whole, cents)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Parse a server timestamp.
///
/// Accepts RFC 3339 (converted to UTC), naive ISO 8601 date-times as the
/// inventory server writes them, and bare dates (midnight).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Medium date plus short time, e.g. `Oct 15, 2026, 3:04 PM`.
///
/// Unparseable input is returned unchanged.
pub fn format_datetime(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y, %-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// Signed stock change: `+5`, `-3`, `0`
pub fn format_change(change: i64) -> String {
    if change > 0 {
        format!("+{}", change)
    } else {
        change.to_string()
    }
}

/// Parse free-form attribute text into a map.
///
/// Pairs are separated by newlines or commas; each pair splits on its first
/// `:`. Pairs without a colon or with an empty key are skipped. Later keys
/// overwrite earlier values but keep the first position.
pub fn parse_attributes(text: &str) -> Attributes {
    let mut attributes = Attributes::new();

    for pair in text.split(['\n', ',']).map(str::trim).filter(|s| !s.is_empty()) {
        if let Some((key, value)) = pair.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                attributes.insert(key.to_string(), Value::String(value.trim().to_string()));
            }
        }
    }

    attributes
}

/// Render attributes as `key: value • key: value`, in map order
pub fn format_attributes(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(k, v)| format!("{}: {}", k, coerce_string(v.clone())))
        .collect::<Vec<_>>()
        .join(ATTRIBUTE_SEPARATOR)
}

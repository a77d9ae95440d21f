//! Field picking helpers shared by the provider normalizers.
//!
//! Every helper takes a list of JSON pointers in precedence order and returns
//! the first usable value, so each adapter's field table reads as data.

use std::hash::{BuildHasher, Hash, Hasher};

use ahash::RandomState;
use itertools::Itertools;
use serde_json::Value;

use crate::{LocationSuggestion, Provider, UNKNOWN_LOCATION};

pub const DEFAULT_COORDINATE: &str = "0";
pub const DEFAULT_KIND: &str = "unknown";
pub const DEFAULT_IMPORTANCE: f64 = 0.5;

// Fixed so fallback ids survive process restarts.
const FALLBACK_ID_SEEDS: [u64; 4] = [
    0x6765_6f61_6865_6164,
    0x7072_6f76_6964_6572,
    0x706c_6163_655f_6964,
    0x6661_6c6c_6261_636b,
];

/// First non-empty string (or number, rendered as text) among `pointers`.
pub fn first_text(raw: &Value, pointers: &[&str]) -> Option<String> {
    pointers.iter().find_map(|p| match raw.pointer(p)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Non-empty string fields joined with `", "`, `None` when nothing is present.
pub fn compose(raw: &Value, pointers: &[&str]) -> Option<String> {
    let parts = pointers
        .iter()
        .filter_map(|p| raw.pointer(p).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .join(", ");
    (!parts.is_empty()).then_some(parts)
}

/// First numeric-looking coordinate among `pointers`, as text, or `"0"`.
pub fn coordinate(raw: &Value, pointers: &[&str]) -> String {
    pointers
        .iter()
        .find_map(|p| match raw.pointer(p)? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if s.trim().parse::<f64>().is_ok_and(f64::is_finite) => {
                Some(s.trim().to_string())
            }
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_COORDINATE.to_string())
}

/// First positive score among `pointers`, divided by `scale` and clamped into `[0, 1]`.
///
/// Zero and missing scores fall back to [`DEFAULT_IMPORTANCE`].
pub fn importance(raw: &Value, pointers: &[&str], scale: f64) -> f64 {
    pointers
        .iter()
        .find_map(|p| {
            let value = raw.pointer(p)?;
            value
                .as_f64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .filter(|score| score.is_finite() && *score > 0.0)
        .map_or(DEFAULT_IMPORTANCE, |score| (score / scale).clamp(0.0, 1.0))
}

/// Deterministic id for items that carry none: a hash of the serialized item.
pub fn fallback_place_id(provider: Provider, raw: &Value) -> String {
    let mut hasher = RandomState::with_seeds(
        FALLBACK_ID_SEEDS[0],
        FALLBACK_ID_SEEDS[1],
        FALLBACK_ID_SEEDS[2],
        FALLBACK_ID_SEEDS[3],
    )
    .build_hasher();
    provider.as_str().hash(&mut hasher);
    raw.to_string().hash(&mut hasher);
    format!("{provider}-{:016x}", hasher.finish())
}

/// Field precedence table for one provider.
pub struct FieldTable<'a> {
    pub provider: Provider,
    pub place_id: &'a [&'a str],
    pub display_name: &'a [&'a str],
    /// Fields joined into a label when no display field is present
    pub address: &'a [&'a str],
    pub lat: &'a [&'a str],
    pub lon: &'a [&'a str],
    pub kind: &'a [&'a str],
    pub kind_default: &'a str,
    pub importance: &'a [&'a str],
    pub importance_scale: f64,
}

impl FieldTable<'_> {
    pub fn apply(&self, raw: Value) -> LocationSuggestion {
        let place_id = first_text(&raw, self.place_id)
            .unwrap_or_else(|| fallback_place_id(self.provider, &raw));
        let display_name = first_text(&raw, self.display_name)
            .or_else(|| compose(&raw, self.address))
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

        LocationSuggestion {
            place_id,
            display_name,
            lat: coordinate(&raw, self.lat),
            lon: coordinate(&raw, self.lon),
            kind: first_text(&raw, self.kind).unwrap_or_else(|| self.kind_default.to_string()),
            importance: importance(&raw, self.importance, self.importance_scale),
            raw: Some(raw),
        }
    }
}

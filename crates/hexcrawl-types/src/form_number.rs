//! Numeric coercion of raw form-field text.
//!
//! The browser editor converts route coordinates with unary `+` before
//! sending them, so `""` becomes `0`, `"1"` becomes `1`, `"1.5"` stays
//! fractional and anything unparseable becomes `NaN`, which JSON encodes
//! as `null`. [`FormNumber`] reproduces that conversion so the backend
//! sees exactly the same bodies.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON number produced from form text, or `null` when the text was not
/// a finite number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormNumber(Option<serde_json::Number>);

/// Largest magnitude an `f64` can hold while every integer below it is
/// exact (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl FormNumber {
    /// Coerce raw input text the way the editor page does.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::from(0);
        }
        if let Ok(int) = trimmed.parse::<i64>() {
            return Self::from(int);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map_or_else(Self::null, Self::from_float)
    }

    /// The `NaN` case: serialized as JSON `null`.
    pub const fn null() -> Self {
        Self(None)
    }

    /// The coerced value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_ref().and_then(serde_json::Number::as_i64)
    }

    /// Whether the input text failed to coerce.
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Integral floats (`"2.0"`, `"1e3"`) encode as JSON integers, matching
    /// `JSON.stringify`.
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn from_float(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
            return Self::from(value as i64);
        }
        Self(serde_json::Number::from_f64(value))
    }
}

impl From<i64> for FormNumber {
    fn from(value: i64) -> Self {
        Self(Some(serde_json::Number::from(value)))
    }
}

impl From<i32> for FormNumber {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl core::fmt::Display for FormNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.0 {
            Some(number) => write!(f, "{number}"),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for FormNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FormNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<serde_json::Number>::deserialize(deserializer).map(Self)
    }
}

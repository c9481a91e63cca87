//! The external value shapes a binding can read and write.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keyed numeric record such as `{r, g, b}` or `{h, s, v, a}`.
pub type ColorRecord = BTreeMap<String, f64>;

/// A color as the host stores it.
///
/// With the `serde` feature this (de)serializes untagged, so a JSON string,
/// number array or object maps directly onto the matching variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum ColorInput {
    /// Textual encodings: hex and CSS functions.
    Text(String),
    /// Ordered numbers, `[r, g, b]` or `[r, g, b, a]`.
    Sequence(Vec<f64>),
    /// Keyed numbers.
    Record(ColorRecord),
}

impl ColorInput {
    /// Build a keyed record from `(key, value)` pairs.
    pub fn record<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self::Record(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect(),
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[f64]> {
        match self {
            Self::Sequence(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ColorRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<&str> for ColorInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ColorInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<f64>> for ColorInput {
    fn from(values: Vec<f64>) -> Self {
        Self::Sequence(values)
    }
}

impl<const N: usize> From<[f64; N]> for ColorInput {
    fn from(values: [f64; N]) -> Self {
        Self::Sequence(values.to_vec())
    }
}

impl From<ColorRecord> for ColorInput {
    fn from(record: ColorRecord) -> Self {
        Self::Record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(ColorInput::from("#fff").as_text(), Some("#fff"));
        assert_eq!(
            ColorInput::from([1.0, 2.0, 3.0]).as_sequence(),
            Some(&[1.0, 2.0, 3.0][..])
        );

        let record = ColorInput::record([("r", 1.0), ("g", 2.0), ("b", 3.0)]);
        let fields = record.as_record().expect("record input");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("g"), Some(&2.0));
        assert_eq!(record.as_text(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_shapes_map_onto_variants() {
        let text: ColorInput = serde_json::from_str(r##""#2af""##).expect("string");
        assert_eq!(text, ColorInput::from("#2af"));

        let seq: ColorInput = serde_json::from_str("[255, 0, 0, 0.5]").expect("array");
        assert_eq!(seq, ColorInput::from([255.0, 0.0, 0.0, 0.5]));

        let record: ColorInput = serde_json::from_str(r#"{"h": 200, "s": 0.5, "v": 0.5}"#)
            .expect("object");
        assert_eq!(record, ColorInput::record([("h", 200.0), ("s", 0.5), ("v", 0.5)]));

        assert_eq!(
            serde_json::to_string(&ColorInput::from([1.0, 2.0, 3.0])).expect("serialize"),
            "[1.0,2.0,3.0]"
        );
    }
}

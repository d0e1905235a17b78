//! draw.io style declarations.
//!
//! Every cell carries a flat style string such as
//! `rounded=1;whiteSpace=wrap;html=1;fillColor=#dae8fc;ellipse;`. [`Style`]
//! is the parsed form: an insertion-ordered map from key to either a value or
//! a bare flag.
//!
//! Parsing is permissive and never fails. Typed accessors report coercion
//! problems through [`StyleCoercionError`], and the `*_or` variants recover
//! from them with a caller supplied default.
//!
//! ```
//! # use drawdeck_core::style::{Style, StyleValue};
//! let style = Style::parse("a=1;b;c=2");
//! assert_eq!(style.value("a"), Some("1"));
//! assert_eq!(style.get("b"), Some(&StyleValue::Flag));
//! assert_eq!(style.value("c"), Some("2"));
//! assert!(Style::parse("").is_empty());
//! ```

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::color::Color;

/// A single style entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// A bare token without `=`, such as `ellipse` or `html`.
    Flag,
    /// The right hand side of a `key=value` token.
    Value(String),
}

/// A style value that could not be coerced to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("style value `{key}={value}` is not a valid {expected}")]
pub struct StyleCoercionError {
    key: String,
    value: String,
    expected: &'static str,
}

impl StyleCoercionError {
    /// The offending style key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw value that failed to coerce.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Outcome of reading a paint (fill or stroke) attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Attribute absent, `default`, or unparseable.
    Default,
    /// Explicit `none`: nothing is painted.
    None,
    /// A concrete color.
    Color(Color),
}

/// Parsed style declarations, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: IndexMap<String, StyleValue>,
}

impl Style {
    /// Parses a `;`-separated style string.
    ///
    /// Tokens are trimmed and empty tokens skipped. `key=value` splits at the
    /// first `=`; everything else becomes a bare flag. A repeated key keeps its
    /// first position but takes the last value.
    pub fn parse(raw: &str) -> Self {
        let mut entries = IndexMap::new();

        for token in raw.split(';').map(str::trim).filter(|t| !t.is_empty()) {
            match token.split_once('=') {
                Some((key, value)) => {
                    let key = key.trim();
                    if key.is_empty() {
                        continue;
                    }
                    let value = StyleValue::Value(value.trim().to_string());
                    entries.insert(key.to_string(), value);
                }
                None => {
                    entries.insert(token.to_string(), StyleValue::Flag);
                }
            }
        }

        Self { entries }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the style has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the raw entry for `key`.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    /// Returns the value for `key`, or `None` if absent or a bare flag.
    pub fn value(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(StyleValue::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether `key` is present in any form.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `key` is switched on: a bare flag, `1`, or `true`.
    pub fn is_enabled(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(StyleValue::Flag) => true,
            Some(StyleValue::Value(value)) => value == "1" || value.eq_ignore_ascii_case("true"),
            None => false,
        }
    }

    /// All entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Reads `key` as a number.
    ///
    /// # Errors
    ///
    /// Returns [`StyleCoercionError`] if the value is present but not a
    /// finite number.
    pub fn number(&self, key: &str) -> Result<Option<f32>, StyleCoercionError> {
        let Some(raw) = self.value(key) else {
            return Ok(None);
        };

        match raw.parse::<f32>() {
            Ok(number) if number.is_finite() => Ok(Some(number)),
            _ => Err(StyleCoercionError {
                key: key.to_string(),
                value: raw.to_string(),
                expected: "number",
            }),
        }
    }

    /// Reads `key` as a number, falling back to `default` when absent or invalid.
    pub fn number_or(&self, key: &str, default: f32) -> f32 {
        match self.number(key) {
            Ok(number) => number.unwrap_or(default),
            Err(err) => {
                debug!(err:err, default = default; "Falling back to default style value");
                default
            }
        }
    }

    /// Reads a paint attribute such as `fillColor` or `strokeColor`.
    pub fn paint(&self, key: &str) -> Paint {
        let Some(raw) = self.value(key) else {
            return Paint::Default;
        };

        match raw {
            "none" => Paint::None,
            "" | "default" => Paint::Default,
            _ => match Color::new(raw) {
                Ok(color) => Paint::Color(color),
                Err(_) => {
                    let err = StyleCoercionError {
                        key: key.to_string(),
                        value: raw.to_string(),
                        expected: "color",
                    };
                    debug!(err:err; "Falling back to default paint");
                    Paint::Default
                }
            },
        }
    }

    /// Reads a text color attribute such as `fontColor`.
    ///
    /// Unlike [`Style::paint`], `none` and invalid values both mean "no color".
    pub fn color(&self, key: &str) -> Option<Color> {
        match self.paint(key) {
            Paint::Color(color) => Some(color),
            Paint::Default | Paint::None => None,
        }
    }
}

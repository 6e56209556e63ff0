//! Named value transforms
//!
//! Rules reference transforms by a stable string id instead of carrying
//! executable code, so a mapping configuration stays pure data: it can be
//! cloned, exported, and imported without losing behavior.

use crate::Term;
use std::fmt;
use std::str::FromStr;

/// A converted attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Free text
    Text(String),

    /// A finite number
    Number(f64),

    /// An `(x, y, z)` triple of finite numbers
    Vector3([f64; 3]),
}

impl AttributeValue {
    /// Render the value as text
    ///
    /// Numbers use their shortest round-trip form; vectors are joined with
    /// commas so they can be re-parsed by [`parse_vector3`].
    pub fn to_text(&self) -> String {
        match self {
            AttributeValue::Text(text) => text.clone(),
            AttributeValue::Number(n) => n.to_string(),
            AttributeValue::Vector3([x, y, z]) => format!("{},{},{}", x, y, z),
        }
    }

    /// The numeric value, parsing text when needed
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(text) => parse_number(text),
            AttributeValue::Vector3(_) => None,
        }
    }

    /// The position value, parsing comma-separated text when needed
    pub fn as_vector3(&self) -> Option<[f64; 3]> {
        match self {
            AttributeValue::Vector3(v) => Some(*v),
            AttributeValue::Text(text) => parse_vector3(text),
            AttributeValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Why a transform could not convert its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformError {
    /// Transform that failed
    pub transform: String,

    /// Offending input
    pub input: String,

    /// Description of the failure
    pub reason: String,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform '{}' failed on {:?}: {}",
            self.transform, self.input, self.reason
        )
    }
}

impl std::error::Error for TransformError {}

/// A named, data-only value conversion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Transform {
    /// Lexical form as text
    #[default]
    Identity,

    /// Whitespace-trimmed text
    Trim,

    /// Lowercased text
    Lowercase,

    /// The part of an IRI after its last `#` or `/`
    LocalName,

    /// Text with a required leading prefix removed
    StripPrefix(String),

    /// A finite number
    Number,

    /// Three finite numbers separated by commas and/or whitespace
    Vector3,

    /// `#RRGGBB`, `0xRRGGBB`, or a decimal integer, as a packed RGB number
    Color,
}

impl Transform {
    /// Every parameterless transform, for listings and pickers
    pub const BUILTIN: [Transform; 7] = [
        Transform::Identity,
        Transform::Trim,
        Transform::Lowercase,
        Transform::LocalName,
        Transform::Number,
        Transform::Vector3,
        Transform::Color,
    ];

    /// Apply the transform to a statement object
    pub fn apply(&self, raw: &Term) -> Result<AttributeValue, TransformError> {
        self.apply_str(raw.lexical())
    }

    /// Apply the transform to raw text
    pub fn apply_str(&self, raw: &str) -> Result<AttributeValue, TransformError> {
        match self {
            Transform::Identity => Ok(AttributeValue::Text(raw.to_string())),
            Transform::Trim => Ok(AttributeValue::Text(raw.trim().to_string())),
            Transform::Lowercase => Ok(AttributeValue::Text(raw.to_lowercase())),
            Transform::LocalName => Ok(AttributeValue::Text(local_name(raw).to_string())),
            Transform::StripPrefix(prefix) => raw
                .strip_prefix(prefix.as_str())
                .map(|rest| AttributeValue::Text(rest.to_string()))
                .ok_or_else(|| self.error(raw, format!("missing prefix {:?}", prefix))),
            Transform::Number => parse_number(raw)
                .map(AttributeValue::Number)
                .ok_or_else(|| self.error(raw, "not a finite number")),
            Transform::Vector3 => parse_vector3(raw)
                .map(AttributeValue::Vector3)
                .ok_or_else(|| self.error(raw, "expected exactly three numbers")),
            Transform::Color => parse_color(raw)
                .map(|rgb| AttributeValue::Number(f64::from(rgb)))
                .ok_or_else(|| self.error(raw, "not a color")),
        }
    }

    /// Apply the transform and render the output as a key string
    pub fn apply_key(&self, raw: &str) -> Result<String, TransformError> {
        self.apply_str(raw).map(|value| value.to_text())
    }

    fn error(&self, input: &str, reason: impl Into<String>) -> TransformError {
        TransformError {
            transform: self.to_string(),
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => f.write_str("identity"),
            Transform::Trim => f.write_str("trim"),
            Transform::Lowercase => f.write_str("lowercase"),
            Transform::LocalName => f.write_str("local_name"),
            Transform::StripPrefix(prefix) => write!(f, "strip_prefix:{}", prefix),
            Transform::Number => f.write_str("number"),
            Transform::Vector3 => f.write_str("vector3"),
            Transform::Color => f.write_str("color"),
        }
    }
}

impl FromStr for Transform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(prefix) = s.strip_prefix("strip_prefix:") {
            if prefix.is_empty() {
                return Err("strip_prefix needs a non-empty prefix".to_string());
            }
            return Ok(Transform::StripPrefix(prefix.to_string()));
        }

        match s {
            "identity" => Ok(Transform::Identity),
            "trim" => Ok(Transform::Trim),
            "lowercase" => Ok(Transform::Lowercase),
            "local_name" => Ok(Transform::LocalName),
            "number" => Ok(Transform::Number),
            "vector3" => Ok(Transform::Vector3),
            "color" => Ok(Transform::Color),
            other => Err(format!("Unknown transform: {}", other)),
        }
    }
}

/// The part of an IRI after its last `#` or `/`
///
/// Returns the input unchanged when it has neither separator, and the whole
/// input when the separator is the final character.
pub fn local_name(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(idx) if idx + 1 < iri.len() => &iri[idx + 1..],
        _ => iri,
    }
}

/// Parse a finite number, ignoring surrounding whitespace
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse exactly three finite numbers separated by commas or by whitespace
///
/// With commas, every field counts, so an empty field (`1,,2,3`, `,1,2,3`)
/// is a component that fails to parse. Anything other than three numeric
/// components is rejected rather than padded or truncated.
pub fn parse_vector3(raw: &str) -> Option<[f64; 3]> {
    let parts: Vec<&str> = if raw.contains(',') {
        raw.split(',').map(str::trim).collect()
    } else {
        raw.split_whitespace().collect()
    };

    if parts.len() != 3 {
        return None;
    }

    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = parse_number(part)?;
    }
    Some(out)
}

/// Parse `#RRGGBB`, `0xRRGGBB`, or a decimal integer no larger than `0xFFFFFF`
pub fn parse_color(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let value = if let Some(hex) = raw.strip_prefix('#') {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        raw.parse::<u32>().ok()?
    };

    (value <= 0xFF_FFFF).then_some(value)
}

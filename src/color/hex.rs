use serde::{Deserialize, Serialize};
use std::fmt;

/// A CSS hex color in `#RGB` or `#RRGGBB` form. The text is kept as the
/// administrator wrote it so stored overrides read back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    MissingHash(String),
    BadLength(String),
    BadDigit(String),
}

impl HexColor {
    pub fn parse(text: &str) -> Result<Self, HexColorError> {
        let text = text.trim();
        let Some(digits) = text.strip_prefix('#') else {
            return Err(HexColorError::MissingHash(text.to_string()));
        };
        if digits.len() != 3 && digits.len() != 6 {
            return Err(HexColorError::BadLength(text.to_string()));
        }
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(HexColorError::BadDigit(text.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expands the short form to the six digit lowercase form; `#F0A` becomes `#ff00aa`.
    pub fn to_long_form(&self) -> String {
        let digits = &self.0[1..];
        if digits.len() == 3 {
            let mut out = String::with_capacity(7);
            out.push('#');
            for ch in digits.chars() {
                let ch = ch.to_ascii_lowercase();
                out.push(ch);
                out.push(ch);
            }
            out
        } else {
            format!("#{}", digits.to_ascii_lowercase())
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = HexColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexColorError::MissingHash(text) => {
                write!(f, "'{}' is not a hex color (must start with '#')", text)
            }
            HexColorError::BadLength(text) => {
                write!(f, "'{}' must have 3 or 6 hex digits", text)
            }
            HexColorError::BadDigit(text) => {
                write!(f, "'{}' contains a non-hex digit", text)
            }
        }
    }
}

impl std::error::Error for HexColorError {}

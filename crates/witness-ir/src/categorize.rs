//! String categorization and obfuscation
//!
//! Credentials found in captured traffic are stored only in redacted form.
//! [`categorize_string`] classifies a raw string; [`CategorizedString::obfuscate`]
//! replaces it with a placeholder that keeps the category and a short
//! fingerprint so distinct secrets stay distinguishable.

use std::fmt::{self, Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::hash::DataHash;
use crate::value::Primitive;

static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("numeric pattern is a valid regex"));

// 8-4-4-4-12 hex groups
static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}(-[0-9a-fA-F]{4}){3}-[0-9a-fA-F]{12}$")
        .expect("UUID pattern is a valid regex")
});

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._+/=-]{16,}$").expect("token pattern is a valid regex"));

/// Semantic subtype of a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringCategory {
    Empty,
    Numeric,
    Uuid,
    /// Opaque credential-like value (long, no whitespace, hex or base64ish)
    Token,
    Text,
}

impl StringCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Numeric => "numeric",
            Self::Uuid => "uuid",
            Self::Token => "token",
            Self::Text => "text",
        }
    }
}

impl Display for StringCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw string with its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedString {
    category: StringCategory,
    value: String,
}

/// Classify `value`
#[must_use]
pub fn categorize_string(value: &str) -> CategorizedString {
    CategorizedString {
        category: classify(value),
        value: value.to_string(),
    }
}

impl CategorizedString {
    #[inline]
    #[must_use]
    pub fn category(&self) -> StringCategory {
        self.category
    }

    /// Replace the raw value with a redaction placeholder
    #[must_use]
    pub fn obfuscate(&self) -> Obfuscated {
        let fingerprint = DataHash::compute(self.value.as_bytes());
        Obfuscated {
            category: self.category,
            placeholder: format!("<redacted:{}:{}>", self.category, &fingerprint.short()[..8]),
        }
    }
}

/// Redacted form of a categorized string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obfuscated {
    category: StringCategory,
    placeholder: String,
}

impl Obfuscated {
    #[inline]
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Primitive carrying the placeholder, with the category as type hint
    #[must_use]
    pub fn to_primitive(&self) -> Primitive {
        let mut prim = Primitive::string(self.placeholder.clone());
        prim.type_hint = Some(self.category.as_str().to_string());
        prim
    }
}

fn classify(value: &str) -> StringCategory {
    if value.is_empty() {
        StringCategory::Empty
    } else if NUMERIC_RE.is_match(value) {
        StringCategory::Numeric
    } else if UUID_RE.is_match(value) {
        StringCategory::Uuid
    } else if TOKEN_RE.is_match(value) {
        StringCategory::Token
    } else {
        StringCategory::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(categorize_string("").category(), StringCategory::Empty);
        assert_eq!(categorize_string("12345").category(), StringCategory::Numeric);
        assert_eq!(
            categorize_string("123e4567-e89b-12d3-a456-426614174000").category(),
            StringCategory::Uuid
        );
        assert_eq!(
            categorize_string("0123456789abcdef0123456789abcdef").category(),
            StringCategory::Token
        );
        assert_eq!(categorize_string("hello world").category(), StringCategory::Text);
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(categorize_string("abcdef0123456789").category(), StringCategory::Token);
        assert_eq!(categorize_string("abcdef012345678").category(), StringCategory::Text);
        assert_eq!(categorize_string("not-a-valid-key-000").category(), StringCategory::Token);
        assert_eq!(categorize_string("dGVzdA==dGVzdA==/+").category(), StringCategory::Token);
        assert_eq!(categorize_string("0123456789abcdef 0123").category(), StringCategory::Text);
        // wrong group widths fall through to token
        assert_eq!(
            categorize_string("123e4567e-89b-12d3-a456-42661417400").category(),
            StringCategory::Token
        );
        assert_eq!(
            categorize_string("123E4567-E89B-12D3-A456-426614174000").category(),
            StringCategory::Uuid
        );
        assert_eq!(categorize_string("12a").category(), StringCategory::Text);
    }

    #[test]
    fn obfuscation_hides_raw_value() {
        let raw = "0123456789abcdef0123456789abcdef";
        let obf = categorize_string(raw).obfuscate();
        assert!(!obf.placeholder().contains(raw));
        assert!(obf.placeholder().starts_with("<redacted:token:"));
    }

    #[test]
    fn obfuscation_is_deterministic_and_distinguishing() {
        let a = categorize_string("secret-one-123456").obfuscate();
        let b = categorize_string("secret-one-123456").obfuscate();
        let c = categorize_string("secret-two-123456").obfuscate();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn primitive_carries_type_hint() {
        let prim = categorize_string("42").obfuscate().to_primitive();
        assert_eq!(prim.type_hint.as_deref(), Some("numeric"));
        assert!(prim.as_str().unwrap().starts_with("<redacted:numeric:"));
    }
}

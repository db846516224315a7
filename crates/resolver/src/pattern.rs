//! Validation pattern translation
//!
//! API descriptions carry patterns in the Perl `/regex/modifiers` convention.
//! Python compiles flags separately (`re.IGNORECASE`, ...), so the pattern is
//! split into its body and a list of named modifiers.

use kube_codegen_common::{GeneratorError, Result, VendorExtensions};
use serde::{Deserialize, Serialize};

/// Extension key holding the regex body
pub const REGEX_EXTENSION: &str = "x-regex";
/// Extension key holding the modifier names
pub const MODIFIERS_EXTENSION: &str = "x-modifiers";

/// Named regex modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegexModifier {
    IgnoreCase,
    Locale,
    Multiline,
    DotAll,
    Unicode,
    Verbose,
}

impl RegexModifier {
    /// Modifier for a Perl flag character; unknown flags yield `None`
    pub fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'i' => Some(RegexModifier::IgnoreCase),
            'l' => Some(RegexModifier::Locale),
            'm' => Some(RegexModifier::Multiline),
            's' => Some(RegexModifier::DotAll),
            'u' => Some(RegexModifier::Unicode),
            'x' => Some(RegexModifier::Verbose),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegexModifier::IgnoreCase => "IGNORECASE",
            RegexModifier::Locale => "LOCALE",
            RegexModifier::Multiline => "MULTILINE",
            RegexModifier::DotAll => "DOTALL",
            RegexModifier::Unicode => "UNICODE",
            RegexModifier::Verbose => "VERBOSE",
        }
    }
}

/// Portable form of a validation pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMetadata {
    pub regex: String,
    pub modifiers: Vec<RegexModifier>,
}

impl PatternMetadata {
    /// Split a `/regex/flags` pattern
    ///
    /// `owner` names the field or parameter in the error message.
    ///
    /// # Examples
    /// ```
    /// use kube_codegen_resolver::pattern::{PatternMetadata, RegexModifier};
    ///
    /// let meta = PatternMetadata::parse("/^[a-z]+$/i", "name").unwrap();
    /// assert_eq!(meta.regex, "^[a-z]+$");
    /// assert_eq!(meta.modifiers, vec![RegexModifier::IgnoreCase]);
    /// ```
    pub fn parse(pattern: &str, owner: &str) -> Result<Self> {
        let invalid = || GeneratorError::InvalidPatternFormat {
            pattern: pattern.to_string(),
            owner: owner.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid());
        }
        let end = pattern.rfind('/').filter(|&i| i >= 2).ok_or_else(invalid)?;

        let regex = pattern[1..end].replace('\'', "\\'");
        let modifiers = pattern[end..]
            .chars()
            .filter_map(RegexModifier::from_flag)
            .collect();

        Ok(Self { regex, modifiers })
    }

    /// Write `x-regex` and `x-modifiers` into an extension bag
    pub fn write_to(&self, extensions: &mut VendorExtensions) {
        let modifiers: Vec<serde_json::Value> = self
            .modifiers
            .iter()
            .map(|m| serde_json::Value::from(m.name()))
            .collect();

        extensions.insert(REGEX_EXTENSION, self.regex.clone());
        extensions.insert(MODIFIERS_EXTENSION, modifiers);
    }
}

/// Translate an optional pattern into `extensions`
///
/// Absent patterns leave the bag untouched.
pub fn apply_pattern(
    pattern: Option<&str>,
    owner: &str,
    extensions: &mut VendorExtensions,
) -> Result<()> {
    if let Some(pattern) = pattern {
        PatternMetadata::parse(pattern, owner)?.write_to(extensions);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_with_flags() {
        let meta = PatternMetadata::parse("/^[a-z]+$/imx", "field").unwrap();
        assert_eq!(meta.regex, "^[a-z]+$");
        assert_eq!(
            meta.modifiers,
            vec![
                RegexModifier::IgnoreCase,
                RegexModifier::Multiline,
                RegexModifier::Verbose
            ]
        );
    }

    #[test]
    fn test_unknown_flags_ignored() {
        let meta = PatternMetadata::parse("/abc/gqs", "field").unwrap();
        assert_eq!(meta.modifiers, vec![RegexModifier::DotAll]);
    }

    #[test]
    fn test_no_flags() {
        let meta = PatternMetadata::parse("/[0-9]+/", "field").unwrap();
        assert_eq!(meta.regex, "[0-9]+");
        assert!(meta.modifiers.is_empty());
    }

    #[test]
    fn test_single_quotes_escaped() {
        let meta = PatternMetadata::parse("/it's/", "field").unwrap();
        assert_eq!(meta.regex, r"it\'s");
    }

    #[test]
    fn test_embedded_slashes_use_last_delimiter() {
        let meta = PatternMetadata::parse("/a/b/i", "field").unwrap();
        assert_eq!(meta.regex, "a/b");
        assert_eq!(meta.modifiers, vec![RegexModifier::IgnoreCase]);
    }

    #[test]
    fn test_invalid_formats() {
        for pattern in ["^[a-z]+$", "", "/", "//", "//i", "a/b/"] {
            let err = PatternMetadata::parse(pattern, "v1.Pod.name").unwrap_err();
            match err {
                GeneratorError::InvalidPatternFormat { pattern: p, owner } => {
                    assert_eq!(p, pattern);
                    assert_eq!(owner, "v1.Pod.name");
                }
                other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn test_apply_pattern_writes_extensions() {
        let mut extensions = VendorExtensions::new();
        apply_pattern(Some("/^[a-z]+$/i"), "name", &mut extensions).unwrap();

        assert_eq!(extensions.get(REGEX_EXTENSION).unwrap(), "^[a-z]+$");
        assert_eq!(
            extensions.get(MODIFIERS_EXTENSION).unwrap(),
            &serde_json::json!(["IGNORECASE"])
        );
    }

    #[test]
    fn test_apply_absent_pattern() {
        let mut extensions = VendorExtensions::new();
        apply_pattern(None, "name", &mut extensions).unwrap();
        assert!(extensions.is_empty());
    }

    #[test]
    fn test_modifier_serialization() {
        let meta = PatternMetadata::parse("/x/is", "f").unwrap();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["modifiers"], serde_json::json!(["IGNORECASE", "DOTALL"]));
    }
}

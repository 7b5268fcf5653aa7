//! Bilingual text resolution.
//!
//! Every piece of display copy is a pair of values in the primary (English)
//! and secondary (Nepali) language. [`localize`] turns a pair into what the
//! client should display for the current [`LanguageMode`].

use serde::{Deserialize, Serialize};

/// A two-language copy pair. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBilingualText")]
pub struct BilingualText {
    /// Primary-language value.
    #[serde(rename = "en")]
    pub primary: String,
    /// Secondary-language value.
    #[serde(rename = "np")]
    pub secondary: String,
}

/// Authoring shorthand: a bare string means the same copy in both languages.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBilingualText {
    Same(String),
    Pair {
        #[serde(default)]
        en: Option<String>,
        #[serde(default)]
        np: Option<String>,
    },
}

impl From<RawBilingualText> for BilingualText {
    fn from(raw: RawBilingualText) -> Self {
        match raw {
            RawBilingualText::Same(value) => Self::same(value),
            RawBilingualText::Pair { en, np } => Self {
                primary: en.unwrap_or_default(),
                secondary: np.unwrap_or_default(),
            },
        }
    }
}

impl BilingualText {
    /// Builds a pair from both values.
    #[must_use]
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Builds a pair carrying the same value in both languages.
    #[must_use]
    pub fn same(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            primary: value.clone(),
            secondary: value,
        }
    }

    /// Returns true when both sides are blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.primary.trim().is_empty() && self.secondary.trim().is_empty()
    }

    /// Lower-cased concatenation of both sides, for substring search.
    #[must_use]
    pub fn search_blob(&self) -> String {
        format!("{} {}", self.primary, self.secondary).to_lowercase()
    }
}

/// Which language(s) the user wants to see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageMode {
    /// Both languages, primary prominent.
    #[default]
    #[serde(rename = "mixed")]
    Mixed,
    /// Primary language only.
    #[serde(rename = "en")]
    PrimaryOnly,
    /// Secondary language only.
    #[serde(rename = "np")]
    SecondaryOnly,
}

/// Resolved display copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    /// The line to display prominently.
    pub primary: String,
    /// Optional auxiliary line (mixed mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

/// Resolves `text` for `mode`. Values are trimmed; a blank side falls back
/// to the other, so `primary` is only empty when both sides are blank.
#[must_use]
pub fn localize(text: &BilingualText, mode: LanguageMode) -> LocalizedText {
    let en = text.primary.trim();
    let np = text.secondary.trim();
    let pick = |first: &str, second: &str| -> String {
        let chosen = if first.is_empty() { second } else { first };
        chosen.to_owned()
    };

    match mode {
        LanguageMode::PrimaryOnly => LocalizedText {
            primary: pick(en, np),
            secondary: None,
        },
        LanguageMode::SecondaryOnly => LocalizedText {
            primary: pick(np, en),
            secondary: None,
        },
        LanguageMode::Mixed if !en.is_empty() && !np.is_empty() => LocalizedText {
            primary: en.to_owned(),
            secondary: Some(np.to_owned()),
        },
        LanguageMode::Mixed => LocalizedText {
            primary: pick(en, np),
            secondary: None,
        },
    }
}

/// Resolves `text` onto a single line (`primary secondary` in mixed mode).
#[must_use]
pub fn localize_inline(text: &BilingualText, mode: LanguageMode) -> String {
    let view = localize(text, mode);
    match view.secondary {
        Some(secondary) => format!("{} {secondary}", view.primary),
        None => view.primary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [LanguageMode; 3] = [
        LanguageMode::Mixed,
        LanguageMode::PrimaryOnly,
        LanguageMode::SecondaryOnly,
    ];

    #[test]
    fn test_primary_only_prefers_primary_value() {
        let text = BilingualText::new("Hello", "Namaste");

        let view = localize(&text, LanguageMode::PrimaryOnly);

        assert_eq!(view.primary, "Hello");
        assert_eq!(view.secondary, None);
    }

    #[test]
    fn test_secondary_only_falls_back_to_primary() {
        let text = BilingualText::new("Hello", "");

        let view = localize(&text, LanguageMode::SecondaryOnly);

        assert_eq!(view.primary, "Hello");
        assert_eq!(view.secondary, None);
    }

    #[test]
    fn test_mixed_returns_both_when_present() {
        let text = BilingualText::new("Hello", "Namaste");

        let view = localize(&text, LanguageMode::Mixed);

        assert_eq!(view.primary, "Hello");
        assert_eq!(view.secondary.as_deref(), Some("Namaste"));
    }

    #[test]
    fn test_mixed_with_one_side_returns_single_line() {
        let text = BilingualText::new("", "Namaste");

        let view = localize(&text, LanguageMode::Mixed);

        assert_eq!(view.primary, "Namaste");
        assert_eq!(view.secondary, None);
    }

    #[test]
    fn test_primary_never_empty_when_any_side_present() {
        let samples = [
            BilingualText::new("a", ""),
            BilingualText::new("", "b"),
            BilingualText::new("a", "b"),
            BilingualText::new("  a ", "   "),
        ];
        for text in &samples {
            for mode in MODES {
                assert!(!localize(text, mode).primary.is_empty(), "{text:?} / {mode:?}");
            }
        }
    }

    #[test]
    fn test_blank_text_resolves_to_empty_without_secondary() {
        for mode in MODES {
            let view = localize(&BilingualText::default(), mode);
            assert_eq!(view, LocalizedText::default());
        }
    }

    #[test]
    fn test_localize_is_idempotent() {
        let text = BilingualText::new(" Hi ", " Namaste ");
        for mode in MODES {
            assert_eq!(localize(&text, mode), localize(&text, mode));
        }
    }

    #[test]
    fn test_localize_inline_joins_mixed_lines() {
        let text = BilingualText::new("Hi", "Namaste");

        assert_eq!(localize_inline(&text, LanguageMode::Mixed), "Hi Namaste");
        assert_eq!(localize_inline(&text, LanguageMode::SecondaryOnly), "Namaste");
    }

    #[test]
    fn test_deserializes_pair_string_and_partial_object() {
        let pair: BilingualText = serde_json::from_str(r#"{"en":"Hi","np":"Namaste"}"#).unwrap();
        let same: BilingualText = serde_json::from_str(r#""Wana""#).unwrap();
        let partial: BilingualText = serde_json::from_str(r#"{"en":"Only"}"#).unwrap();

        assert_eq!(pair, BilingualText::new("Hi", "Namaste"));
        assert_eq!(same, BilingualText::same("Wana"));
        assert_eq!(partial, BilingualText::new("Only", ""));
    }

    #[test]
    fn test_language_mode_uses_storage_names() {
        assert_eq!(serde_json::to_string(&LanguageMode::PrimaryOnly).unwrap(), r#""en""#);
        assert_eq!(
            serde_json::from_str::<LanguageMode>(r#""np""#).unwrap(),
            LanguageMode::SecondaryOnly
        );
    }
}

//! Read-only views over the presentational sections of the document.
//!
//! Every view is resolved for the caller's language mode, so the rendering
//! layer only ever sees display strings.

use chrono::{DateTime, Utc};
use mutu_core::text::{LanguageMode, LocalizedText, localize};
use serde::Serialize;

use crate::domain::document::{ContentDocument, Mood};

#[derive(Debug, Serialize)]
pub struct MetaView {
    pub app_id: String,
    pub app_name: LocalizedText,
    pub version: String,
    pub timezone: String,
    pub fingerprint: String,
    pub gate_enabled: bool,
    pub no_index: bool,
}

#[must_use]
pub fn get_meta(doc: &ContentDocument, mode: LanguageMode) -> MetaView {
    MetaView {
        app_id: doc.meta.app_id.clone(),
        app_name: localize(&doc.meta.app_name, mode),
        version: doc.meta.version.clone(),
        timezone: doc.meta.timezone.clone(),
        fingerprint: doc.fingerprint.clone(),
        gate_enabled: doc.gate.enabled,
        no_index: doc.settings.privacy.no_index,
    }
}

#[derive(Debug, Serialize)]
pub struct CoverView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub helper: LocalizedText,
    pub cta_primary: LocalizedText,
    pub cta_secondary: LocalizedText,
    pub footer: LocalizedText,
}

#[must_use]
pub fn get_cover(doc: &ContentDocument, mode: LanguageMode) -> CoverView {
    let cover = &doc.cover;
    CoverView {
        title: localize(&cover.title, mode),
        subtitle: localize(&cover.subtitle, mode),
        helper: localize(&cover.helper, mode),
        cta_primary: localize(&cover.cta_primary, mode),
        cta_secondary: localize(&cover.cta_secondary, mode),
        footer: localize(&cover.footer, mode),
    }
}

/// The letter in the variant matching the current mood.
#[derive(Debug, Serialize)]
pub struct LetterView {
    /// Mood of the variant actually shown.
    pub mood: Mood,
    pub title: LocalizedText,
    pub body: LocalizedText,
    pub cta: LocalizedText,
}

/// Falls back to the soft variant, then to any variant, when the requested
/// mood has none.
#[must_use]
pub fn get_letter(doc: &ContentDocument, mood: Mood, mode: LanguageMode) -> LetterView {
    let variants = &doc.letter.variants;
    let chosen = variants
        .get(&mood)
        .map(|v| (mood, v))
        .or_else(|| variants.get(&Mood::Soft).map(|v| (Mood::Soft, v)))
        .or_else(|| variants.iter().next().map(|(m, v)| (*m, v)));

    match chosen {
        Some((shown, variant)) => LetterView {
            mood: shown,
            title: localize(&doc.letter.title, mode),
            body: localize(&variant.body, mode),
            cta: localize(&variant.cta, mode),
        },
        None => LetterView {
            mood,
            title: localize(&doc.letter.title, mode),
            body: LocalizedText::default(),
            cta: LocalizedText::default(),
        },
    }
}

#[derive(Debug, Serialize)]
pub struct GalleryItemView {
    pub id: String,
    pub image: String,
    pub is_video: bool,
    pub date_iso: DateTime<Utc>,
    pub caption: LocalizedText,
}

#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub items: Vec<GalleryItemView>,
}

#[must_use]
pub fn get_gallery(doc: &ContentDocument, mode: LanguageMode) -> GalleryView {
    GalleryView {
        title: localize(&doc.gallery.title, mode),
        subtitle: localize(&doc.gallery.subtitle, mode),
        items: doc
            .gallery
            .items
            .iter()
            .map(|item| GalleryItemView {
                id: item.id.clone(),
                image: item.image.clone(),
                is_video: is_video(&item.image),
                date_iso: item.date_iso,
                caption: localize(&item.caption, mode),
            })
            .collect(),
    }
}

/// Asset paths ending in `.mp4` (optionally followed by a query) are videos.
#[must_use]
pub fn is_video(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".mp4") || lower.contains(".mp4?")
}

#[derive(Debug, Serialize)]
pub struct NurseSectionView {
    pub id: String,
    pub heading: LocalizedText,
    pub body: LocalizedText,
}

#[derive(Debug, Serialize)]
pub struct NurseView {
    pub title: LocalizedText,
    pub sections: Vec<NurseSectionView>,
    pub audio: Option<String>,
}

#[must_use]
pub fn get_nurse(doc: &ContentDocument, mode: LanguageMode) -> NurseView {
    let nurse = &doc.nurse_appreciation;
    NurseView {
        title: localize(&nurse.title, mode),
        sections: nurse
            .sections
            .iter()
            .map(|section| NurseSectionView {
                id: section.id.clone(),
                heading: localize(&section.heading, mode),
                body: localize(&section.body, mode),
            })
            .collect(),
        audio: nurse.audio.clone(),
    }
}

#[cfg(test)]
mod tests {
    use mutu_core::text::BilingualText;

    use super::*;
    use crate::domain::document::LetterVariant;

    fn doc_with_letters() -> ContentDocument {
        let mut doc = ContentDocument::default();
        doc.letter.title = BilingualText::new("Dear Mutu", "pyaro mutu");
        doc.letter.variants.insert(
            Mood::Soft,
            LetterVariant {
                body: BilingualText::new("soft body", ""),
                cta: BilingualText::same("Next"),
            },
        );
        doc.letter.variants.insert(
            Mood::Funny,
            LetterVariant {
                body: BilingualText::new("funny body", "hasne"),
                cta: BilingualText::same("Next"),
            },
        );
        doc
    }

    #[test]
    fn test_get_letter_uses_requested_mood() {
        // Arrange
        let doc = doc_with_letters();

        // Act
        let view = get_letter(&doc, Mood::Funny, LanguageMode::Mixed);

        // Assert
        assert_eq!(view.mood, Mood::Funny);
        assert_eq!(view.body.primary, "funny body");
        assert_eq!(view.body.secondary.as_deref(), Some("hasne"));
    }

    #[test]
    fn test_get_letter_falls_back_to_soft_variant() {
        let doc = doc_with_letters();

        let view = get_letter(&doc, Mood::Romantic, LanguageMode::SecondaryOnly);

        assert_eq!(view.mood, Mood::Soft);
        assert_eq!(view.body.primary, "soft body");
    }

    #[test]
    fn test_get_letter_without_variants_returns_empty_body() {
        let doc = ContentDocument::default();

        let view = get_letter(&doc, Mood::Romantic, LanguageMode::Mixed);

        assert_eq!(view.mood, Mood::Romantic);
        assert!(view.body.primary.is_empty());
    }

    #[test]
    fn test_is_video_matches_mp4_paths() {
        assert!(is_video("/img/gallery/clip.MP4"));
        assert!(is_video("/img/gallery/clip.mp4?t=3"));
        assert!(!is_video("/img/gallery/photo.jpg"));
        assert!(!is_video("/img/mp4/photo.jpg"));
    }

    #[test]
    fn test_get_meta_exposes_fingerprint_and_gate() {
        let mut doc = ContentDocument::default();
        doc.fingerprint = "abc".to_owned();
        doc.gate.enabled = true;

        let view = get_meta(&doc, LanguageMode::Mixed);

        assert_eq!(view.fingerprint, "abc");
        assert!(view.gate_enabled);
    }
}

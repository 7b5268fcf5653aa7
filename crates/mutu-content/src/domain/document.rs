//! Content Document schema.
//!
//! Field names follow the document's camelCase JSON. Every section is
//! optional in the source; missing fields take the defaults defined here so
//! readers never deal with absent values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mutu_core::text::{BilingualText, LanguageMode};
use serde::{Deserialize, Serialize};

/// The whole, read-only content tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentDocument {
    pub meta: Meta,
    pub settings: Settings,
    pub gate: Gate,
    pub cover: Cover,
    pub milestones: Vec<Milestone>,
    pub steps: Vec<StepDef>,
    pub letter: Letter,
    pub timeline: Timeline,
    pub gallery: Gallery,
    pub nurse_appreciation: NurseAppreciation,
    pub play: Play,
    pub promises: Promises,
    pub finale: Finale,
    pub vault: Vault,
    pub future_timeline: FutureTimeline,
    pub write_back: WriteBack,
    /// SHA-256 of the canonical JSON form, set by the loader.
    #[serde(skip)]
    pub fingerprint: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub app_id: String,
    pub app_name: BilingualText,
    pub version: String,
    pub timezone: String,
    pub locale_default: LanguageMode,
    pub notes: BilingualText,
}

/// Content-variant selector for the letter and finale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Soft,
    Funny,
    Romantic,
}

/// Stored reduced-motion preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionPreference {
    /// Follow the client's system setting.
    #[default]
    System,
    /// Always reduce motion.
    On,
    /// Never reduce motion.
    Off,
}

impl MotionPreference {
    /// Whether motion should be reduced given the client's system setting.
    #[must_use]
    pub fn reduced(self, system_prefers_reduced: bool) -> bool {
        match self {
            Self::On => true,
            Self::Off => false,
            Self::System => system_prefers_reduced,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub language_mode_default: LanguageMode,
    pub mood_default: Mood,
    pub reduced_motion_default: MotionPreference,
    pub privacy: Privacy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Privacy {
    pub no_index: bool,
    pub show_app_title_public: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinMode {
    #[default]
    Phrase,
    Pin,
}

/// Entry passphrase screen. A missing section means no gate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gate {
    pub enabled: bool,
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub hint: BilingualText,
    pub pin_mode: PinMode,
    pub phrase_options: Vec<String>,
    pub error_message: BilingualText,
    pub success_message: BilingualText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cover {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub helper: BilingualText,
    pub cta_primary: BilingualText,
    pub cta_secondary: BilingualText,
    pub footer: BilingualText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    #[serde(default)]
    pub label: BilingualText,
    #[serde(rename = "dateISO")]
    pub date_iso: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDef {
    pub id: String,
    #[serde(default)]
    pub label: BilingualText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterVariant {
    pub body: BilingualText,
    pub cta: BilingualText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Letter {
    pub title: BilingualText,
    pub variants: BTreeMap<Mood, LetterVariant>,
}

/// Condition under which a gated item becomes visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UnlockRule {
    /// Visible once the tap-sequence vault is open.
    Vault {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        requires: Option<String>,
    },
    /// Visible from the given instant on.
    Date {
        #[serde(rename = "dateISO")]
        date_iso: DateTime<Utc>,
    },
    /// Visible once a shared future passcode has been accepted.
    Passcode {
        #[serde(default, rename = "codeHint", skip_serializing_if = "Option::is_none")]
        code_hint: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineChapter {
    pub id: String,
    pub title: BilingualText,
    pub hint: BilingualText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineItem {
    pub id: String,
    pub chapter_id: String,
    #[serde(rename = "dateISO")]
    pub date_iso: Option<DateTime<Utc>>,
    pub display_date: String,
    pub title: BilingualText,
    pub short: BilingualText,
    pub long: BilingualText,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub audio: Option<String>,
    pub locked: bool,
    pub unlock: Option<UnlockRule>,
    pub location: Option<BilingualText>,
}

impl TimelineItem {
    /// An explicit rule wins; otherwise a locked item is vault-gated.
    #[must_use]
    pub fn effective_unlock(&self) -> Option<UnlockRule> {
        match (&self.unlock, self.locked) {
            (Some(rule), _) => Some(rule.clone()),
            (None, true) => Some(UnlockRule::Vault { requires: None }),
            (None, false) => None,
        }
    }

    /// Lower-cased text searched by the timeline filter.
    #[must_use]
    pub fn search_blob(&self) -> String {
        [
            self.display_date.to_lowercase(),
            self.title.search_blob(),
            self.short.search_blob(),
            self.long.search_blob(),
            self.tags.join(" ").to_lowercase(),
        ]
        .join(" ")
    }
}

/// Reactions offered when the document does not list its own.
pub const DEFAULT_REACTIONS: [&str; 5] = ["🥺", "😂", "❤️", "😳", "👀"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timeline {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub chapter_order: Vec<String>,
    pub chapters: Vec<TimelineChapter>,
    pub items: Vec<TimelineItem>,
    pub reactions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    pub image: String,
    #[serde(rename = "dateISO")]
    pub date_iso: DateTime<Utc>,
    #[serde(default)]
    pub caption: BilingualText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gallery {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NurseSection {
    pub id: String,
    pub heading: BilingualText,
    pub body: BilingualText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NurseAppreciation {
    pub title: BilingualText,
    pub sections: Vec<NurseSection>,
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizQuestion {
    pub id: String,
    pub question: BilingualText,
    pub options: Vec<BilingualText>,
    pub answer_index: usize,
    pub feedback_correct: BilingualText,
    pub feedback_wrong: BilingualText,
}

/// Minimum scores for the high and mid result tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizThresholds {
    pub high: u32,
    pub mid: u32,
}

impl Default for QuizThresholds {
    fn default() -> Self {
        Self { high: 8, mid: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizMessages {
    pub high: BilingualText,
    pub mid: BilingualText,
    pub low: BilingualText,
}

impl Default for QuizMessages {
    fn default() -> Self {
        Self {
            high: BilingualText::same("Soulmate-level memory."),
            mid: BilingualText::same("Strong mutu energy."),
            low: BilingualText::same("Okay, but you are cute, so forgiven."),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quiz {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub questions: Vec<QuizQuestion>,
    pub thresholds: QuizThresholds,
    pub result_messages: QuizMessages,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryMatch {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub pair_source: String,
    pub pair_count: usize,
    pub end_message: BilingualText,
    pub flip_back_ms: u64,
}

impl Default for MemoryMatch {
    fn default() -> Self {
        Self {
            title: BilingualText::default(),
            subtitle: BilingualText::default(),
            pair_source: "timeline.items".to_owned(),
            pair_count: 8,
            end_message: BilingualText::default(),
            flip_back_ms: 900,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Play {
    pub quiz: Quiz,
    pub memory_match: MemoryMatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Legendary,
    Rare,
    #[default]
    Common,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CouponItem {
    pub id: String,
    pub rarity: Rarity,
    pub icon: String,
    pub title: BilingualText,
    pub desc: BilingualText,
    pub expires: Option<String>,
    pub unlock: Option<UnlockRule>,
}

impl CouponItem {
    /// An explicit rule wins; otherwise legendary coupons are vault-gated.
    #[must_use]
    pub fn effective_unlock(&self) -> Option<UnlockRule> {
        match (&self.unlock, self.rarity) {
            (Some(rule), _) => Some(rule.clone()),
            (None, Rarity::Legendary) => Some(UnlockRule::Vault { requires: None }),
            (None, _) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponFilter {
    #[default]
    All,
    Unlocked,
    Redeemed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CouponFilterDef {
    pub id: CouponFilter,
    pub label: BilingualText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Promises {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub filters: Vec<CouponFilterDef>,
    pub cta_redeem: BilingualText,
    pub cta_undo: BilingualText,
    pub locked_label: BilingualText,
    pub items: Vec<CouponItem>,
}

impl Default for Promises {
    fn default() -> Self {
        Self {
            title: BilingualText::default(),
            subtitle: BilingualText::default(),
            filters: Vec::new(),
            cta_redeem: BilingualText::same("Redeem"),
            cta_undo: BilingualText::same("Undo"),
            locked_label: BilingualText::same("Unlock vault first"),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndingChoice {
    pub id: Mood,
    pub label: BilingualText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndingVariant {
    pub headline: BilingualText,
    pub body: BilingualText,
    pub cta_primary: BilingualText,
    pub cta_secondary: BilingualText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Finale {
    pub title: BilingualText,
    pub choices: Vec<EndingChoice>,
    pub variants: BTreeMap<Mood, EndingVariant>,
    pub hold_ms: u64,
}

impl Default for Finale {
    fn default() -> Self {
        Self {
            title: BilingualText::default(),
            choices: Vec::new(),
            variants: BTreeMap::new(),
            hold_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultUnlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
    pub count: u32,
    pub success_message: BilingualText,
}

impl Default for VaultUnlock {
    fn default() -> Self {
        Self {
            kind: "tapSequence".to_owned(),
            target: "heart".to_owned(),
            count: 7,
            success_message: BilingualText::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultItem {
    pub id: String,
    pub title: BilingualText,
    pub body: BilingualText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vault {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub unlock: VaultUnlock,
    pub items: Vec<VaultItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureItem {
    pub id: String,
    #[serde(default = "locked_by_default")]
    pub locked: bool,
    pub unlock: UnlockRule,
    #[serde(default)]
    pub title: BilingualText,
    #[serde(default)]
    pub short: BilingualText,
}

fn locked_by_default() -> bool {
    true
}

impl FutureItem {
    /// Unlocked entries are always visible regardless of their rule.
    #[must_use]
    pub fn effective_unlock(&self) -> Option<UnlockRule> {
        self.locked.then(|| self.unlock.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FutureTimeline {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    /// Accepted future passcodes; the loader fills in the gate phrases when empty.
    pub passcodes: Vec<String>,
    pub error_message: Option<BilingualText>,
    pub items: Vec<FutureItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteBack {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub placeholders: BilingualText,
    pub cta_save: BilingualText,
    pub cta_clear: BilingualText,
    pub saved_toast: BilingualText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_timeline_item_defaults_to_vault_rule() {
        let item = TimelineItem {
            id: "m1".to_owned(),
            locked: true,
            ..TimelineItem::default()
        };

        assert_eq!(
            item.effective_unlock(),
            Some(UnlockRule::Vault { requires: None })
        );
    }

    #[test]
    fn test_open_timeline_item_has_no_rule() {
        let item = TimelineItem::default();

        assert_eq!(item.effective_unlock(), None);
    }

    #[test]
    fn test_legendary_coupon_is_vault_gated() {
        let legendary = CouponItem {
            rarity: Rarity::Legendary,
            ..CouponItem::default()
        };
        let rare = CouponItem {
            rarity: Rarity::Rare,
            ..CouponItem::default()
        };

        assert!(legendary.effective_unlock().is_some());
        assert!(rare.effective_unlock().is_none());
    }

    #[test]
    fn test_future_item_unlocked_flag_overrides_rule() {
        let json = r#"{"id":"f1","locked":false,"unlock":{"type":"passcode","codeHint":"a word"}}"#;

        let item: FutureItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.effective_unlock(), None);
    }

    #[test]
    fn test_unlock_rule_parses_tagged_variants() {
        let date: UnlockRule =
            serde_json::from_str(r#"{"type":"date","dateISO":"2026-12-14T00:00:00+05:45"}"#)
                .unwrap();
        let vault: UnlockRule =
            serde_json::from_str(r#"{"type":"vault","requires":"unlocks.vault=true"}"#).unwrap();

        match date {
            UnlockRule::Date { date_iso } => {
                assert_eq!(date_iso.to_rfc3339(), "2026-12-13T18:15:00+00:00");
            }
            other => panic!("expected Date, got {other:?}"),
        }
        assert!(matches!(vault, UnlockRule::Vault { .. }));
    }

    #[test]
    fn test_motion_preference_resolution() {
        assert!(MotionPreference::On.reduced(false));
        assert!(!MotionPreference::Off.reduced(true));
        assert!(MotionPreference::System.reduced(true));
        assert!(!MotionPreference::System.reduced(false));
    }

    #[test]
    fn test_search_blob_covers_both_languages_and_tags() {
        let item = TimelineItem {
            display_date: "January 22, 2025".to_owned(),
            title: BilingualText::new("Our first date", "hamro pahilo date"),
            tags: vec!["Dates".to_owned()],
            ..TimelineItem::default()
        };

        let blob = item.search_blob();

        assert!(blob.contains("january 22"));
        assert!(blob.contains("pahilo"));
        assert!(blob.contains("dates"));
    }
}

//! Visibility evaluation for gated items.
//!
//! Pure functions of the rule, the current flags and the wall clock. Nothing
//! is cached: a date gate flips on the first evaluation at or after its
//! instant.

use chrono::{DateTime, Utc};
use mutu_content::domain::document::UnlockRule;
use serde::Serialize;

use super::aggregates::UnlockFlags;

/// Trims and lower-cases user input before comparison.
#[must_use]
pub fn normalize_phrase(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Case-insensitive membership test against an accepted-phrase set.
/// Blank input never matches.
#[must_use]
pub fn phrase_matches(input: &str, accepted: &[String]) -> bool {
    let normalized = normalize_phrase(input);
    !normalized.is_empty()
        && accepted
            .iter()
            .any(|phrase| normalize_phrase(phrase) == normalized)
}

/// Whether an item with `rule` is currently visible. `None` is always visible.
#[must_use]
pub fn is_unlocked(
    rule: Option<&UnlockRule>,
    item_id: &str,
    flags: &UnlockFlags,
    now: DateTime<Utc>,
) -> bool {
    match rule {
        None => true,
        Some(UnlockRule::Vault { .. }) => flags.vault,
        Some(UnlockRule::Date { date_iso }) => now >= *date_iso,
        Some(UnlockRule::Passcode { .. }) => flags.future_passcodes.contains(item_id),
    }
}

/// What the client should tell the user about a still-locked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LockNote {
    /// Opens with the vault.
    Vault,
    /// Opens at the given instant.
    Date { unlocks_at: DateTime<Utc> },
    /// Opens with the shared passcode.
    Passcode { hint: Option<String> },
}

/// The lock note for an item, or `None` if it is visible.
#[must_use]
pub fn lock_note(
    rule: Option<&UnlockRule>,
    item_id: &str,
    flags: &UnlockFlags,
    now: DateTime<Utc>,
) -> Option<LockNote> {
    if is_unlocked(rule, item_id, flags, now) {
        return None;
    }
    rule.map(|rule| match rule {
        UnlockRule::Vault { .. } => LockNote::Vault,
        UnlockRule::Date { date_iso } => LockNote::Date {
            unlocks_at: *date_iso,
        },
        UnlockRule::Passcode { code_hint } => LockNote::Passcode {
            hint: code_hint.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn instant(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 12, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_phrase_matching_is_trimmed_and_case_insensitive() {
        let accepted = vec!["wana".to_owned(), "MUTU".to_owned()];

        assert!(phrase_matches("  WaNa ", &accepted));
        assert!(phrase_matches("mutu", &accepted));
        assert!(!phrase_matches("wrong-pin", &accepted));
        assert!(!phrase_matches("   ", &accepted));
    }

    #[test]
    fn test_no_rule_is_always_unlocked() {
        let flags = UnlockFlags::default();

        assert!(is_unlocked(None, "x", &flags, instant(1)));
    }

    #[test]
    fn test_vault_rule_follows_vault_flag() {
        let rule = UnlockRule::Vault { requires: None };
        let mut flags = UnlockFlags::default();

        assert!(!is_unlocked(Some(&rule), "x", &flags, instant(1)));
        flags.vault = true;
        assert!(is_unlocked(Some(&rule), "x", &flags, instant(1)));
    }

    #[test]
    fn test_date_rule_opens_at_the_instant() {
        // Arrange
        let rule = UnlockRule::Date {
            date_iso: instant(14),
        };
        let flags = UnlockFlags::default();

        // Act / Assert
        assert!(!is_unlocked(Some(&rule), "f1", &flags, instant(13)));
        assert!(is_unlocked(Some(&rule), "f1", &flags, instant(14)));
        assert!(is_unlocked(Some(&rule), "f1", &flags, instant(15)));
    }

    #[test]
    fn test_date_rule_ignores_flags() {
        let rule = UnlockRule::Date {
            date_iso: instant(14),
        };
        let flags = UnlockFlags {
            gate: true,
            vault: true,
            future_passcodes: ["f1".to_owned()].into_iter().collect(),
            vault_taps: 7,
        };

        assert!(!is_unlocked(Some(&rule), "f1", &flags, instant(13)));
    }

    #[test]
    fn test_passcode_rule_checks_item_membership() {
        let rule = UnlockRule::Passcode { code_hint: None };
        let flags = UnlockFlags {
            future_passcodes: ["f_new_home".to_owned()].into_iter().collect(),
            ..UnlockFlags::default()
        };

        assert!(is_unlocked(Some(&rule), "f_new_home", &flags, instant(1)));
        assert!(!is_unlocked(Some(&rule), "f_other", &flags, instant(1)));
    }

    #[test]
    fn test_lock_note_describes_remaining_condition() {
        let hint = UnlockRule::Passcode {
            code_hint: Some("a word".to_owned()),
        };
        let date = UnlockRule::Date {
            date_iso: instant(14),
        };
        let flags = UnlockFlags::default();

        assert_eq!(
            lock_note(Some(&hint), "f", &flags, instant(1)),
            Some(LockNote::Passcode {
                hint: Some("a word".to_owned())
            })
        );
        assert_eq!(
            lock_note(Some(&date), "f", &flags, instant(1)),
            Some(LockNote::Date {
                unlocks_at: instant(14)
            })
        );
        assert_eq!(lock_note(Some(&date), "f", &flags, instant(20)), None);
    }
}

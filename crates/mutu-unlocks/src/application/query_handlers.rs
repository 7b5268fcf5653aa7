//! Query handlers for the Unlock Engine context.

use mutu_content::ContentDocument;
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::{LanguageMode, LocalizedText, localize};
use serde::Serialize;

use crate::domain::aggregates::{UnlockFlags, UnlockLedger};

/// Reads the persisted flags, applying the disabled-gate bypass. Missing or
/// malformed data yields all-locked flags.
pub async fn load_flags(content: &ContentDocument, store: &dyn StateStore) -> UnlockFlags {
    let flags: UnlockFlags = store::get_or_default(store, StorageKey::Unlocks).await;
    UnlockLedger::from_flags(flags, content.gate.enabled)
        .flags()
        .clone()
}

/// Read-only view of the unlock flags.
#[derive(Debug, Serialize)]
pub struct UnlocksView {
    pub gate_passed: bool,
    pub vault_unlocked: bool,
    pub vault_taps: u32,
    pub vault_count: u32,
    pub future_passcodes: Vec<String>,
}

impl UnlocksView {
    #[must_use]
    pub fn new(flags: &UnlockFlags, content: &ContentDocument) -> Self {
        Self {
            gate_passed: flags.gate,
            vault_unlocked: flags.vault,
            vault_taps: flags.vault_taps,
            vault_count: content.vault.unlock.count,
            future_passcodes: flags.future_passcodes.iter().cloned().collect(),
        }
    }
}

/// Current unlock flags.
pub async fn get_unlocks(content: &ContentDocument, store: &dyn StateStore) -> UnlocksView {
    let flags = load_flags(content, store).await;
    UnlocksView::new(&flags, content)
}

#[derive(Debug, Serialize)]
pub struct VaultItemView {
    pub id: String,
    pub title: LocalizedText,
    pub body: LocalizedText,
}

/// The vault screen. Items are only listed once the vault is open.
#[derive(Debug, Serialize)]
pub struct VaultView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub target: String,
    pub taps: u32,
    pub count: u32,
    /// `taps / count`, in `[0, 1]`.
    pub progress: f64,
    pub unlocked: bool,
    pub success_message: Option<LocalizedText>,
    pub items: Vec<VaultItemView>,
}

impl VaultView {
    #[must_use]
    pub fn new(flags: &UnlockFlags, content: &ContentDocument, mode: LanguageMode) -> Self {
        let vault = &content.vault;
        let count = vault.unlock.count.max(1);
        let taps = if flags.vault { count } else { flags.vault_taps.min(count) };
        let items = if flags.vault {
            vault
                .items
                .iter()
                .map(|item| VaultItemView {
                    id: item.id.clone(),
                    title: localize(&item.title, mode),
                    body: localize(&item.body, mode),
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            title: localize(&vault.title, mode),
            subtitle: localize(&vault.subtitle, mode),
            target: vault.unlock.target.clone(),
            taps,
            count,
            progress: f64::from(taps) / f64::from(count),
            unlocked: flags.vault,
            success_message: flags
                .vault
                .then(|| localize(&vault.unlock.success_message, mode)),
            items,
        }
    }
}

/// Vault progress and, once open, its items.
pub async fn get_vault(
    content: &ContentDocument,
    mode: LanguageMode,
    store: &dyn StateStore,
) -> VaultView {
    let flags = load_flags(content, store).await;
    VaultView::new(&flags, content, mode)
}

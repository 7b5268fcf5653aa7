//! Query handlers for the Keepsakes context.

use chrono::{DateTime, Utc};
use mutu_content::ContentDocument;
use mutu_content::domain::document::{CouponFilter, Rarity};
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::{LanguageMode, LocalizedText, localize};
use mutu_unlocks::application::query_handlers::load_flags;
use mutu_unlocks::domain::aggregates::UnlockFlags;
use serde::Serialize;

use crate::domain::aggregates::{CouponBook, WriteBackNote};
use crate::domain::coupons::{coupon_unlocked, filter_coupons};

pub async fn load_coupon_book(store: &dyn StateStore) -> CouponBook {
    CouponBook::new(store::get_or_default(store, StorageKey::RedeemedCoupons).await)
}

pub async fn load_note(store: &dyn StateStore) -> WriteBackNote {
    WriteBackNote::new(store::get_or_default(store, StorageKey::UserNote).await)
}

#[derive(Debug, Serialize)]
pub struct CouponView {
    pub id: String,
    pub rarity: Rarity,
    pub icon: String,
    pub title: LocalizedText,
    pub desc: LocalizedText,
    pub expires: Option<String>,
    pub unlocked: bool,
    pub redeemed: bool,
    /// Redeem, undo or the locked label, whichever applies.
    pub action_label: LocalizedText,
}

#[derive(Debug, Serialize)]
pub struct FilterView {
    pub id: CouponFilter,
    pub label: LocalizedText,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct CouponsView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub filters: Vec<FilterView>,
    pub items: Vec<CouponView>,
    pub redeemed_count: usize,
}

impl CouponsView {
    #[must_use]
    pub fn build(
        content: &ContentDocument,
        book: &CouponBook,
        flags: &UnlockFlags,
        filter: CouponFilter,
        mode: LanguageMode,
        now: DateTime<Utc>,
    ) -> Self {
        let promises = &content.promises;
        let redeemed = book.redeemed();
        let items = filter_coupons(&promises.items, filter, redeemed, flags, now)
            .into_iter()
            .map(|coupon| {
                let unlocked = coupon_unlocked(coupon, flags, now);
                let is_redeemed = redeemed.contains(&coupon.id);
                let action = if !unlocked {
                    &promises.locked_label
                } else if is_redeemed {
                    &promises.cta_undo
                } else {
                    &promises.cta_redeem
                };
                CouponView {
                    id: coupon.id.clone(),
                    rarity: coupon.rarity,
                    icon: coupon.icon.clone(),
                    title: localize(&coupon.title, mode),
                    desc: localize(&coupon.desc, mode),
                    expires: coupon.expires.clone(),
                    unlocked,
                    redeemed: is_redeemed,
                    action_label: localize(action, mode),
                }
            })
            .collect();
        Self {
            title: localize(&promises.title, mode),
            subtitle: localize(&promises.subtitle, mode),
            filters: promises
                .filters
                .iter()
                .map(|f| FilterView {
                    id: f.id,
                    label: localize(&f.label, mode),
                    active: f.id == filter,
                })
                .collect(),
            items,
            redeemed_count: redeemed.len(),
        }
    }
}

pub async fn get_coupons(
    content: &ContentDocument,
    filter: CouponFilter,
    mode: LanguageMode,
    now: DateTime<Utc>,
    store: &dyn StateStore,
) -> CouponsView {
    let flags = load_flags(content, store).await;
    let book = load_coupon_book(store).await;
    CouponsView::build(content, &book, &flags, filter, mode, now)
}

#[derive(Debug, Serialize)]
pub struct NoteView {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub placeholder: LocalizedText,
    pub cta_save: LocalizedText,
    pub cta_clear: LocalizedText,
    pub text: String,
    /// Set right after a save so the client can show its toast.
    pub saved_toast: Option<LocalizedText>,
}

impl NoteView {
    #[must_use]
    pub fn new(note: &WriteBackNote, content: &ContentDocument, mode: LanguageMode, just_saved: bool) -> Self {
        let copy = &content.write_back;
        Self {
            title: localize(&copy.title, mode),
            subtitle: localize(&copy.subtitle, mode),
            placeholder: localize(&copy.placeholders, mode),
            cta_save: localize(&copy.cta_save, mode),
            cta_clear: localize(&copy.cta_clear, mode),
            text: note.text().to_owned(),
            saved_toast: just_saved.then(|| localize(&copy.saved_toast, mode)),
        }
    }
}

pub async fn get_note(content: &ContentDocument, mode: LanguageMode, store: &dyn StateStore) -> NoteView {
    NoteView::new(&load_note(store).await, content, mode, false)
}

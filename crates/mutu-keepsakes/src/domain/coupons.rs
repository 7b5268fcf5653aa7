//! Coupon ordering and filtering.

use chrono::{DateTime, Utc};
use mutu_content::domain::document::{CouponFilter, CouponItem};
use mutu_unlocks::domain::aggregates::UnlockFlags;
use mutu_unlocks::domain::rules::is_unlocked;

/// Whether the coupon can be redeemed right now.
#[must_use]
pub fn coupon_unlocked(coupon: &CouponItem, flags: &UnlockFlags, now: DateTime<Utc>) -> bool {
    is_unlocked(coupon.effective_unlock().as_ref(), &coupon.id, flags, now)
}

/// Legendary first, then Rare, then Common. Ties keep document order.
#[must_use]
pub fn sorted_by_rarity(items: &[CouponItem]) -> Vec<&CouponItem> {
    let mut sorted: Vec<&CouponItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.rarity);
    sorted
}

/// Applies `filter` to the rarity-sorted coupons.
#[must_use]
pub fn filter_coupons<'a>(
    items: &'a [CouponItem],
    filter: CouponFilter,
    redeemed: &[String],
    flags: &UnlockFlags,
    now: DateTime<Utc>,
) -> Vec<&'a CouponItem> {
    sorted_by_rarity(items)
        .into_iter()
        .filter(|item| match filter {
            CouponFilter::All => true,
            CouponFilter::Unlocked => coupon_unlocked(item, flags, now),
            CouponFilter::Redeemed => redeemed.contains(&item.id),
        })
        .collect()
}

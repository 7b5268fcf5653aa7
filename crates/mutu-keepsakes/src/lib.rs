//! Mutu Memoir — Keepsakes bounded context.
//!
//! Redeemable promise coupons (some held back until the vault opens) and the
//! free-text note written back to the giver.

pub mod application;
pub mod domain;

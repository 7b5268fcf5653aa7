pub mod aggregates;
pub mod commands;
pub mod coupons;
pub mod events;

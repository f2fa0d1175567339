//! Records served by the remote travel API and the payloads sent back to it.

pub mod activity;
pub mod auth;
pub mod banner;
pub mod cart;
pub mod category;
pub mod payment_method;
pub mod promo;
pub mod transaction;
pub mod types;
pub mod upload;
pub mod user;

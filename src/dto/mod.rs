//! Data transfer objects handed from services to templates.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod transactions;

//! Data models shared across the crate.

pub mod bill;
pub mod config;
pub mod receipt;

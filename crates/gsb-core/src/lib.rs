//! Core domain + application logic for the group directory bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and PostgreSQL
//! live behind ports (traits) implemented in adapter crates.

pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod ports;

pub use errors::{Error, Result};

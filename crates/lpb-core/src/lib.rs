//! Core domain + application logic for the Leaders Ping bot.
//!
//! This crate is intentionally framework-agnostic. Slack lives behind ports
//! (traits) implemented in the `lpb-slack` adapter crate.

pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod identity;
pub mod logging;
pub mod ports;
pub mod roster;
pub mod security;
pub mod service;

pub use errors::{Error, Result};

#[cfg(test)]
pub(crate) mod test_support;

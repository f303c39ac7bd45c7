//! Clients for third-party delivery providers.

pub mod client;
pub mod mail;

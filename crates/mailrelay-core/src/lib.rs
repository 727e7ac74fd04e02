/// Mailrelay Core - Shared library for the Mailrelay SES forwarding system
///
/// This crate contains shared types, traits, and utilities used across
/// the forwarder, provisioner and parser Lambda functions.
pub mod constants;
pub mod email;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::MailRelayError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

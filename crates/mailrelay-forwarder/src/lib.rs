/// Mailrelay Forwarder - inbound email forwarding Lambda
///
/// Downloads the raw email SES stored in S3, rewrites its sender headers so
/// it can be sent from the verified domain, and relays it to a fixed address.
pub mod handlers;

// Re-export commonly used items
pub use handlers::{ForwardOutcome, Forwarder, handler};
pub use mailrelay_core::*;

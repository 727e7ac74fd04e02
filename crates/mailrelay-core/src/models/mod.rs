/// Data models for Mailrelay
pub mod cloudformation;
pub mod config;
pub mod events;

pub use cloudformation::*;
pub use config::*;
pub use events::*;

/// Mailrelay Parser - logs the plain-text body of emails delivered over SNS
pub mod handlers;

pub use handlers::handler;

/// Email processing modules
pub mod body;
pub mod message;
pub mod rewrite;

pub use body::extract_plain_text;
pub use message::{Header, RawMessage};
pub use rewrite::{extract_friendly_name, rewrite_headers};

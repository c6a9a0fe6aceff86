pub mod source;
pub mod client;
pub mod query;
pub mod types;

pub use source::AlertSource;
pub use client::{GitHubClient, DEFAULT_API_URL};

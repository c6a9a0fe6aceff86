pub mod credentials;
pub mod types;

pub use credentials::{redact_credentials, resolve_credential};
pub use types::ExportConfig;

pub mod credentials;
pub mod parser;
pub mod schema;
pub mod security;
pub mod types;

pub use credentials::{redact_authorization, resolve_credential};
pub use types::*;
pub use parser::{parse_config, parse_config_str};

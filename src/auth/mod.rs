pub mod credentials;
pub mod signer;

pub use credentials::ApiCredentials;
pub use signer::{RequestSigner, VeracodeHmacSigner};

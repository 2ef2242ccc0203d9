pub mod envelope;
pub mod finding;
pub mod job;
pub mod request;
pub mod window;

pub use finding::*;
pub use job::*;
pub use request::*;
pub use window::*;

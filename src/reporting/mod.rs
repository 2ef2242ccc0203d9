pub mod csv;
pub mod naming;
pub mod writer;

pub use naming::OutputTarget;
pub use writer::{write_report, WriteOutcome};

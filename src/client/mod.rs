pub mod fakes;
pub mod service;
pub mod veracode;

pub use service::ReportService;
pub use veracode::VeracodeClient;

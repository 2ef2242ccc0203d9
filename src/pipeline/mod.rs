pub mod events;
pub mod orchestrator;
pub mod poller;
pub mod state;

pub use events::PipelineEvent;
pub use orchestrator::ReportPipeline;
pub use poller::poll_until_terminal;
pub use state::*;

pub mod commands;
pub mod progress;
pub mod run;

pub use commands::{Cli, Commands};

use crate::errors::ReportError;

pub async fn dispatch(cli: &Cli) -> Result<(), ReportError> {
    match &cli.command {
        Commands::Intervals(args) => run::handle_intervals(cli, args).await,
        Commands::Single(args) => run::handle_single(cli, args).await,
        Commands::Validate(args) => run::handle_validate(args).await,
    }
}

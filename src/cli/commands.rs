use chrono::NaiveDate;
use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(
    name = "veracode-report",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ", built ", env!("BUILD_TIMESTAMP"), ")"),
    about = "Generate Veracode analytics findings reports and export them to CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file (defaults to ./veracode-report.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory for CSV output
    #[arg(short, long, global = true)]
    pub output_dir: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export findings over consecutive 6-month windows
    Intervals(IntervalArgs),
    /// Export findings with a single report request
    Single(SingleArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct IntervalArgs {
    /// Start date of the first window (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start_date: NaiveDate,

    /// Number of 6-month windows to export
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_intervals: u32,
}

#[derive(Args, Clone)]
pub struct SingleArgs {
    /// JSON file holding the full report request body
    #[arg(short, long)]
    pub request: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub file: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intervals() {
        let cli = Cli::try_parse_from([
            "veracode-report", "intervals", "--start-date", "2023-01-01", "--num-intervals", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Intervals(args) => {
                assert_eq!(args.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
                assert_eq!(args.num_intervals, 2);
            }
            _ => panic!("expected intervals"),
        }
    }

    #[test]
    fn test_intervals_requires_both_flags() {
        assert!(Cli::try_parse_from(["veracode-report", "intervals", "--start-date", "2023-01-01"]).is_err());
        assert!(Cli::try_parse_from(["veracode-report", "intervals", "--num-intervals", "2"]).is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Cli::try_parse_from([
            "veracode-report", "intervals", "--start-date", "01/01/2023", "--num-intervals", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let result = Cli::try_parse_from([
            "veracode-report", "intervals", "--start-date", "2023-01-01", "--num-intervals", "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_validate_keeps_global_config_separate() {
        let cli = Cli::try_parse_from(["veracode-report", "validate", "x.yaml"]).unwrap();
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Validate(args) => assert_eq!(args.file, "x.yaml"),
            _ => panic!("expected validate"),
        }

        let cli = Cli::try_parse_from(["veracode-report", "-c", "other.yaml", "validate", "x.yaml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("other.yaml"));
        match cli.command {
            Commands::Validate(args) => assert_eq!(args.file, "x.yaml"),
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "veracode-report", "single", "--request", "finding.json", "-o", "out", "-vv", "--quiet",
        ])
        .unwrap();
        assert_eq!(cli.output_dir.as_deref(), Some("out"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        match cli.command {
            Commands::Single(args) => assert_eq!(args.request.as_deref(), Some("finding.json")),
            _ => panic!("expected single"),
        }
    }
}

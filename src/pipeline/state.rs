use std::path::PathBuf;
use std::time::Duration;
use chrono::NaiveDate;
use serde::Serialize;
use crate::config::{ReportConfig, TimeoutAction};
use crate::models::{IntervalWindow, ReportRequest};

/// Fixed-interval polling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollSettings {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.poll_interval_secs()),
            max_attempts: config.max_poll_attempts(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

/// Terminal result of polling one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PollOutcome {
    Completed { attempts: u32 },
    /// The service reported a status other than PROCESSING or COMPLETED.
    Failed { status: Option<String>, attempts: u32 },
    /// Still PROCESSING when the attempt budget ran out.
    TimedOut { attempts: u32 },
}

impl PollOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Completed { attempts } | Self::Failed { attempts, .. } | Self::TimedOut { attempts } => *attempts,
        }
    }
}

/// How a run maps onto report requests.
#[derive(Debug, Clone)]
pub enum WindowPolicy {
    /// One request submitted as given. Output goes to the first free
    /// `output_<n>.csv`.
    Single { request: ReportRequest },
    /// `count` consecutive 6-month windows from `start`, each written to
    /// `output_<i>.csv`.
    Sliding {
        template: ReportRequest,
        start: NaiveDate,
        count: u32,
    },
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub poll: PollSettings,
    pub on_timeout: TimeoutAction,
}

impl PipelineConfig {
    pub fn from_config(config: &ReportConfig, output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            poll: PollSettings::from_config(config),
            on_timeout: config.on_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WindowOutcome {
    Written { path: PathBuf, rows: usize },
    Empty,
    TimedOut,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    pub window: Option<IntervalWindow>,
    pub job_id: String,
    pub poll_attempts: u32,
    pub outcome: WindowOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub windows: Vec<WindowReport>,
}

impl RunSummary {
    pub fn files_written(&self) -> usize {
        self.windows
            .iter()
            .filter(|w| matches!(w.outcome, WindowOutcome::Written { .. }))
            .count()
    }

    pub fn total_rows(&self) -> usize {
        self.windows
            .iter()
            .map(|w| match w.outcome {
                WindowOutcome::Written { rows, .. } => rows,
                _ => 0,
            })
            .sum()
    }

    pub fn timed_out(&self) -> usize {
        self.windows
            .iter()
            .filter(|w| w.outcome == WindowOutcome::TimedOut)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_settings() {
        let settings = PollSettings::default();
        assert_eq!(settings.interval, Duration::from_secs(60));
        assert_eq!(settings.max_attempts, 30);
    }

    #[test]
    fn test_outcome_attempts() {
        assert_eq!(PollOutcome::Completed { attempts: 3 }.attempts(), 3);
        assert_eq!(PollOutcome::Failed { status: None, attempts: 1 }.attempts(), 1);
        assert_eq!(PollOutcome::TimedOut { attempts: 30 }.attempts(), 30);
    }

    #[test]
    fn test_summary_counts() {
        let report = |outcome| WindowReport {
            window: None,
            job_id: "j".into(),
            poll_attempts: 1,
            outcome,
        };
        let summary = RunSummary {
            windows: vec![
                report(WindowOutcome::Written { path: "a.csv".into(), rows: 4 }),
                report(WindowOutcome::Empty),
                report(WindowOutcome::TimedOut),
                report(WindowOutcome::Written { path: "b.csv".into(), rows: 2 }),
            ],
        };
        assert_eq!(summary.files_written(), 2);
        assert_eq!(summary.total_rows(), 6);
        assert_eq!(summary.timed_out(), 1);
    }

    #[test]
    fn test_poll_outcome_serializes_tagged() {
        let value = serde_json::to_value(PollOutcome::TimedOut { attempts: 30 }).unwrap();
        assert_eq!(value["outcome"], "timed_out");
        assert_eq!(value["attempts"], 30);
    }
}

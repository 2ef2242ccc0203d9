use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use crate::config::TimeoutAction;
use crate::pipeline::{PipelineEvent, RunSummary, WindowOutcome};

/// Spinner shown while a run is in progress. Milestones are printed above it.
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("Starting...");
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        Self { bar }
    }

    pub fn handle_event(&self, event: &PipelineEvent) {
        if let PipelineEvent::StatusPolled { attempt, max_attempts, status, .. } = event {
            self.bar.set_message(format!("Report {} (check {}/{})", status, attempt, max_attempts));
        }
        if let PipelineEvent::JobSubmitted { job_id } = event {
            self.bar.set_message(format!("Waiting for report {}", job_id));
        }
        if let Some(line) = render_event(event) {
            self.bar.println(line);
        }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl Default for RunProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Consume pipeline events until the sender side is dropped.
pub async fn drive_progress(mut rx: mpsc::UnboundedReceiver<PipelineEvent>) {
    let progress = RunProgress::new();
    while let Some(event) = rx.recv().await {
        progress.handle_event(&event);
    }
    progress.finish();
}

/// Styled line for events worth keeping on screen; `None` for transient ones.
pub fn render_event(event: &PipelineEvent) -> Option<String> {
    match event {
        PipelineEvent::RunStarted { windows } => Some(format!(
            "{} Requesting {} report{}",
            style("▶").green().bold(),
            windows,
            if *windows == 1 { "" } else { "s" },
        )),
        PipelineEvent::WindowStarted { window: Some(window) } => Some(format!(
            "{} Window {} {} → {}",
            style("---").cyan().bold(),
            style(window.index).cyan().bold(),
            window.start,
            window.end,
        )),
        PipelineEvent::WindowStarted { window: None } => None,
        PipelineEvent::JobSubmitted { job_id } => Some(format!(
            "  {} Report requested: {}",
            style("⏳").yellow(),
            style(job_id).dim(),
        )),
        PipelineEvent::StatusPolled { .. } => None,
        PipelineEvent::ReportWritten { path, rows } => Some(format!(
            "  {} {} findings → {}",
            style("✓").green(),
            rows,
            style(path.display()).green(),
        )),
        PipelineEvent::ReportEmpty { .. } => Some(format!(
            "  {} No findings in this report",
            style("∅").dim(),
        )),
        PipelineEvent::WindowTimedOut { job_id, attempts, action } => Some(format!(
            "  {} Report {} still processing after {} checks, {}",
            style("✗").yellow(),
            job_id,
            attempts,
            match action {
                TimeoutAction::Skip => "skipped",
                TimeoutAction::Abort => "aborting run",
            },
        )),
        PipelineEvent::RunFinished { .. } => None,
    }
}

/// Final summary printed after a run.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    for report in &summary.windows {
        let label = match report.window {
            Some(w) => format!("{} [{}, {})", w.index, w.start, w.end),
            None => "report".to_string(),
        };
        let result = match &report.outcome {
            WindowOutcome::Written { path, rows } => format!("{} rows → {}", rows, path.display()),
            WindowOutcome::Empty => "no findings".to_string(),
            WindowOutcome::TimedOut => format!("timed out after {} checks", report.poll_attempts),
        };
        out.push_str(&format!("  {:<28} {}\n", label, result));
    }
    out.push_str(&format!(
        "{} {} file(s), {} finding(s)",
        style("Done:").bold(),
        summary.files_written(),
        summary.total_rows(),
    ));
    if summary.timed_out() > 0 {
        out.push_str(&format!(", {} timed out", style(summary.timed_out()).yellow()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use crate::pipeline::WindowReport;

    #[test]
    fn test_status_polls_are_transient() {
        let event = PipelineEvent::StatusPolled {
            job_id: "j".into(),
            attempt: 1,
            max_attempts: 30,
            status: crate::models::JobStatus::Processing,
        };
        assert!(render_event(&event).is_none());
    }

    #[test]
    fn test_written_event_mentions_path() {
        console::set_colors_enabled(false);
        let event = PipelineEvent::ReportWritten { path: PathBuf::from("output_1.csv"), rows: 12 };
        let line = render_event(&event).unwrap();
        assert!(line.contains("12 findings"));
        assert!(line.contains("output_1.csv"));
    }

    #[test]
    fn test_timed_out_line_reflects_action() {
        console::set_colors_enabled(false);
        let skipped = PipelineEvent::WindowTimedOut {
            job_id: "job-1".into(),
            attempts: 30,
            action: TimeoutAction::Skip,
        };
        let aborted = PipelineEvent::WindowTimedOut {
            job_id: "job-1".into(),
            attempts: 30,
            action: TimeoutAction::Abort,
        };
        assert!(render_event(&skipped).unwrap().ends_with("after 30 checks, skipped"));
        let line = render_event(&aborted).unwrap();
        assert!(line.ends_with("after 30 checks, aborting run"));
        assert!(!line.contains("skipped"));
    }

    #[test]
    fn test_summary_lists_each_window() {
        console::set_colors_enabled(false);
        let summary = RunSummary {
            windows: vec![
                WindowReport {
                    window: None,
                    job_id: "a".into(),
                    poll_attempts: 2,
                    outcome: WindowOutcome::Written { path: PathBuf::from("output_1.csv"), rows: 3 },
                },
                WindowReport {
                    window: None,
                    job_id: "b".into(),
                    poll_attempts: 30,
                    outcome: WindowOutcome::TimedOut,
                },
            ],
        };
        let text = render_summary(&summary);
        assert!(text.contains("3 rows → output_1.csv"));
        assert!(text.contains("timed out after 30 checks"));
        assert!(text.contains("Done: 1 file(s), 3 finding(s), 1 timed out"));
    }
}

//! Structured logger with dry-run awareness and summary collection.
use std::sync::Mutex;

use super::types::{UnitOutcome, UnitStatus};

/// Target of stage header events.
pub(super) const STAGE_TARGET: &str = "unit_provision::stage";

/// Target of dry-run events.
pub(super) const DRY_RUN_TARGET: &str = "unit_provision::dry_run";

/// Structured logger with dry-run awareness and summary collection.
///
/// Messages go through [`tracing`]; the console rendering is set up by
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug, Default)]
pub struct Logger {
    outcomes: Mutex<Vec<UnitOutcome>>,
}

impl Logger {
    /// Create a new logger with no recorded outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a unit result for the summary.
    pub fn record(&self, name: &str, status: UnitStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.outcomes.lock() {
            guard.push(UnitOutcome {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return a clone of all recorded outcomes.
    #[must_use]
    pub fn outcomes(&self) -> Vec<UnitOutcome> {
        self.outcomes.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Return `true` if any recorded unit has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.count(UnitStatus::Failed) > 0
    }

    /// Count recorded outcomes with `status`.
    #[must_use]
    pub fn count(&self, status: UnitStatus) -> usize {
        self.outcomes.lock().map_or(0, |guard| {
            guard.iter().filter(|o| o.status == status).count()
        })
    }

    /// Log the summary of all recorded outcomes.
    pub fn print_summary(&self) {
        let outcomes = self.outcomes();
        if outcomes.is_empty() {
            return;
        }

        self.stage("Summary");
        for outcome in &outcomes {
            let (icon, color) = match outcome.status {
                UnitStatus::Changed => ("✓", "\x1b[32m"),
                UnitStatus::AlreadyOk => ("·", "\x1b[2m"),
                UnitStatus::Skipped => ("○", "\x1b[33m"),
                UnitStatus::DryRun => ("~", "\x1b[37m"),
                UnitStatus::Failed => ("✗", "\x1b[31m"),
            };
            let suffix = outcome
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", outcome.name));
        }

        self.info(&format!(
            "{} units: \x1b[32m{} changed\x1b[0m, \x1b[2m{} ok\x1b[0m, \x1b[33m{} skipped\x1b[0m, \x1b[37m{} dry-run\x1b[0m, \x1b[31m{} failed\x1b[0m",
            outcomes.len(),
            self.count(UnitStatus::Changed),
            self.count(UnitStatus::AlreadyOk),
            self.count(UnitStatus::Skipped),
            self.count(UnitStatus::DryRun),
            self.count(UnitStatus::Failed),
        ));
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn logger_new_is_empty() {
        let log = Logger::new();
        assert!(log.outcomes().is_empty());
        assert!(!log.has_failures());
    }

    #[test]
    fn record_and_count() {
        let log = Logger::new();
        log.record("mask foo.service", UnitStatus::Changed, None);
        log.record("bar.service", UnitStatus::AlreadyOk, None);
        log.record("baz.service", UnitStatus::Failed, Some("permission denied"));

        let outcomes = log.outcomes();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[2].message.as_deref(), Some("permission denied"));
        assert_eq!(log.count(UnitStatus::Changed), 1);
        assert!(log.has_failures());
    }

    #[test]
    fn print_summary_without_subscriber_does_not_panic() {
        let log = Logger::new();
        log.print_summary();
        log.record("x.service", UnitStatus::DryRun, Some("would place"));
        log.print_summary();
    }
}

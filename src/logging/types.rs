//! Per-unit result entries collected for the run summary.

/// Outcome of one unit operation for summary reporting.
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    /// Resource description (e.g. `"mask foo.service"`).
    pub name: String,
    /// Final status.
    pub status: UnitStatus,
    /// Optional detail message (e.g., current state or error description).
    pub message: Option<String>,
}

/// Status of a processed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStatus {
    /// Written or masked.
    Changed,
    /// Already in the desired state.
    AlreadyOk,
    /// Not touched (e.g. a directory occupies the destination).
    Skipped,
    /// Would have been changed; dry run.
    DryRun,
    /// The operation failed.
    Failed,
}

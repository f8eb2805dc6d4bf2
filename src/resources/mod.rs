//! Idempotent resource primitives (check + apply pattern) over the unit
//! operations in [`crate::units`].
pub mod masked_unit;
pub mod unit_file;

use anyhow::Result;

pub use masked_unit::MaskedUnitResource;
pub use unit_file::UnitFileResource;

/// Minimal interface for resources that can be described, applied, and removed.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, or invalid paths.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// Default implementation returns an error; override in resources
    /// that support removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be removed, or if removal is not supported
    /// for this resource type.
    fn remove(&self) -> Result<ResourceChange> {
        anyhow::bail!(
            "operation 'remove' is not supported for resource '{}'",
            self.description()
        )
    }
}

/// State of a resource on disk.
///
/// # Examples
///
/// ```
/// use unit_provision::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "mode 600".into() };
/// let skip = ResourceState::Invalid { reason: "destination is a directory".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the destination.
    Missing,
    /// Destination exists and matches the desired state.
    Correct,
    /// Destination exists but does not match the desired state.
    Incorrect {
        /// What is there now.
        current: String,
    },
    /// Resource cannot be applied (e.g., a directory occupies the destination).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
    /// Resource was skipped.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

/// Resources that can inspect their own state before applying.
///
/// ```
/// use unit_provision::resources::{Applicable as _, Resource as _, ResourceState, UnitFileResource};
/// use unit_provision::units::Unit;
///
/// let root = tempfile::tempdir()?;
/// let unit = Unit::new("media-state.mount", "[Mount]\nWhat=/dev/sdb1\n");
/// let resource = UnitFileResource::new(unit, root.path());
///
/// assert_eq!(resource.current_state()?, ResourceState::Missing);
/// if resource.needs_change()? {
///     resource.apply()?;
/// }
/// assert_eq!(resource.current_state()?, ResourceState::Correct);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource state cannot be determined due to I/O failures
    /// or permission issues.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the current state cannot be determined (propagates errors from
    /// `current_state()`).
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

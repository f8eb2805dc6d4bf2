//! Single-resource processing: check state, then apply or remove.
use anyhow::Result;

use crate::logging::{Logger, UnitStatus};
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Bring one resource to its desired state, recording the outcome.
///
/// Correct resources are left alone, invalid ones are skipped, missing or
/// incorrect ones are applied (or only reported when `dry_run`).  The first
/// apply error is recorded as failed and returned.
///
/// # Errors
///
/// Returns an error if the state check or the apply fails.
pub fn apply_one<R: Resource>(resource: &R, dry_run: bool, log: &Logger) -> Result<UnitStatus> {
    let desc = resource.description();
    let state = match resource.current_state() {
        Ok(state) => state,
        Err(e) => {
            log.record(&desc, UnitStatus::Failed, Some(&e.to_string()));
            return Err(e);
        }
    };
    log.debug(&format!("{desc}: state={state:?}"));

    let status = match &state {
        ResourceState::Correct => UnitStatus::AlreadyOk,
        ResourceState::Invalid { reason } => {
            log.warn(&format!("skipping {desc}: {reason}"));
            log.record(&desc, UnitStatus::Skipped, Some(reason));
            return Ok(UnitStatus::Skipped);
        }
        ResourceState::Missing if dry_run => {
            log.dry_run(&format!("would apply {desc}"));
            UnitStatus::DryRun
        }
        ResourceState::Incorrect { current } if dry_run => {
            log.dry_run(&format!("would apply {desc} (currently {current})"));
            UnitStatus::DryRun
        }
        ResourceState::Missing | ResourceState::Incorrect { .. } => match resource.apply() {
            Ok(ResourceChange::Applied) => UnitStatus::Changed,
            Ok(ResourceChange::AlreadyCorrect) => UnitStatus::AlreadyOk,
            Ok(ResourceChange::Skipped { reason }) => {
                log.record(&desc, UnitStatus::Skipped, Some(&reason));
                return Ok(UnitStatus::Skipped);
            }
            Err(e) => {
                log.record(&desc, UnitStatus::Failed, Some(&e.to_string()));
                return Err(e);
            }
        },
    };

    log.record(&desc, status, None);
    Ok(status)
}

/// Undo one resource, recording the outcome.
///
/// # Errors
///
/// Returns an error if the resource cannot be removed.
pub fn remove_one<R: Resource>(resource: &R, dry_run: bool, log: &Logger) -> Result<UnitStatus> {
    let desc = resource.description();
    if dry_run {
        let status = if resource.current_state()? == ResourceState::Correct {
            log.dry_run(&format!("would undo {desc}"));
            UnitStatus::DryRun
        } else {
            UnitStatus::AlreadyOk
        };
        log.record(&desc, status, None);
        return Ok(status);
    }

    let status = match resource.remove() {
        Ok(ResourceChange::Applied) => UnitStatus::Changed,
        Ok(ResourceChange::AlreadyCorrect) => UnitStatus::AlreadyOk,
        Ok(ResourceChange::Skipped { reason }) => {
            log.record(&desc, UnitStatus::Skipped, Some(&reason));
            return Ok(UnitStatus::Skipped);
        }
        Err(e) => {
            log.record(&desc, UnitStatus::Failed, Some(&e.to_string()));
            return Err(e);
        }
    };
    log.record(&desc, status, None);
    Ok(status)
}

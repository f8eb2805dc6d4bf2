//! systemd unit placement and masking.
//!
//! Writes unit files and drop-in fragments into the directories systemd
//! reads them from, and masks units by linking them to `/dev/null`, all
//! relative to a caller-chosen root so an image or chroot can be prepared
//! from outside.
//!
//! The public API is organised into layers:
//!
//! - **[`units`]**: path resolution and the filesystem primitives
//!   (place, mask, unmask, machine ID)
//! - **[`resources`]**: idempotent `check + apply` wrappers around those primitives
//! - **[`config`]**: the TOML unit manifest and its validation
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod units;

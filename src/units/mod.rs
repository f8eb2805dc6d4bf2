//! Unit placement and masking.
//!
//! A [`Unit`] is an in-memory description of a systemd unit: its file name,
//! whether it is runtime-scoped or persistent, whether it is a drop-in
//! fragment, and its verbatim content.  The operations in this module turn
//! that description into files under a target root:
//!
//! - [`unit_destination`]: pure path resolution, never fails
//! - [`place_unit`]: write the content with mode `0644`
//! - [`mask_unit`] / [`unmask_unit`]: replace a unit with a `/dev/null` link
//! - [`machine_id`]: read `<root>/etc/machine-id`
mod fs;
mod machine_id;
mod mask;
mod path;
mod place;

pub use machine_id::machine_id;
pub use mask::{is_masked, mask_unit, unmask_unit};
pub use path::unit_destination;
pub use place::place_unit;

use std::path::{Component, Path, PathBuf};

/// File name used for every drop-in fragment, inside `<unit>.d/`.
pub const DROP_IN_FILENAME: &str = "20-cloudinit.conf";

/// Target of a mask symlink.
pub const NULL_DEVICE: &str = "/dev/null";

/// Mode of written unit files.
pub const UNIT_FILE_MODE: u32 = 0o644;

/// Mode of directories created on the way to a unit file.
pub const UNIT_DIR_MODE: u32 = 0o755;

/// Runtime subdirectory of `run/systemd/` for units that are not listed in
/// [`TYPE_DIRS`].
const DEFAULT_TYPE_DIR: &str = "system";

/// Unit type suffix to runtime subdirectory of `run/systemd/`.
const TYPE_DIRS: &[(&str, &str)] = &[
    ("network", "network"),
    ("netdev", "network"),
    ("link", "network"),
];

/// Suffixes systemd and systemd-networkd understand.
const KNOWN_TYPES: &[&str] = &[
    "service",
    "socket",
    "device",
    "mount",
    "automount",
    "swap",
    "target",
    "path",
    "timer",
    "slice",
    "scope",
    "network",
    "netdev",
    "link",
];

/// Whether `name` resolves to an entry strictly inside the unit directory.
///
/// Empty names, a bare `/` and names containing `.` or `..` components are
/// rejected: they would resolve to the unit directory itself or outside it.
///
/// ```
/// use unit_provision::units::is_valid_name;
///
/// assert!(is_valid_name("foo.service"));
/// assert!(!is_valid_name(""));
/// assert!(!is_valid_name("/"));
/// assert!(!is_valid_name("../passwd"));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let rel = Path::new(name.trim_start_matches('/'));
    rel.components().next().is_some()
        && rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// A systemd unit to place on disk.
///
/// # Examples
///
/// ```
/// use unit_provision::units::Unit;
///
/// let unit = Unit::new("50-eth0.network", "[Match]\nName=eth0\n").runtime(true);
/// assert_eq!(unit.unit_type(), "network");
/// assert_eq!(unit.type_dir(), "network");
/// assert!(unit.is_known_type());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unit {
    /// File name including the type suffix (e.g. `"media-state.mount"`).
    pub name: String,
    /// Place under `run/` (lost on reboot) instead of `etc/`.
    pub runtime: bool,
    /// Content is an override fragment for `name`, not the unit itself.
    pub drop_in: bool,
    /// Written byte-for-byte.
    pub content: String,
}

impl Unit {
    /// Create a persistent, non-drop-in unit.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the runtime flag.
    #[must_use]
    pub fn runtime(mut self, runtime: bool) -> Self {
        self.runtime = runtime;
        self
    }

    /// Set the drop-in flag.
    #[must_use]
    pub fn drop_in(mut self, drop_in: bool) -> Self {
        self.drop_in = drop_in;
        self
    }

    /// Suffix after the last `.` in the name, or `""` when there is none.
    #[must_use]
    pub fn unit_type(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or("", |(_, suffix)| suffix)
    }

    /// Subdirectory of `run/systemd/` a runtime unit of this type lives in.
    ///
    /// Unknown and missing suffixes fall back to `"system"`.
    #[must_use]
    pub fn type_dir(&self) -> &'static str {
        let unit_type = self.unit_type();
        TYPE_DIRS
            .iter()
            .find(|(suffix, _)| *suffix == unit_type)
            .map_or(DEFAULT_TYPE_DIR, |&(_, dir)| dir)
    }

    /// Whether the suffix names a unit type systemd understands.
    #[must_use]
    pub fn is_known_type(&self) -> bool {
        KNOWN_TYPES.contains(&self.unit_type())
    }

    /// Shorthand for [`unit_destination`].
    #[must_use]
    pub fn destination(&self, root: &Path) -> PathBuf {
        unit_destination(self, root)
    }
}

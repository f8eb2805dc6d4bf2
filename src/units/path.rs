//! Destination path resolution.
use std::path::{Path, PathBuf};

use super::{DROP_IN_FILENAME, Unit};

/// Resolve where `unit` lives under `root`.
///
/// | unit                 | destination                                      |
/// |----------------------|--------------------------------------------------|
/// | persistent           | `root/etc/systemd/system/<name>`                 |
/// | persistent drop-in   | `root/etc/systemd/system/<name>.d/20-cloudinit.conf` |
/// | runtime              | `root/run/systemd/<type dir>/<name>`             |
/// | runtime drop-in      | `root/run/systemd/<type dir>/<name>.d/20-cloudinit.conf` |
///
/// Pure path composition: the filesystem is never touched and odd names
/// never fail.  A leading `/` in the name is dropped so the result always
/// stays under `root`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unit_provision::units::{Unit, unit_destination};
///
/// let unit = Unit::new("foobar.service", "");
/// assert_eq!(
///     unit_destination(&unit, Path::new("/some/dir")),
///     Path::new("/some/dir/etc/systemd/system/foobar.service"),
/// );
/// ```
#[must_use]
pub fn unit_destination(unit: &Unit, root: &Path) -> PathBuf {
    let base = if unit.runtime {
        root.join("run").join("systemd").join(unit.type_dir())
    } else {
        root.join("etc").join("systemd").join("system")
    };

    let name = unit.name.trim_start_matches('/');
    if unit.drop_in {
        base.join(format!("{name}.d")).join(DROP_IN_FILENAME)
    } else {
        base.join(name)
    }
}

//! Build script: embeds the version string as `UNIT_PROVISION_VERSION`.
use std::process::Command;

fn main() {
    // UNIT_PROVISION_VERSION wins (release builds); otherwise ask git.
    if let Ok(version) = std::env::var("UNIT_PROVISION_VERSION") {
        println!("cargo:rustc-env=UNIT_PROVISION_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=UNIT_PROVISION_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=UNIT_PROVISION_VERSION");
}

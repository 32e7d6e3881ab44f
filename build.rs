//! Build script for GPXIFY
//! Embeds build information shown at startup

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Generate build information
    let git_commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|commit| commit.trim().to_string())
        .filter(|commit| !commit.is_empty());

    if let Some(commit) = git_commit {
        println!("cargo:rustc-env=GIT_COMMIT={commit}");
    }

    if let Ok(elapsed) = SystemTime::now().duration_since(UNIX_EPOCH) {
        println!("cargo:rustc-env=BUILD_TIME={}", elapsed.as_secs());
    }
}

use std::process::Command;

/// Version string for `taskboard --version`: an explicit
/// `TASKBOARD_BUILD_VERSION`, else `git describe`, else the crate version.
fn main() {
    println!("cargo:rerun-if-env-changed=TASKBOARD_BUILD_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = std::env::var("TASKBOARD_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").into());

    println!("cargo:rustc-env=GIT_VERSION={version}");
}

fn git_describe() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
    Some(s.strip_prefix('v').unwrap_or(&s).to_string())
}

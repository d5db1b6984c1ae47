use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=BOOTLIGHT_VERSION");

    let version = match std::env::var("BOOTLIGHT_VERSION") {
        Ok(v) => v,
        Err(_) => {
            let version = "$Format:%(describe)$"; // Replaced by git-archive.
            let version = if version.starts_with('$') {
                match Command::new("git").args(["describe", "--tags"]).output() {
                    Ok(o) if o.status.success() => {
                        String::from_utf8_lossy(&o.stdout).trim().to_string()
                    }
                    // Not a tagged checkout, fall back to the manifest version.
                    _ => env!("CARGO_PKG_VERSION").to_string(),
                }
            } else {
                version.to_string()
            };

            version.strip_prefix('v').unwrap_or(&version).to_string()
        }
    };

    println!("cargo:rustc-env=BOOTLIGHT_VERSION={version}");
}

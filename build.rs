//! Build script for execdb
//!
//! Embeds the build timestamp for `--version` output.

fn main() {
    // Only rerun when src/ files change (not on every cargo build)
    println!("cargo:rerun-if-changed=src");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=EXECDB_BUILD_TIMESTAMP={}", timestamp);
}

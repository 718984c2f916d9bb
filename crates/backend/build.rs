//! Copies the workspace `config.toml` next to the built binary, where
//! `shared::config::load_config` looks for it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    let Some(target) = profile_dir().map(|dir| dir.join("config.toml")) else {
        println!("cargo:warning=cannot locate the target profile directory");
        return;
    };

    if !source.exists() {
        return;
    }
    if let Err(e) = fs::copy(&source, &target) {
        println!("cargo:warning=failed to copy config.toml: {}", e);
    }
}

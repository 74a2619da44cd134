use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Копирует config.toml из корня workspace рядом с бинарником (target/<profile>)
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let Some(target_dir) = target_profile_dir() else {
        println!("cargo:warning=Could not find target profile directory, config.toml not copied");
        return;
    };

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(workspace_root) = manifest_dir.parent().and_then(Path::parent) else {
        println!("cargo:warning=Could not find workspace root, config.toml not copied");
        return;
    };

    let source_config = workspace_root.join("config.toml");
    if !source_config.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, using embedded default config",
            source_config
        );
        return;
    }

    let dest_config = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        panic!("Failed to copy config.toml to {:?}: {}", dest_config, e);
    }
}

// OUT_DIR: target/<profile>/build/backend-xxx/out
fn target_profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

use std::path::{Path, PathBuf};

/// The tool directory: `--root` / `WL_ROOT` when given, else the current
/// directory. Templates, `result/` and the sibling `../src` checkout are
/// all resolved against it.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

use briefing_core::paths::DATA_DIR;
use std::path::{Path, PathBuf};

/// Resolve the data directory.
///
/// Priority:
/// 1. `--root` flag / `BRIEFING_ROOT` env var (passed in as `explicit`)
/// 2. `~/.briefing`
/// 3. `./.briefing` when no home directory is known
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    if let Some(home) = home::home_dir() {
        return home.join(DATA_DIR);
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DATA_DIR)
}

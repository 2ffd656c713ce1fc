use crate::error::{BriefingError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DATA_DIR: &str = ".briefing";
pub const STORAGE_DIR: &str = "storage";
pub const CONFIG_FILE: &str = "config.yaml";

/// Storage key holding the JSON array of briefing records.
pub const PROJECTS_KEY: &str = "artifex_projects";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn storage_dir(root: &Path) -> PathBuf {
    root.join(STORAGE_DIR)
}

pub fn storage_entry(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

// ---------------------------------------------------------------------------
// Storage key validation
// ---------------------------------------------------------------------------

static KEY_RE: OnceLock<Regex> = OnceLock::new();

fn key_re() -> &'static Regex {
    KEY_RE.get_or_init(|| Regex::new(r"^[a-z0-9_][a-z0-9_\-]*$").unwrap())
}

/// Storage keys become file names, so they are restricted to a safe charset.
pub fn validate_storage_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > 64 || !key_re().is_match(key) {
        return Err(BriefingError::InvalidStorageKey(key.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

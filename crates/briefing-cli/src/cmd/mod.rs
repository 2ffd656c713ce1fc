pub mod config;
pub mod project;
pub mod wizard;

use anyhow::Context;
use briefing_core::{
    config::Config,
    paths,
    share::{self, ShareTarget},
    storage::FileStorage,
    store::RecordStore,
    BriefingError,
};
use std::path::Path;

pub type Store = RecordStore<FileStorage>;

pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).with_context(|| {
        format!(
            "failed to load config from {}",
            paths::config_path(root).display()
        )
    })
}

/// Open the record store described by the config under `root`.
pub fn open_store(root: &Path, config: &Config) -> anyhow::Result<Store> {
    let key = &config.storage.collection_key;
    paths::validate_storage_key(key).context("invalid storage.collection_key in config")?;
    Ok(RecordStore::with_key(FileStorage::under_root(root), key.clone()))
}

/// Share target that turns the payload into a link and optionally opens it
/// with the system handler.
pub struct LinkShare {
    base_url: String,
    open: bool,
    pub last_url: Option<String>,
}

impl LinkShare {
    pub fn new(config: &Config, open: bool) -> Self {
        Self {
            base_url: config.share.base_url.clone(),
            open,
            last_url: None,
        }
    }
}

impl ShareTarget for LinkShare {
    fn share(&mut self, payload: &str) -> briefing_core::Result<()> {
        let url = share::share_url(&self.base_url, payload);
        self.last_url = Some(url.clone());
        if self.open {
            open::that(&url).map_err(|e| BriefingError::Share(e.to_string()))?;
        }
        Ok(())
    }
}

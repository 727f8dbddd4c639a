use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::season::SeasonPlayerRecord;
use crate::tots::SeasonRoster;

const STORE_DIR: &str = "cricore";
const STORE_FILE: &str = "season_store.json";
const STORE_VERSION: u32 = 1;

/// The whole persisted state: per-season player maps plus the derived
/// roster. Read in full, written in full; there are no partial updates,
/// so a failed cycle leaves the previous file intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: u32,
    pub seasons: HashMap<String, SeasonData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonData {
    #[serde(default)]
    pub players: HashMap<String, SeasonPlayerRecord>,
    #[serde(default)]
    pub roster: Option<SeasonRoster>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            seasons: HashMap::new(),
        }
    }
}

impl StoreFile {
    pub fn season(&self, season: &str) -> Option<&SeasonData> {
        self.seasons.get(season)
    }

    pub fn season_mut(&mut self, season: &str) -> &mut SeasonData {
        self.seasons.entry(season.to_string()).or_default()
    }
}

/// Loads the store from disk. A missing file is an empty store; a store
/// written by a different schema version is ignored rather than migrated.
/// Read failures on an existing file propagate to the caller.
pub fn load_store(path: &Path) -> Result<StoreFile> {
    if !path.exists() {
        return Ok(StoreFile::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read season store {}", path.display()))?;
    let store: StoreFile = serde_json::from_str(&raw)
        .with_context(|| format!("parse season store {}", path.display()))?;
    if store.version != STORE_VERSION {
        return Ok(StoreFile::default());
    }
    Ok(store)
}

pub fn save_store(path: &Path, store: &StoreFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let json = serde_json::to_string(store).context("serialize season store")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write season store {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap season store {}", path.display()))?;
    Ok(())
}

/// Store location: explicit env override, then XDG cache, then ~/.cache.
pub fn default_store_path() -> Option<PathBuf> {
    if let Ok(raw) = env::var("CRICORE_STORE_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    if let Ok(base) = env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(STORE_DIR).join(STORE_FILE));
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(STORE_DIR)
            .join(STORE_FILE),
    )
}

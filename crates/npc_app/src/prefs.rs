use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use npc_core::{
    Persona, PersonaCatalog, RosterConfig, TargetingConfig, DEFAULT_HISTORY_LIMIT,
};

use crate::error::PrefsError;

const APP_DIR: &str = "npc-workbench";
const PREFS_FILE: &str = "prefs.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppPrefs {
    pub history_limit: usize,
    pub roster: RosterConfig,
    pub targeting: TargetingConfig,
    pub personas: PersonaCatalog,
}

impl Default for AppPrefs {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            roster: RosterConfig {
                max_npcs: Some(16),
                variant_count: 4,
            },
            targeting: TargetingConfig::default(),
            personas: PersonaCatalog::new(vec![
                Persona::new("guide", "Guide"),
                Persona::new("merchant", "Merchant"),
                Persona::new("guard", "Guard"),
            ]),
        }
    }
}

pub fn prefs_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join(APP_DIR).join(PREFS_FILE));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(PREFS_FILE))
}

/// Loads prefs from the default location. A missing file yields defaults.
pub fn load_prefs() -> Result<AppPrefs, PrefsError> {
    let Some(path) = prefs_path() else {
        return Ok(AppPrefs::default());
    };
    load_prefs_from(&path)
}

pub fn save_prefs(prefs: &AppPrefs) -> Result<PathBuf, PrefsError> {
    let path = prefs_path().ok_or(PrefsError::NoConfigDir)?;
    save_prefs_to(prefs, &path)?;
    Ok(path)
}

pub fn load_prefs_from(path: &Path) -> Result<AppPrefs, PrefsError> {
    if !path.exists() {
        return Ok(AppPrefs::default());
    }
    let content = std::fs::read_to_string(path).map_err(|source| PrefsError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;
    parse_prefs(&content)
}

pub fn save_prefs_to(prefs: &AppPrefs, path: &Path) -> Result<(), PrefsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PrefsError::Io {
            action: "create",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, serialize_prefs(prefs)?).map_err(|source| PrefsError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}

pub fn serialize_prefs(prefs: &AppPrefs) -> Result<String, PrefsError> {
    Ok(serde_json::to_string_pretty(prefs)?)
}

pub fn parse_prefs(content: &str) -> Result<AppPrefs, PrefsError> {
    Ok(serde_json::from_str(content)?)
}

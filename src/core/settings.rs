use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::CompileOptions;

/* ============================ Persisted state ============================== */

/// The snapshot written on every observable state change and read once at
/// startup: the selected root, every checked path (loaded or not), and the
/// scalar compile settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub root_directory: Option<PathBuf>,
    #[serde(default)]
    pub checked_paths: Vec<PathBuf>,
    #[serde(default = "default_standard")]
    pub cpp_standard: String,
    #[serde(default)]
    pub options: CompileOptions,
    #[serde(default = "default_output_name")]
    pub output_file_name: String,
}

fn default_standard() -> String {
    "c++17".to_string()
}

fn default_output_name() -> String {
    "a.out".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_directory: None,
            checked_paths: Vec::new(),
            cpp_standard: default_standard(),
            options: CompileOptions::default(),
            output_file_name: default_output_name(),
        }
    }
}

/// `~/.nopaste/settings.json`, falling back to the working directory when
/// no home directory is known.
#[must_use]
pub fn default_settings_path() -> PathBuf {
    dirs::home_dir().map_or_else(
        || PathBuf::from("settings.json"),
        |home| home.join(".nopaste").join("settings.json"),
    )
}

/// Load a settings snapshot. Missing or malformed files are "no saved
/// state", never an error for the caller.
#[must_use]
pub fn load_settings(path: &Path) -> Option<Settings> {
    let data = fs::read(path).ok()?;
    match serde_json::from_slice::<Settings>(&data) {
        Ok(settings) => Some(settings),
        Err(err) => {
            log::warn!("ignoring malformed settings at {}: {err}", path.display());
            None
        }
    }
}

/// Persist a settings snapshot atomically (write a sibling tmp file, then
/// rename over the target).
pub fn save_settings(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");

    let data =
        serde_json::to_vec_pretty(settings).map_err(|e| io::Error::other(e.to_string()))?;

    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

//! Persisted configuration: the list of directories to scan for game
//! records. Stored as JSON next to the working directory (or wherever
//! `SGFDB_CONFIG` points), so a catalog setup can be checked in or
//! swapped per project.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sgfdb.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scan roots, stored normalized (absolute, forward slashes).
    #[serde(default)]
    pub sgf_directories: Vec<String>,
}

/// Where the config lives. `SGFDB_CONFIG` overrides the default, which
/// tests rely on to get an isolated config per run.
pub fn config_path() -> PathBuf {
    env::var("SGFDB_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
}

impl Config {
    /// Load the config file; a missing file is an empty config, not an
    /// error, so a fresh checkout works without any setup step.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(AppError::ConfigIo {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|e| AppError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(self).map_err(|e| AppError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, raw).map_err(|e| AppError::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Add a scan root. The path is normalized before comparison so
    /// `./games` and `games/` refer to the same entry, and overlapping
    /// roots are rejected in both directions: a nested pair would index
    /// the same files twice.
    pub fn add_directory(&mut self, path: &str) -> Result<String, AppError> {
        let dir = normalize_path(path);
        if !Path::new(&dir).is_dir() {
            return Err(AppError::DirectoryMissing(dir));
        }
        if self.sgf_directories.contains(&dir) {
            return Err(AppError::DirectoryListed(dir));
        }
        if let Some(parent) = self
            .sgf_directories
            .iter()
            .find(|listed| is_subdirectory(&dir, listed))
        {
            return Err(AppError::DirectoryNested {
                parent: parent.clone(),
                dir,
            });
        }
        let children: Vec<String> = self
            .sgf_directories
            .iter()
            .filter(|listed| is_subdirectory(listed, &dir))
            .cloned()
            .collect();
        if !children.is_empty() {
            return Err(AppError::DirectoryContains { dir, children });
        }
        self.sgf_directories.push(dir.clone());
        Ok(dir)
    }

    /// Remove a scan root previously added with [`Config::add_directory`].
    pub fn remove_directory(&mut self, path: &str) -> Result<String, AppError> {
        let dir = normalize_path(path);
        let before = self.sgf_directories.len();
        self.sgf_directories.retain(|listed| *listed != dir);
        if self.sgf_directories.len() == before {
            return Err(AppError::DirectoryNotListed(dir));
        }
        Ok(dir)
    }
}

/// Normalize to an absolute path with forward slashes and no `.`/`..`
/// components. Resolution is lexical; symlinks are not followed.
pub fn normalize_path(path: &str) -> String {
    let path = Path::new(path);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().unwrap_or_default().join(path)
    };

    let mut prefix = String::new();
    let mut parts: Vec<String> = Vec::new();
    for component in joined.components() {
        match component {
            Component::Prefix(p) => {
                prefix = p.as_os_str().to_string_lossy().replace('\\', "/");
            }
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
        }
    }
    format!("{}/{}", prefix, parts.join("/"))
}

/// True when `child` is strictly inside `parent`. Both arguments must
/// already be normalized.
pub fn is_subdirectory(child: &str, parent: &str) -> bool {
    let prefix = if parent.ends_with('/') {
        parent.to_string()
    } else {
        format!("{parent}/")
    };
    child.len() > parent.len() && child.starts_with(&prefix)
}

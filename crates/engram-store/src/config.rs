//! Store configuration – reads/writes `engram.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which persistence backend the store runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Transactional SQLite storage; the safe default.
    #[default]
    Durable,
    /// Whole-file JSON document; single-process, low-volume use only.
    Ephemeral,
}

impl std::fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendChoice::Durable => write!(f, "durable"),
            BackendChoice::Ephemeral => write!(f, "ephemeral"),
        }
    }
}

/// Persisted store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend selected at store construction time.
    #[serde(default)]
    pub backend: BackendChoice,

    /// Where the backend keeps its data (SQLite file or JSON document).
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Bounded wait, in milliseconds, for the durable backend's file lock
    /// before a write fails with `StorageError::Locked`.
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from("engram.db")
}
fn default_lock_wait_ms() -> u64 {
    5_000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendChoice::default(),
            path: default_path(),
            lock_wait_ms: default_lock_wait_ms(),
        }
    }
}

impl StoreConfig {
    /// A config pointing the given backend at `path`, with defaults
    /// elsewhere.
    pub fn at(backend: BackendChoice, path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Load the config from a TOML file.  Returns `None` if the file does not
/// exist.  `ENGRAM_*` environment overrides are applied on top.
pub fn load_from(path: &Path) -> Result<Option<StoreConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let mut cfg: StoreConfig =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

/// Apply `ENGRAM_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `ENGRAM_BACKEND` | `backend` (`durable` / `ephemeral`) |
/// | `ENGRAM_PATH` | `path` |
/// | `ENGRAM_LOCK_WAIT_MS` | `lock_wait_ms` |
pub fn apply_env_overrides(cfg: &mut StoreConfig) {
    if let Ok(v) = std::env::var("ENGRAM_BACKEND") {
        match v.to_ascii_lowercase().as_str() {
            "durable" => cfg.backend = BackendChoice::Durable,
            "ephemeral" => cfg.backend = BackendChoice::Ephemeral,
            _ => {}
        }
    }
    if let Ok(v) = std::env::var("ENGRAM_PATH") {
        cfg.path = PathBuf::from(v);
    }
    if let Ok(v) = std::env::var("ENGRAM_LOCK_WAIT_MS")
        && let Ok(ms) = v.parse::<u64>()
    {
        cfg.lock_wait_ms = ms;
    }
}

/// Save the config as TOML at `path`, creating parent directories if needed.
pub fn save_to(cfg: &StoreConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let raw =
        toml::to_string_pretty(cfg).map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("engram.toml");

        let cfg = StoreConfig::default();
        save_to(&cfg, &path).expect("save");

        let loaded = load_from(&path).expect("load ok").expect("some");
        assert_eq!(loaded.backend, BackendChoice::Durable);
        assert_eq!(loaded.path, PathBuf::from("engram.db"));
        assert_eq!(loaded.lock_wait_ms, 5_000);
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let result = load_from(&dir.path().join("absent.toml")).expect("no error");
        assert!(result.is_none());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("engram.toml");
        fs::write(&path, "backend = \"ephemeral\"\n").unwrap();
        let loaded = load_from(&path).expect("load ok").expect("some");
        assert_eq!(loaded.backend, BackendChoice::Ephemeral);
        assert_eq!(loaded.lock_wait_ms, 5_000);
    }

    #[test]
    fn apply_env_overrides_changes_backend() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("ENGRAM_BACKEND", "ephemeral") };
        let mut cfg = StoreConfig::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.backend, BackendChoice::Ephemeral);
        unsafe { std::env::remove_var("ENGRAM_BACKEND") };
    }

    #[test]
    fn apply_env_overrides_ignores_invalid_lock_wait() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("ENGRAM_LOCK_WAIT_MS", "not-a-number") };
        let mut cfg = StoreConfig::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.lock_wait_ms, 5_000);
        unsafe { std::env::remove_var("ENGRAM_LOCK_WAIT_MS") };
    }
}

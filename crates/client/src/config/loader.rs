//! Configuration loader
//!
//! Loads workspace configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `REACHKIT_API_BASE_URL` is set, configuration comes from the
//!    environment; the remaining variables are optional and default.
//! 2. Otherwise, probes standard locations for a config file.
//! 3. If neither source exists, built-in defaults apply.
//!
//! ## Environment Variables
//! - `REACHKIT_API_BASE_URL`: API base URL (activates env loading)
//! - `REACHKIT_HTTP_TIMEOUT_SECS`: per-request timeout in seconds
//! - `REACHKIT_HTTP_MAX_ATTEMPTS`: total attempts per request (1 = no retry)
//! - `REACHKIT_CACHE_RETENTION_SECS`: cache retention window in seconds
//!
//! ## File Locations
//! The loader probes (in order): `./config.{json,toml}`,
//! `./reachkit.{json,toml}`, the same names up to two parent directories,
//! then the same names relative to the executable.

use std::path::{Path, PathBuf};

use reachkit_domain::{ApiConfig, CacheSettings, Config, ReachKitError, Result};

const ENV_BASE_URL: &str = "REACHKIT_API_BASE_URL";
const ENV_TIMEOUT: &str = "REACHKIT_HTTP_TIMEOUT_SECS";
const ENV_MAX_ATTEMPTS: &str = "REACHKIT_HTTP_MAX_ATTEMPTS";
const ENV_RETENTION: &str = "REACHKIT_CACHE_RETENTION_SECS";

/// Load configuration with automatic fallback strategy.
///
/// # Errors
/// Returns `ReachKitError::Config` if an activated source (environment or a
/// found file) is present but invalid. A missing source is not an error;
/// defaults apply.
pub fn load() -> Result<Config> {
    if std::env::var(ENV_BASE_URL).is_ok() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    if let Some(path) = probe_config_paths() {
        return load_from_file(Some(path));
    }

    tracing::info!("No configuration source found, using defaults");
    Ok(Config::default())
}

/// Load configuration from environment variables.
///
/// `REACHKIT_API_BASE_URL` is required; the remaining variables fall back to
/// their defaults when unset.
///
/// # Errors
/// Returns `ReachKitError::Config` if the base URL is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let base_url = std::env::var(ENV_BASE_URL).map_err(|_| {
        ReachKitError::Config(format!("Missing required environment variable: {ENV_BASE_URL}"))
    })?;

    let defaults = ApiConfig::default();
    let timeout_seconds = env_u64(ENV_TIMEOUT)?.unwrap_or(defaults.timeout_seconds);
    let max_attempts = env_u64(ENV_MAX_ATTEMPTS)?.unwrap_or(defaults.max_attempts as u64) as usize;
    let retention_seconds =
        env_u64(ENV_RETENTION)?.unwrap_or(CacheSettings::default().retention_seconds);

    Ok(Config {
        api: ApiConfig { base_url, timeout_seconds, max_attempts },
        cache: CacheSettings { retention_seconds },
    })
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ReachKitError::Config` if the file is missing, no candidate is
/// found, or the contents do not parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ReachKitError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ReachKitError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ReachKitError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ReachKitError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ReachKitError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ReachKitError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            candidates.extend(file_candidates(&dir));
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(file_candidates(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn file_candidates(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("reachkit.json"),
        dir.join("reachkit.toml"),
    ]
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ReachKitError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        for key in [ENV_BASE_URL, ENV_TIMEOUT, ENV_MAX_ATTEMPTS, ENV_RETENTION] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn env_loading_requires_only_the_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_BASE_URL, "https://api.example.com/api");
        let config = load_from_env().expect("config from env");

        assert_eq!(config.api.base_url, "https://api.example.com/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.api.max_attempts, 1);
        assert_eq!(config.cache.retention_seconds, 300);

        clear_env();
    }

    #[test]
    fn env_overrides_apply() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_BASE_URL, "https://api.example.com/api");
        std::env::set_var(ENV_TIMEOUT, "10");
        std::env::set_var(ENV_MAX_ATTEMPTS, "3");
        std::env::set_var(ENV_RETENTION, "60");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.api.max_attempts, 3);
        assert_eq!(config.cache.retention_seconds, 60);

        clear_env();
    }

    #[test]
    fn invalid_numeric_env_value_is_an_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_BASE_URL, "https://api.example.com/api");
        std::env::set_var(ENV_TIMEOUT, "not-a-number");

        let result = load_from_env();
        assert!(matches!(result, Err(ReachKitError::Config(_))));

        clear_env();
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let result = load_from_env();
        assert!(matches!(result, Err(ReachKitError::Config(_))));
    }

    #[test]
    fn loads_json_config_file() {
        let mut file =
            tempfile::Builder::new().suffix(".json").tempfile().expect("temp file");
        write!(
            file,
            r#"{{"api": {{"base_url": "https://json.example.com/api", "max_attempts": 2}}}}"#
        )
        .expect("write config");

        let config = load_from_file(Some(file.path().to_path_buf())).expect("config from file");
        assert_eq!(config.api.base_url, "https://json.example.com/api");
        assert_eq!(config.api.max_attempts, 2);
        // unspecified sections default
        assert_eq!(config.cache.retention_seconds, 300);
    }

    #[test]
    fn loads_toml_config_file() {
        let mut file =
            tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
        write!(
            file,
            "[api]\nbase_url = \"https://toml.example.com/api\"\n\n[cache]\nretention_seconds = 120\n"
        )
        .expect("write config");

        let config = load_from_file(Some(file.path().to_path_buf())).expect("config from file");
        assert_eq!(config.api.base_url, "https://toml.example.com/api");
        assert_eq!(config.cache.retention_seconds, 120);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/reachkit.toml")));
        assert!(matches!(result, Err(ReachKitError::Config(_))));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "base_url: nope").expect("write config");
        let renamed = file.path().with_extension("yaml");
        std::fs::copy(file.path(), &renamed).expect("copy");

        let result = load_from_file(Some(renamed.clone()));
        std::fs::remove_file(&renamed).ok();
        assert!(matches!(result, Err(ReachKitError::Config(_))));
    }
}

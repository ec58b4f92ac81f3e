use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "TASKBOARD_CONFIG";
/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "TASKBOARD_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the effective config.
///
/// File: `explicit` path, else `$TASKBOARD_CONFIG`, else built-in defaults.
/// Base URL: `api_url_flag`, else `$TASKBOARD_API_URL`, else the file's value.
pub fn load_config(
    explicit: Option<&Path>,
    api_url_flag: Option<&str>,
) -> Result<AppConfig, ConfigError> {
    let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let env_url = std::env::var(API_URL_ENV).ok();
    resolve_config(explicit, env_path.as_deref(), api_url_flag, env_url.as_deref())
}

/// `load_config` with the environment passed in
pub fn resolve_config(
    explicit: Option<&Path>,
    env_path: Option<&Path>,
    api_url_flag: Option<&str>,
    env_url: Option<&str>,
) -> Result<AppConfig, ConfigError> {
    let mut config = match explicit.or(env_path) {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(url) = api_url_flag.or(env_url).filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::DEFAULT_BASE_URL;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r##"[api]
base_url = "http://tasks.internal:8080/"
timeout_secs = 3

[ui]
log_file = "/tmp/tb.log"

[ui.colors]
priority_high = "#FF0000"
"##
    }

    fn write_sample(tmp: &TempDir) -> PathBuf {
        let path = tmp.path().join("taskboard.toml");
        fs::write(&path, sample_config()).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None, None, None, None).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.ui.log_file.is_none());
    }

    #[test]
    fn test_read_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_sample(&tmp);
        let config = resolve_config(Some(&path), None, None, None).unwrap();
        assert_eq!(config.api.base_url, "http://tasks.internal:8080");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.ui.log_file, Some(PathBuf::from("/tmp/tb.log")));
        assert_eq!(
            config.ui.colors.get("priority_high").map(String::as_str),
            Some("#FF0000")
        );
    }

    #[test]
    fn test_env_path_used_when_no_flag() {
        let tmp = TempDir::new().unwrap();
        let path = write_sample(&tmp);
        let config = resolve_config(None, Some(&path), None, None).unwrap();
        assert_eq!(config.api.timeout_secs, 3);
    }

    #[test]
    fn test_url_precedence() {
        let tmp = TempDir::new().unwrap();
        let path = write_sample(&tmp);

        let from_env = resolve_config(Some(&path), None, None, Some("http://env:1")).unwrap();
        assert_eq!(from_env.api.base_url, "http://env:1");

        let from_flag = resolve_config(
            Some(&path),
            None,
            Some("http://flag:2/"),
            Some("http://env:1"),
        )
        .unwrap();
        assert_eq!(from_flag.api.base_url, "http://flag:2");

        let blank_env = resolve_config(Some(&path), None, None, Some("  ")).unwrap();
        assert_eq!(blank_env.api.base_url, "http://tasks.internal:8080");
    }

    #[test]
    fn test_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");
        let err = resolve_config(Some(&path), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();
        let err = resolve_config(Some(&path), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().starts_with("could not parse"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("partial.toml");
        fs::write(&path, "[ui]\n").unwrap();
        let config = resolve_config(Some(&path), None, None, None).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }
}

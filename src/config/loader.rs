//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse configuration without semantic checks.
///
/// Without a path every section takes its defaults.
pub fn read_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)
        }
        None => Ok(AppConfig::default()),
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = read_config(Some(path))?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_path_yields_defaults() {
        let config = read_config(None).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp(
            "facade-valid",
            "[upstream]\nbase_url = \"http://localhost:9000/api/v1\"\n",
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.upstream.base_url, "http://localhost:9000/api/v1");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_reports_parse_error() {
        let path = write_temp("facade-broken", "[upstream\nbase_url = 1");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let path = write_temp("facade-invalid", "[timeouts]\nrequest_secs = 0\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().starts_with("Validation failed: timeouts.request_secs"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_sample_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("facade.example.toml");
        let config = load_config(&path).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.listener.bind_address, defaults.listener.bind_address);
        assert_eq!(config.upstream.base_url, defaults.upstream.base_url);
        assert_eq!(config.timeouts.request_secs, defaults.timeouts.request_secs);
        assert_eq!(config.observability.log_format, defaults.observability.log_format);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

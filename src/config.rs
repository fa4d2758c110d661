// Configuration loading and parsing (pipeline.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// pipeline.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[paths]` table in pipeline.toml.
#[derive(Debug, Clone, Deserialize)]
struct PipelineFile {
    paths: PathsConfig,
}

/// Where the pipeline reads its input and writes its artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Source dataset (`.xlsx` or delimited text).
    pub source: String,
    /// Report workbook destination.
    pub report: String,
    /// Directory that receives the chart images.
    pub charts_dir: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub paths: PathsConfig,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/pipeline.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("pipeline.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let file: PipelineFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config { paths: file.paths };
    validate(&config)?;
    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let fields: &[(&str, &str)] = &[
        ("paths.source", &config.paths.source),
        ("paths.report", &config.paths.report),
        ("paths.charts_dir", &config.paths.charts_dir),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID_TOML: &str = r#"
[paths]
source = "ipl_data.xlsx"
report = "ipl_analysis_report.xlsx"
charts_dir = "charts"
"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn load_valid_config() {
        let tmp = scratch_dir("statsheet_config_valid");
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/pipeline.toml"), VALID_TOML).unwrap();

        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.paths.source, "ipl_data.xlsx");
        assert_eq!(config.paths.report, "ipl_analysis_report.xlsx");
        assert_eq!(config.paths.charts_dir, "charts");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_pipeline_toml() {
        let tmp = scratch_dir("statsheet_config_missing");
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("pipeline.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch_dir("statsheet_config_invalid");
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/pipeline.toml"), "this is not valid [[[ toml").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("pipeline.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_source_path() {
        let tmp = scratch_dir("statsheet_config_empty_source");
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(
            tmp.join("config/pipeline.toml"),
            VALID_TOML.replace("\"ipl_data.xlsx\"", "\"  \""),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "paths.source");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = scratch_dir("statsheet_config_ensure_copies");
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join("pipeline.toml"), VALID_TOML).unwrap();
        fs::write(defaults_dir.join("pipeline.toml.example"), "# template\n").unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/pipeline.toml").exists());
        assert!(!tmp.join("config/pipeline.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = scratch_dir("statsheet_config_ensure_skips");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/pipeline.toml"), VALID_TOML).unwrap();
        fs::write(tmp.join("config/pipeline.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let content = fs::read_to_string(tmp.join("config/pipeline.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = scratch_dir("statsheet_config_both_missing");
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::coordinate::{ScreenSize, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
use crate::errors::{CoordinateError, CoordinateResult};

pub const CONFIG_FILE_NAME: &str = "normcoord.toml";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "NORMCOORD_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Screen size used when neither the command line nor a device context names one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default = "default_width")]
    pub default_width: i64,
    #[serde(default = "default_height")]
    pub default_height: i64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            default_width: default_width(),
            default_height: default_height(),
        }
    }
}

fn default_width() -> i64 {
    DEFAULT_SCREEN_WIDTH
}

fn default_height() -> i64 {
    DEFAULT_SCREEN_HEIGHT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` takes precedence.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn default_screen(&self) -> CoordinateResult<ScreenSize> {
        ScreenSize::new(self.screen.default_width, self.screen.default_height).map_err(|e| {
            CoordinateError::Config(format!("invalid [screen] defaults: {e}"))
        })
    }
}

/// Directories searched for `normcoord.toml`, in order: next to the
/// executable, the working directory, then the user config dir.
fn search_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            candidates.push(parent.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("normcoord"));
    }
    candidates
}

/// `Ok(None)` means nothing was found, which is not an error. An explicit
/// path that does not exist is.
fn resolve_config_path(
    explicit: Option<PathBuf>,
    search_dirs: &[PathBuf],
) -> CoordinateResult<Option<PathBuf>> {
    if let Some(candidate) = explicit {
        if candidate.exists() {
            return Ok(Some(candidate));
        }
        return Err(CoordinateError::Config(format!(
            "{CONFIG_ENV_VAR} points at missing file {}",
            candidate.display()
        )));
    }

    Ok(search_dirs
        .iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.exists()))
}

pub fn parse_config(content: &str) -> CoordinateResult<AppConfig> {
    let config: AppConfig = toml::from_str(content)?;
    Ok(config)
}

/// Locate and parse the config file. A missing file yields `Ok(None)`; a file
/// that exists but cannot be read or parsed is an error. Runs before the
/// subscriber is installed (the log filter lives in the file), so the caller
/// logs the outcome.
pub fn load_config() -> CoordinateResult<Option<(AppConfig, PathBuf)>> {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    load_config_from(explicit, &search_dirs())
}

pub fn load_config_from(
    explicit: Option<PathBuf>,
    search_dirs: &[PathBuf],
) -> CoordinateResult<Option<(AppConfig, PathBuf)>> {
    let Some(path) = resolve_config_path(explicit, search_dirs)? else {
        return Ok(None);
    };
    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content).map_err(|e| {
        CoordinateError::Config(format!("{}: {e}", path.display()))
    })?;
    Ok(Some((config, path)))
}

/// Effective configuration rendered back to TOML.
pub fn render_config(config: &AppConfig) -> CoordinateResult<String> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_screen().unwrap(), ScreenSize::default());
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            [screen]
            default_width = 1440

            [log]
            filter = "normcoord=trace"
            "#,
        )
        .unwrap();
        assert_eq!(config.screen.default_width, 1440);
        assert_eq!(config.screen.default_height, 2400);
        assert_eq!(config.log.filter, "normcoord=trace");
    }

    #[test]
    fn invalid_screen_defaults_surface_as_config_error() {
        let config = parse_config("[screen]\ndefault_height = -1\n").unwrap();
        let err = config.default_screen().unwrap_err();
        assert!(matches!(err, CoordinateError::Config(_)));
        assert!(err.to_string().contains("Screen height must be positive, got -1"));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = parse_config("[screen\ndefault_width = 1").unwrap_err();
        assert!(matches!(err, CoordinateError::TomlDe(_)));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("normcoord-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn no_config_file_is_not_an_error() {
        let empty = scratch_dir("empty");
        assert!(load_config_from(None, &[empty.clone()]).unwrap().is_none());
        assert!(load_config_from(None, &[]).unwrap().is_none());
        std::fs::remove_dir_all(&empty).unwrap();
    }

    #[test]
    fn first_search_dir_with_a_file_wins() {
        let empty = scratch_dir("first-empty");
        let second = scratch_dir("second");
        let third = scratch_dir("third");
        std::fs::write(second.join(CONFIG_FILE_NAME), "[screen]\ndefault_width = 720\n").unwrap();
        std::fs::write(third.join(CONFIG_FILE_NAME), "[screen]\ndefault_width = 1440\n").unwrap();

        let (config, path) =
            load_config_from(None, &[empty.clone(), second.clone(), third.clone()]).unwrap().unwrap();
        assert_eq!(config.screen.default_width, 720);
        assert_eq!(path, second.join(CONFIG_FILE_NAME));

        for dir in [empty, second, third] {
            std::fs::remove_dir_all(dir).unwrap();
        }
    }

    #[test]
    fn broken_config_file_is_an_error() {
        let dir = scratch_dir("broken");
        std::fs::write(dir.join(CONFIG_FILE_NAME), "[screen\ndefault_width = 720").unwrap();

        let err = load_config_from(None, &[dir.clone()]).unwrap_err();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(err, CoordinateError::Config(_)));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn explicit_path_skips_search_dirs() {
        let dir = scratch_dir("explicit");
        let explicit = dir.join("custom.toml");
        std::fs::write(&explicit, "[log]\nfilter = \"debug\"\n").unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), "[log]\nfilter = \"warn\"\n").unwrap();

        let (config, path) = load_config_from(Some(explicit.clone()), &[dir.clone()]).unwrap().unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.log.filter, "debug");
        assert_eq!(path, explicit);
    }

    #[test]
    fn explicit_path_that_is_missing_is_an_error() {
        let dir = scratch_dir("explicit-missing");
        std::fs::write(dir.join(CONFIG_FILE_NAME), "").unwrap();

        let err = load_config_from(Some(dir.join("nope.toml")), &[dir.clone()]).unwrap_err();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(err.to_string().contains("points at missing file"));
    }

    // The only test that touches NORMCOORD_CONFIG.
    #[test]
    fn load_config_honours_env_var() {
        let dir = scratch_dir("env");
        let path = dir.join("from-env.toml");
        std::fs::write(&path, "[screen]\ndefault_height = 1600\n").unwrap();

        std::env::set_var(CONFIG_ENV_VAR, &path);
        let found = load_config();
        std::env::set_var(CONFIG_ENV_VAR, dir.join("missing.toml"));
        let missing = load_config();
        std::env::remove_var(CONFIG_ENV_VAR);
        std::fs::remove_dir_all(&dir).unwrap();

        let (config, loaded_from) = found.unwrap().unwrap();
        assert_eq!(config.screen.default_height, 1600);
        assert_eq!(loaded_from, path);
        assert!(matches!(missing, Err(CoordinateError::Config(_))));
    }

    #[test]
    fn rendered_config_parses_back() {
        let mut config = AppConfig::default();
        config.screen.default_width = 720;
        let rendered = render_config(&config).unwrap();
        assert!(rendered.contains("default_width = 720"));
        assert_eq!(parse_config(&rendered).unwrap(), config);
    }
}

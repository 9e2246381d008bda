use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::SwRiskConfig;
use crate::error::{Result, SwRiskError};

pub const CONFIG_FILE_NAME: &str = ".swrisk.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<SwRiskConfig> {
    let config = toml::from_str::<SwRiskConfig>(contents)
        .map_err(|e| SwRiskError::config(format!("failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;
    config.validate()?;
    Ok(config)
}

/// Try loading config from a specific path; `None` when absent or invalid.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<SwRiskConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its ancestors, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.swrisk.toml`.
pub fn load_config_from(start: PathBuf) -> SwRiskConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            SwRiskConfig::default()
        })
}

/// Load configuration from the nearest `.swrisk.toml` above the working
/// directory, or defaults.
pub fn load_config() -> SwRiskConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            SwRiskConfig::default()
        }
    }
}

/// Load an explicitly named config file. Unlike the directory search, any
/// problem is an error.
pub fn load_config_from_path(path: &Path) -> Result<SwRiskConfig> {
    let contents = read_config_file(path).map_err(|e| SwRiskError::io(path, e))?;
    parse_and_validate_config(&contents).map_err(|e| match e {
        SwRiskError::Config { message, .. } => SwRiskError::config_with_path(message, path),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_ancestors_stops_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
            ]
        );
    }

    #[test]
    fn test_directory_ancestors_ends_at_root() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a"), 10).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a"), PathBuf::from("/")]);
    }

    #[test]
    fn test_parse_error_mentions_file_name() {
        let err = parse_and_validate_config("[calculation\n").unwrap_err();
        assert!(err.to_string().contains(".swrisk.toml"));
    }
}

use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# swrisk configuration

[calculation]
# Multiply S2 by the standards review factor SR.
include_standards_review = false
# Bin Units into complexity and size histograms when a CSCI has none entered.
derive_module_histograms = true

[histogram]
# Complexity above this counts as high (ax), below low_complexity as low (cx).
high_complexity = 20
low_complexity = 7
# SLOC below this is a small module (um), above large_module_sloc a large one (xm).
small_module_sloc = 200
large_module_sloc = 3000

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, SwRiskConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_built_in_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, SwRiskConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        init_config_in(dir.path(), false).unwrap();
        assert!(init_config_in(dir.path(), false).is_err());
        init_config_in(dir.path(), true).unwrap();
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }
}

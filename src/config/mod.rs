//! Configuration loaded from `.swrisk.toml`.
//!
//! ```toml
//! [calculation]
//! include_standards_review = false
//! derive_module_histograms = true
//!
//! [histogram]
//! high_complexity = 20
//! low_complexity = 7
//! small_module_sloc = 200
//! large_module_sloc = 3000
//!
//! [output]
//! default_format = "terminal"
//! ```

mod core;
mod loader;

pub use self::core::{CalculationConfig, OutputConfig, SwRiskConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

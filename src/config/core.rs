use serde::{Deserialize, Serialize};

use crate::calculate::CalculationOptions;
use crate::error::{Result, SwRiskError};
use crate::factors::HistogramBins;
use crate::io::OutputFormat;

/// Root configuration structure for swrisk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SwRiskConfig {
    #[serde(default)]
    pub calculation: CalculationConfig,

    /// Bin thresholds for deriving module histograms from Units
    #[serde(default)]
    pub histogram: HistogramBins,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Multiply `s2` by the standards review factor
    #[serde(default)]
    pub include_standards_review: bool,

    /// Bin Units into module histograms when none were entered
    #[serde(default = "default_derive_module_histograms")]
    pub derive_module_histograms: bool,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            include_standards_review: false,
            derive_module_histograms: default_derive_module_histograms(),
        }
    }
}

fn default_derive_module_histograms() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl SwRiskConfig {
    /// Reject bin thresholds that leave no room for the middle bucket.
    pub fn validate(&self) -> Result<()> {
        let bins = &self.histogram;
        if bins.low_complexity > bins.high_complexity {
            return Err(SwRiskError::config(format!(
                "histogram.low_complexity ({}) exceeds histogram.high_complexity ({})",
                bins.low_complexity, bins.high_complexity
            )));
        }
        if bins.small_module_sloc > bins.large_module_sloc {
            return Err(SwRiskError::config(format!(
                "histogram.small_module_sloc ({}) exceeds histogram.large_module_sloc ({})",
                bins.small_module_sloc, bins.large_module_sloc
            )));
        }
        Ok(())
    }

    pub fn to_options(&self) -> CalculationOptions {
        CalculationOptions {
            include_standards_review: self.calculation.include_standards_review,
            derive_module_histograms: self.calculation.derive_module_histograms,
            bins: self.histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: SwRiskConfig = toml::from_str("").unwrap();
        assert_eq!(config, SwRiskConfig::default());
        assert!(config.calculation.derive_module_histograms);
        assert_eq!(config.histogram.high_complexity, 20);
        assert_eq!(config.to_options(), CalculationOptions::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: SwRiskConfig = toml::from_str(
            "[calculation]\ninclude_standards_review = true\n\n[histogram]\nlow_complexity = 5\n",
        )
        .unwrap();
        assert!(config.calculation.include_standards_review);
        assert!(config.calculation.derive_module_histograms);
        assert_eq!(config.histogram.low_complexity, 5);
        assert_eq!(config.histogram.large_module_sloc, 3000);
    }

    #[test]
    fn test_inverted_bins_are_rejected() {
        let mut config = SwRiskConfig::default();
        config.histogram.low_complexity = 30;
        assert!(matches!(config.validate(), Err(SwRiskError::Config { .. })));
    }
}

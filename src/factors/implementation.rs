//! Software implementation factors: language type (`sl`), complexity
//! (`sx`), modularity (`sm`) and standards review (`sr`).
//!
//! `sx` and `sm` are computed from module histograms. A histogram is either
//! entered directly on the item or derived by binning its Units with
//! [`HistogramBins`]. A Unit without an entered histogram is neutral
//! (`sx = sm = 1.0`).

use serde::{Deserialize, Serialize};

use super::fault::{ratio, FaultCode};
use crate::software::{SoftwareNode, StructuralMetrics};

/// Fallback for `sl` when the item has no source lines (all-assembly worst case).
pub const LANGUAGE_FALLBACK: f64 = 1.4;

/// Fallback for `sx` when no modules were counted (all high complexity).
pub const COMPLEXITY_FALLBACK: f64 = 1.5;

/// Fallback for `sm` when no modules were counted (all large modules).
pub const MODULARITY_FALLBACK: f64 = 2.0;

/// Thresholds used to bin Units into module histograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBins {
    /// Complexity strictly above this is high (`ax`).
    #[serde(default = "default_high_complexity")]
    pub high_complexity: u32,
    /// Complexity strictly below this is low (`cx`).
    #[serde(default = "default_low_complexity")]
    pub low_complexity: u32,
    /// SLOC strictly below this is a small module (`um`).
    #[serde(default = "default_small_module_sloc")]
    pub small_module_sloc: u32,
    /// SLOC strictly above this is a large module (`xm`).
    #[serde(default = "default_large_module_sloc")]
    pub large_module_sloc: u32,
}

impl Default for HistogramBins {
    fn default() -> Self {
        Self {
            high_complexity: default_high_complexity(),
            low_complexity: default_low_complexity(),
            small_module_sloc: default_small_module_sloc(),
            large_module_sloc: default_large_module_sloc(),
        }
    }
}

fn default_high_complexity() -> u32 {
    20
}

fn default_low_complexity() -> u32 {
    7
}

fn default_small_module_sloc() -> u32 {
    200
}

fn default_large_module_sloc() -> u32 {
    3000
}

/// Module counts by complexity class and by size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModuleHistogram {
    pub nm: u32,
    pub ax: u32,
    pub bx: u32,
    pub cx: u32,
    pub um: u32,
    pub wm: u32,
    pub xm: u32,
}

impl ModuleHistogram {
    /// The histogram entered on an item.
    pub fn entered(metrics: &StructuralMetrics) -> Self {
        Self {
            nm: metrics.nm,
            ax: metrics.ax,
            bx: metrics.bx,
            cx: metrics.cx,
            um: metrics.um,
            wm: metrics.wm,
            xm: metrics.xm,
        }
    }

    /// Bin a set of Units, one module each.
    pub fn from_units<'a>(
        units: impl IntoIterator<Item = &'a StructuralMetrics>,
        bins: &HistogramBins,
    ) -> Self {
        units
            .into_iter()
            .fold(Self::default(), |acc, unit| acc.add(bins.classify(unit)))
    }

    fn add(self, other: Self) -> Self {
        Self {
            nm: self.nm + other.nm,
            ax: self.ax + other.ax,
            bx: self.bx + other.bx,
            cx: self.cx + other.cx,
            um: self.um + other.um,
            wm: self.wm + other.wm,
            xm: self.xm + other.xm,
        }
    }
}

impl HistogramBins {
    /// Histogram of a single module.
    pub fn classify(&self, unit: &StructuralMetrics) -> ModuleHistogram {
        let mut histogram = ModuleHistogram {
            nm: 1,
            ..ModuleHistogram::default()
        };

        if unit.complexity > self.high_complexity {
            histogram.ax = 1;
        } else if unit.complexity < self.low_complexity {
            histogram.cx = 1;
        } else {
            histogram.bx = 1;
        }

        if unit.sloc < self.small_module_sloc {
            histogram.um = 1;
        } else if unit.sloc > self.large_module_sloc {
            histogram.xm = 1;
        } else {
            histogram.wm = 1;
        }

        histogram
    }
}

/// Language type risk `sl` (Worksheet 8D).
///
/// `hloc` may be negative when `aloc > sloc`.
pub fn language_type_risk(node: &mut SoftwareNode) -> FaultCode {
    let sloc = f64::from(node.metrics.sloc);
    let aloc = f64::from(node.metrics.aloc);
    let hloc = node.metrics.hloc();

    let (sl, fault) = match (ratio(hloc as f64, sloc), ratio(1.4 * aloc, sloc)) {
        (Ok(high_order), Ok(assembly)) => (high_order + assembly, FaultCode::OK),
        (Err(code), _) | (_, Err(code)) => (LANGUAGE_FALLBACK, code),
    };

    let outputs = node.outputs_mut();
    outputs.hloc = hloc;
    outputs.sl = Some(sl);
    fault
}

/// Complexity risk `sx` (Worksheets 9D and 10D).
pub fn complexity_risk(node: &mut SoftwareNode, histogram: &ModuleHistogram) -> FaultCode {
    let weighted =
        1.5 * f64::from(histogram.ax) + f64::from(histogram.bx) + 0.8 * f64::from(histogram.cx);
    let (sx, fault) = match ratio(weighted, f64::from(histogram.nm)) {
        Ok(sx) => (sx, FaultCode::OK),
        Err(code) => (COMPLEXITY_FALLBACK, code),
    };
    node.outputs_mut().sx = sx;
    fault
}

/// Modularity risk `sm` (Worksheet 9D).
pub fn modularity_risk(node: &mut SoftwareNode, histogram: &ModuleHistogram) -> FaultCode {
    let weighted =
        0.9 * f64::from(histogram.um) + f64::from(histogram.wm) + 2.0 * f64::from(histogram.xm);
    let (sm, fault) = match ratio(weighted, f64::from(histogram.nm)) {
        Ok(sm) => (sm, FaultCode::OK),
        Err(code) => (MODULARITY_FALLBACK, code),
    };
    node.outputs_mut().sm = sm;
    fault
}

pub fn standards_class(df: f64) -> f64 {
    if df >= 0.5 {
        1.5
    } else if df >= 0.25 {
        1.0
    } else {
        0.75
    }
}

/// Standards review risk `sr` from the fraction of review items answered "no".
pub fn standards_review_risk(node: &mut SoftwareNode) -> FaultCode {
    let review = node.questionnaire.standards_review;
    let answered = f64::from(review.yes) + f64::from(review.no);
    let (df, fault) = match ratio(f64::from(review.no), answered) {
        Ok(df) => (df, FaultCode::OK),
        Err(code) => (0.0, code),
    };
    let outputs = node.outputs_mut();
    outputs.df = df;
    outputs.sr = standards_class(df);
    fault
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::StandardsReview;

    fn unit_with(sloc: u32, aloc: u32) -> SoftwareNode {
        let mut node = SoftwareNode::unit(2, 1);
        node.metrics.sloc = sloc;
        node.metrics.aloc = aloc;
        node
    }

    #[test]
    fn test_language_type_mixed_source() {
        let mut node = unit_with(1000, 200);
        assert_eq!(language_type_risk(&mut node), FaultCode::OK);
        assert_eq!(node.outputs().hloc, 800);
        let sl = node.outputs().sl.unwrap();
        assert!((sl - 1.08).abs() < 1e-12);
    }

    #[test]
    fn test_language_type_empty_module_falls_back() {
        let mut node = unit_with(0, 0);
        assert_eq!(language_type_risk(&mut node), FaultCode::DIVISION_BY_ZERO);
        assert_eq!(node.outputs().sl, Some(1.4));
    }

    #[test]
    fn test_language_type_is_idempotent() {
        for (sloc, aloc) in [(1000, 200), (0, 0), (10, 30)] {
            let mut node = unit_with(sloc, aloc);
            let first = language_type_risk(&mut node);
            let sl = node.outputs().sl;
            let second = language_type_risk(&mut node);
            assert_eq!(first, second);
            assert_eq!(node.outputs().sl, sl);
        }
    }

    #[test]
    fn test_language_type_negative_hloc() {
        let mut node = unit_with(10, 30);
        language_type_risk(&mut node);
        assert_eq!(node.outputs().hloc, -20);
    }

    #[test]
    fn test_complexity_and_modularity_weights() {
        let mut node = SoftwareNode::csci(1);
        let histogram = ModuleHistogram {
            nm: 4,
            ax: 2,
            bx: 1,
            cx: 1,
            um: 1,
            wm: 1,
            xm: 2,
        };
        assert_eq!(complexity_risk(&mut node, &histogram), FaultCode::OK);
        assert_eq!(modularity_risk(&mut node, &histogram), FaultCode::OK);
        assert!((node.outputs().sx - (3.0 + 1.0 + 0.8) / 4.0).abs() < 1e-12);
        assert!((node.outputs().sm - (0.9 + 1.0 + 4.0) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_histogram_falls_back_to_worst_case() {
        let mut node = SoftwareNode::csci(1);
        let empty = ModuleHistogram::default();
        assert_eq!(complexity_risk(&mut node, &empty), FaultCode::DIVISION_BY_ZERO);
        assert_eq!(modularity_risk(&mut node, &empty), FaultCode::DIVISION_BY_ZERO);
        assert_eq!(node.outputs().sx, COMPLEXITY_FALLBACK);
        assert_eq!(node.outputs().sm, MODULARITY_FALLBACK);
    }

    #[test]
    fn test_bins_are_strict() {
        let bins = HistogramBins::default();
        let module = |complexity, sloc| StructuralMetrics {
            complexity,
            sloc,
            ..StructuralMetrics::default()
        };

        let units = [
            module(21, 199),
            module(20, 200),
            module(7, 3000),
            module(6, 3001),
        ];
        let histogram = ModuleHistogram::from_units(units.iter(), &bins);
        assert_eq!(
            histogram,
            ModuleHistogram {
                nm: 4,
                ax: 1,
                bx: 2,
                cx: 1,
                um: 1,
                wm: 2,
                xm: 1,
            }
        );
    }

    #[test]
    fn test_entered_histogram_copies_metrics() {
        let metrics = StructuralMetrics {
            nm: 3,
            ax: 1,
            cx: 2,
            wm: 3,
            ..StructuralMetrics::default()
        };
        let histogram = ModuleHistogram::entered(&metrics);
        assert_eq!(histogram.nm, 3);
        assert_eq!(histogram.cx, 2);
        assert_eq!(histogram.wm, 3);
    }

    #[test]
    fn test_standards_review_buckets() {
        let cases = [(1, 1, 1.5), (3, 1, 1.0), (9, 1, 0.75), (0, 0, 0.75)];
        for (yes, no, expected) in cases {
            let mut node = SoftwareNode::csci(1);
            node.questionnaire.standards_review = StandardsReview { yes, no };
            standards_review_risk(&mut node);
            assert_eq!(node.outputs().sr, expected, "{} yes / {} no", yes, no);
        }
    }

    #[test]
    fn test_standards_review_large_tally() {
        let mut node = SoftwareNode::csci(1);
        node.questionnaire.standards_review = StandardsReview {
            yes: u32::MAX,
            no: u32::MAX,
        };
        assert_eq!(standards_review_risk(&mut node), FaultCode::OK);
        assert_eq!(node.outputs().df, 0.5);
        assert_eq!(node.outputs().sr, 1.5);
    }

    #[test]
    fn test_standards_review_without_answers_faults() {
        let mut node = SoftwareNode::csci(1);
        assert_eq!(standards_review_risk(&mut node), FaultCode::DIVISION_BY_ZERO);
        assert_eq!(node.outputs().df, 0.0);
    }
}

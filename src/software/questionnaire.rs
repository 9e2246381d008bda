//! RL-TR-92-52 questionnaire answer sheets.
//!
//! Yes/no answers are stored as `0`/`1`. Some anomaly management and
//! quality items are counts that the worksheets combine into ratios, so the
//! phase sheets hold `f64` values. Every sheet has a fixed length; reads past
//! the end yield `0` so a short sheet degrades an answer instead of
//! panicking, and [`Questionnaire::validate`] reports the mismatch when a
//! project is loaded.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of development environment practice questions (Worksheet 1B).
pub const DEVELOPMENT_ITEMS: usize = 43;

/// Anomaly management sheet lengths: SRR, PDR, CDR, TRR.
pub const ANOMALY_ITEMS: [usize; 4] = [22, 14, 11, 2];

/// Traceability sheet lengths: SRR, PDR, CDR.
pub const TRACEABILITY_ITEMS: [usize; 3] = [1, 1, 2];

/// Software quality sheet lengths: SRR, PDR, CDR, TRR.
pub const QUALITY_ITEMS: [usize; 4] = [27, 24, 24, 14];

/// Number of test technique rows in the test selection matrix.
pub const TEST_TECHNIQUES: usize = 21;

/// Read one answer, treating anything past the end of the sheet as `0`.
pub(crate) fn answer(sheet: &[f64], index: usize) -> f64 {
    sheet.get(index).copied().unwrap_or(0.0)
}

/// Sum the answers in `range`, clipped to the sheet length.
pub(crate) fn sum_answers(sheet: &[f64], range: Range<usize>) -> f64 {
    let end = range.end.min(sheet.len());
    let start = range.start.min(end);
    sheet[start..end].iter().sum()
}

/// Anomaly management answers (Worksheets 2A-2D), one sheet per review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyManagement {
    #[serde(default = "default_anomaly_srr")]
    pub srr: Vec<f64>,
    #[serde(default = "default_anomaly_pdr")]
    pub pdr: Vec<f64>,
    #[serde(default = "default_anomaly_cdr")]
    pub cdr: Vec<f64>,
    #[serde(default = "default_anomaly_trr")]
    pub trr: Vec<f64>,
}

impl Default for AnomalyManagement {
    fn default() -> Self {
        Self {
            srr: default_anomaly_srr(),
            pdr: default_anomaly_pdr(),
            cdr: default_anomaly_cdr(),
            trr: default_anomaly_trr(),
        }
    }
}

fn default_anomaly_srr() -> Vec<f64> {
    vec![0.0; ANOMALY_ITEMS[0]]
}
fn default_anomaly_pdr() -> Vec<f64> {
    vec![0.0; ANOMALY_ITEMS[1]]
}
fn default_anomaly_cdr() -> Vec<f64> {
    vec![0.0; ANOMALY_ITEMS[2]]
}
fn default_anomaly_trr() -> Vec<f64> {
    vec![0.0; ANOMALY_ITEMS[3]]
}

/// Requirements traceability answers (Worksheet 3B).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traceability {
    #[serde(default = "default_trace_srr")]
    pub srr: Vec<f64>,
    #[serde(default = "default_trace_pdr")]
    pub pdr: Vec<f64>,
    #[serde(default = "default_trace_cdr")]
    pub cdr: Vec<f64>,
}

impl Default for Traceability {
    fn default() -> Self {
        Self {
            srr: default_trace_srr(),
            pdr: default_trace_pdr(),
            cdr: default_trace_cdr(),
        }
    }
}

fn default_trace_srr() -> Vec<f64> {
    vec![0.0; TRACEABILITY_ITEMS[0]]
}
fn default_trace_pdr() -> Vec<f64> {
    vec![0.0; TRACEABILITY_ITEMS[1]]
}
fn default_trace_cdr() -> Vec<f64> {
    vec![0.0; TRACEABILITY_ITEMS[2]]
}

/// Software quality control answers (Worksheet 4A and its later-phase
/// counterparts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareQuality {
    #[serde(default = "default_quality_srr")]
    pub srr: Vec<f64>,
    #[serde(default = "default_quality_pdr")]
    pub pdr: Vec<f64>,
    #[serde(default = "default_quality_cdr")]
    pub cdr: Vec<f64>,
    #[serde(default = "default_quality_trr")]
    pub trr: Vec<f64>,
}

impl Default for SoftwareQuality {
    fn default() -> Self {
        Self {
            srr: default_quality_srr(),
            pdr: default_quality_pdr(),
            cdr: default_quality_cdr(),
            trr: default_quality_trr(),
        }
    }
}

fn default_quality_srr() -> Vec<f64> {
    vec![0.0; QUALITY_ITEMS[0]]
}
fn default_quality_pdr() -> Vec<f64> {
    vec![0.0; QUALITY_ITEMS[1]]
}
fn default_quality_cdr() -> Vec<f64> {
    vec![0.0; QUALITY_ITEMS[2]]
}
fn default_quality_trr() -> Vec<f64> {
    vec![0.0; QUALITY_ITEMS[3]]
}

/// Test technique selection matrix: one `[used, recommended]` pair per
/// technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestSelection(pub Vec<[u32; 2]>);

impl Default for TestSelection {
    fn default() -> Self {
        Self(vec![[0, 0]; TEST_TECHNIQUES])
    }
}

impl TestSelection {
    /// Total number of techniques actually used.
    pub fn used(&self) -> u64 {
        self.0.iter().map(|pair| u64::from(pair[0])).sum()
    }

    /// Total number of techniques recommended for the item.
    pub fn recommended(&self) -> u64 {
        self.0.iter().map(|pair| u64::from(pair[1])).sum()
    }
}

/// Coding standards review tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StandardsReview {
    #[serde(default)]
    pub yes: u32,
    #[serde(default)]
    pub no: u32,
}

/// All questionnaire answers for one software item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    /// Development environment practices, one `0`/`1` answer per question.
    #[serde(default = "default_development")]
    pub development: Vec<u8>,
    #[serde(default)]
    pub anomaly_management: AnomalyManagement,
    #[serde(default)]
    pub traceability: Traceability,
    #[serde(default)]
    pub software_quality: SoftwareQuality,
    #[serde(default)]
    pub test_selection: TestSelection,
    #[serde(default)]
    pub standards_review: StandardsReview,
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self {
            development: default_development(),
            anomaly_management: AnomalyManagement::default(),
            traceability: Traceability::default(),
            software_quality: SoftwareQuality::default(),
            test_selection: TestSelection::default(),
            standards_review: StandardsReview::default(),
        }
    }
}

fn default_development() -> Vec<u8> {
    vec![0; DEVELOPMENT_ITEMS]
}

/// A sheet whose length differs from the worksheet definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLengthMismatch {
    pub sheet: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl Questionnaire {
    /// Number of development practices answered "yes".
    pub fn development_yes(&self) -> u32 {
        self.development.iter().map(|&a| u32::from(a.min(1))).sum()
    }

    /// Check every sheet against its worksheet length.
    pub fn validate(&self) -> Vec<SheetLengthMismatch> {
        let am = &self.anomaly_management;
        let tr = &self.traceability;
        let sq = &self.software_quality;
        let sheets: [(&'static str, usize, usize); 13] = [
            ("development", DEVELOPMENT_ITEMS, self.development.len()),
            ("anomaly_management.srr", ANOMALY_ITEMS[0], am.srr.len()),
            ("anomaly_management.pdr", ANOMALY_ITEMS[1], am.pdr.len()),
            ("anomaly_management.cdr", ANOMALY_ITEMS[2], am.cdr.len()),
            ("anomaly_management.trr", ANOMALY_ITEMS[3], am.trr.len()),
            ("traceability.srr", TRACEABILITY_ITEMS[0], tr.srr.len()),
            ("traceability.pdr", TRACEABILITY_ITEMS[1], tr.pdr.len()),
            ("traceability.cdr", TRACEABILITY_ITEMS[2], tr.cdr.len()),
            ("software_quality.srr", QUALITY_ITEMS[0], sq.srr.len()),
            ("software_quality.pdr", QUALITY_ITEMS[1], sq.pdr.len()),
            ("software_quality.cdr", QUALITY_ITEMS[2], sq.cdr.len()),
            ("software_quality.trr", QUALITY_ITEMS[3], sq.trr.len()),
            ("test_selection", TEST_TECHNIQUES, self.test_selection.0.len()),
        ];

        sheets
            .into_iter()
            .filter(|(_, expected, actual)| expected != actual)
            .map(|(sheet, expected, actual)| SheetLengthMismatch {
                sheet,
                expected,
                actual,
            })
            .collect()
    }
}

use serde::{Deserialize, Serialize};

use super::questionnaire::Questionnaire;
use super::{Level, SoftwareId};
use crate::factors::ReviewPhase;

/// Which pair of figures the test effort factor compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TestEffortBasis {
    LaborHours,
    Budget,
    Schedule,
    #[default]
    NotAssessed,
}

impl TestEffortBasis {
    /// Decode the historical `test_effort` index (1 = hours, 2 = budget,
    /// 3 = schedule, anything else = not assessed).
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => TestEffortBasis::LaborHours,
            2 => TestEffortBasis::Budget,
            3 => TestEffortBasis::Schedule,
            _ => TestEffortBasis::NotAssessed,
        }
    }
}

/// Source size, module histograms and test coverage counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StructuralMetrics {
    /// Total source lines of code.
    pub sloc: u32,
    /// Lines written in assembly language.
    pub aloc: u32,
    /// Cyclomatic complexity of a Unit; feeds its parent's complexity histogram.
    pub complexity: u32,
    /// Modules with complexity above the high threshold.
    pub ax: u32,
    /// Modules with complexity between the thresholds.
    pub bx: u32,
    /// Modules with complexity below the low threshold.
    pub cx: u32,
    /// Total number of modules.
    pub nm: u32,
    /// Small modules.
    pub um: u32,
    /// Medium modules.
    pub wm: u32,
    /// Large modules.
    pub xm: u32,
    pub branches: u32,
    pub branches_test: u32,
    pub inputs: u32,
    pub inputs_test: u32,
    /// Units of a CSCI that will be tested.
    pub nm_test: u32,
    pub interfaces: u32,
    pub interfaces_test: u32,
}

impl StructuralMetrics {
    /// True when no module histogram has been entered.
    pub fn histograms_empty(&self) -> bool {
        [self.nm, self.ax, self.bx, self.cx, self.um, self.wm, self.xm]
            .iter()
            .all(|&count| count == 0)
    }

    /// Higher order language lines, `sloc - aloc`. Negative when the
    /// assembly count exceeds the total.
    pub fn hloc(&self) -> i64 {
        i64::from(self.sloc) - i64::from(self.aloc)
    }
}

/// Development versus test resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TestEffortInputs {
    pub basis: TestEffortBasis,
    pub labor_hours_test: f64,
    pub labor_hours_dev: f64,
    pub budget_test: f64,
    pub budget_dev: f64,
    pub schedule_test: f64,
    pub schedule_dev: f64,
}

/// Operating environment and test history used by the REN estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExecutionProfile {
    /// Total execution time.
    pub et: f64,
    /// Operating system overhead time.
    pub os: f64,
    /// Exception conditions.
    pub ec: f64,
    /// Discrepancy reports raised during test to date.
    pub dr_test: u32,
    /// Test time to date.
    pub test_time: f64,
    /// Discrepancy reports at end of test.
    pub dr_eot: u32,
    /// Total test time at end of test.
    pub test_time_eot: f64,
}

/// Values written by the calculation driver.
///
/// Phase-gated factors are `None` when the item's review phase does not
/// evaluate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskOutputs {
    pub calculated: bool,
    pub a_risk: f64,
    pub dc: f64,
    pub d_risk: f64,
    pub am: Option<f64>,
    pub sa: Option<f64>,
    pub st: Option<f64>,
    pub dr: Option<f64>,
    pub sq: Option<f64>,
    pub s1: f64,
    pub hloc: i64,
    pub sl: Option<f64>,
    pub sx: f64,
    pub sm: f64,
    pub df: f64,
    pub sr: f64,
    pub s2: f64,
    pub rpfom: f64,
    pub te: f64,
    pub tu: u64,
    pub tt: u64,
    pub tm: f64,
    pub tc: f64,
    pub t_risk: f64,
    pub ew: f64,
    pub ev: f64,
    pub e_risk: f64,
    pub ft1: f64,
    pub ft2: f64,
    pub ren_avg: f64,
    pub ren_eot: f64,
}

impl Default for RiskOutputs {
    fn default() -> Self {
        Self {
            calculated: false,
            a_risk: 0.0,
            dc: 0.0,
            d_risk: 0.0,
            am: None,
            sa: None,
            st: None,
            dr: None,
            sq: None,
            s1: 0.0,
            hloc: 0,
            sl: None,
            sx: 0.0,
            sm: 1.0,
            df: 0.0,
            sr: 0.0,
            s2: 0.0,
            rpfom: 0.0,
            te: 0.0,
            tu: 0,
            tt: 0,
            tm: 0.0,
            tc: 0.0,
            t_risk: 0.0,
            ew: 0.0,
            ev: 0.0,
            e_risk: 0.0,
            ft1: 0.0,
            ft2: 0.0,
            ren_avg: 0.0,
            ren_eot: 0.0,
        }
    }
}

/// One Unit, CSCI or System in the software reliability decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareNode {
    pub software_id: SoftwareId,
    /// Parent item; `None` marks a root.
    #[serde(default)]
    pub parent_id: Option<SoftwareId>,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub description: String,
    /// RL-TR-92-52 application category, 0 = not assessed, 1-18 = category.
    #[serde(default)]
    pub application_id: u8,
    /// Lifecycle review the answers were collected at.
    #[serde(default)]
    pub phase_id: u8,
    #[serde(default)]
    pub questionnaire: Questionnaire,
    #[serde(default)]
    pub metrics: StructuralMetrics,
    #[serde(default)]
    pub test_effort: TestEffortInputs,
    #[serde(default)]
    pub execution: ExecutionProfile,
    #[serde(skip)]
    outputs: RiskOutputs,
}

impl SoftwareNode {
    pub fn new(software_id: impl Into<SoftwareId>, level: Level) -> Self {
        Self {
            software_id: software_id.into(),
            parent_id: None,
            level,
            description: String::new(),
            application_id: 0,
            phase_id: 0,
            questionnaire: Questionnaire::default(),
            metrics: StructuralMetrics::default(),
            test_effort: TestEffortInputs::default(),
            execution: ExecutionProfile::default(),
            outputs: RiskOutputs::default(),
        }
    }

    pub fn unit(software_id: impl Into<SoftwareId>, parent: impl Into<SoftwareId>) -> Self {
        Self::new(software_id, Level::Unit).with_parent(parent)
    }

    pub fn csci(software_id: impl Into<SoftwareId>) -> Self {
        Self::new(software_id, Level::Csci)
    }

    pub fn with_parent(mut self, parent: impl Into<SoftwareId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_phase(mut self, phase: ReviewPhase) -> Self {
        self.phase_id = phase.code();
        self
    }

    pub fn review_phase(&self) -> ReviewPhase {
        ReviewPhase::from_code(self.phase_id)
    }

    /// Computed figures. Meaningful only once [`is_calculated`] is true.
    ///
    /// [`is_calculated`]: SoftwareNode::is_calculated
    pub fn outputs(&self) -> &RiskOutputs {
        &self.outputs
    }

    pub(crate) fn outputs_mut(&mut self) -> &mut RiskOutputs {
        &mut self.outputs
    }

    pub fn is_calculated(&self) -> bool {
        self.outputs.calculated
    }

    /// Discard computed figures, e.g. after inputs were edited.
    pub fn reset_outputs(&mut self) {
        self.outputs = RiskOutputs::default();
    }

    /// Label used in reports: the description, or the id when blank.
    pub fn label(&self) -> String {
        if self.description.trim().is_empty() {
            format!("{} {}", self.level, self.software_id)
        } else {
            self.description.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_uncalculated() {
        let node = SoftwareNode::csci(1);
        assert!(!node.is_calculated());
        assert_eq!(node.outputs().rpfom, 0.0);
        assert_eq!(node.outputs().sm, 1.0);
        assert_eq!(node.outputs().sa, None);
    }

    #[test]
    fn test_unit_constructor_sets_parent() {
        let node = SoftwareNode::unit(7, 2);
        assert_eq!(node.level, Level::Unit);
        assert_eq!(node.parent_id, Some(SoftwareId::new(2)));
    }

    #[test]
    fn test_test_effort_basis_codes() {
        assert_eq!(TestEffortBasis::from_code(1), TestEffortBasis::LaborHours);
        assert_eq!(TestEffortBasis::from_code(2), TestEffortBasis::Budget);
        assert_eq!(TestEffortBasis::from_code(3), TestEffortBasis::Schedule);
        assert_eq!(TestEffortBasis::from_code(0), TestEffortBasis::NotAssessed);
    }

    #[test]
    fn test_outputs_are_not_deserialized() {
        let json = r#"{
            "software_id": 3,
            "level": "unit",
            "outputs": { "calculated": true, "rpfom": 9.0 }
        }"#;
        let node: SoftwareNode = serde_json::from_str(json).unwrap();
        assert!(!node.is_calculated());
        assert_eq!(node.outputs().rpfom, 0.0);
    }

    #[test]
    fn test_label_falls_back_to_level_and_id() {
        let node = SoftwareNode::unit(4, 1);
        assert_eq!(node.label(), "Unit 4");
        let named = node.with_description("Navigation filter");
        assert_eq!(named.label(), "Navigation filter");
    }

    #[test]
    fn test_histograms_empty() {
        let mut metrics = StructuralMetrics::default();
        assert!(metrics.histograms_empty());
        metrics.ax = 2;
        assert!(!metrics.histograms_empty());

        let saturated = StructuralMetrics {
            ax: u32::MAX,
            bx: 1,
            um: u32::MAX,
            xm: 1,
            ..StructuralMetrics::default()
        };
        assert!(!saturated.histograms_empty());
    }
}

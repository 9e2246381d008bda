//! Bottom-up risk calculation over a [`SoftwareTree`].
//!
//! The walk follows [`SoftwareTree::post_order`]: every Unit child, then every
//! CSCI child (each recursively), then the node itself. A parent is therefore
//! only evaluated once all of its children carry final figures. Numeric
//! faults are recorded in the [`CalculationReport`] and never stop the walk.

mod report;

pub use report::{CalculationReport, FactorFault};

use tracing::{debug, debug_span, trace};

use crate::error::Result;
use crate::factors::{
    anomaly_risk, application_risk, complexity_risk, development_risk, language_type_risk,
    modularity_risk, quality_risk, reliability_estimation_number, risk_reduction,
    standards_review_risk, traceability_risk, FaultCode, HistogramBins, ModuleHistogram,
    RiskFactor,
};
use crate::software::{Level, SoftwareId, SoftwareNode, SoftwareTree};

type FactorFn = fn(&mut SoftwareNode) -> FaultCode;

/// Phase-gated factors and the function that evaluates each.
const GATED_FACTORS: [(RiskFactor, FactorFn); 4] = [
    (RiskFactor::AnomalyManagement, anomaly_risk),
    (RiskFactor::Traceability, traceability_risk),
    (RiskFactor::Quality, quality_risk),
    (RiskFactor::LanguageType, language_type_risk),
];

/// Knobs for a calculation run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOptions {
    /// Multiply `s2` by the standards review factor `sr`.
    pub include_standards_review: bool,
    /// Derive empty module histograms from Unit children.
    pub derive_module_histograms: bool,
    pub bins: HistogramBins,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            include_standards_review: false,
            derive_module_histograms: true,
            bins: HistogramBins::default(),
        }
    }
}

/// Calculate the subtree rooted at `id`.
///
/// Fails only when `id` is not in the tree.
pub fn calculate(
    tree: &mut SoftwareTree,
    id: SoftwareId,
    options: &CalculationOptions,
) -> Result<CalculationReport> {
    let order = tree.post_order(id)?;
    let _span = debug_span!("calculate", root = %id, nodes = order.len()).entered();

    let mut report = CalculationReport::default();
    for member in order {
        let histogram = module_histogram(tree, member, options);
        let Some(node) = tree.get_mut(member) else {
            continue;
        };
        let evaluations = calculate_node(node, histogram.as_ref(), options);
        trace!(
            id = %member,
            rpfom = node.outputs().rpfom,
            faults = evaluations.iter().filter(|f| f.is_fault()).count(),
            "node calculated"
        );
        report.record(member, evaluations);
    }

    debug!(
        nodes = report.order.len(),
        faulted = report.faulted_nodes().len(),
        "calculation complete"
    );
    Ok(report)
}

/// Calculate every tree in the project, root by root.
pub fn calculate_all(
    tree: &mut SoftwareTree,
    options: &CalculationOptions,
) -> Result<CalculationReport> {
    let roots = tree.roots().to_vec();
    let mut report = CalculationReport::default();
    for root in roots {
        report.merge(calculate(tree, root, options)?);
    }
    Ok(report)
}

/// Histogram used for `sx` and `sm`, or `None` when both are neutral.
///
/// Entered histograms win. A Unit with none entered is neutral; a CSCI or
/// System with none entered is binned from its Unit children when derivation
/// is enabled.
fn module_histogram(
    tree: &SoftwareTree,
    id: SoftwareId,
    options: &CalculationOptions,
) -> Option<ModuleHistogram> {
    let node = tree.get(id)?;
    if !node.metrics.histograms_empty() {
        return Some(ModuleHistogram::entered(&node.metrics));
    }

    match node.level {
        Level::Unit => None,
        Level::Csci | Level::System if options.derive_module_histograms => {
            let units = tree.units_of(id);
            Some(ModuleHistogram::from_units(
                units.iter().filter_map(|unit| tree.get(*unit)).map(|n| &n.metrics),
                &options.bins,
            ))
        }
        Level::Csci | Level::System => Some(ModuleHistogram::entered(&node.metrics)),
    }
}

/// Evaluate every factor for one node whose children are already final.
fn calculate_node(
    node: &mut SoftwareNode,
    histogram: Option<&ModuleHistogram>,
    options: &CalculationOptions,
) -> Vec<FactorFault> {
    node.reset_outputs();
    let phase = node.review_phase();
    let mut evaluations = Vec::with_capacity(11);

    match histogram {
        Some(histogram) => {
            evaluations.push(FactorFault::new(
                RiskFactor::Complexity,
                complexity_risk(node, histogram),
            ));
            evaluations.push(FactorFault::new(
                RiskFactor::Modularity,
                modularity_risk(node, histogram),
            ));
        }
        None => {
            let outputs = node.outputs_mut();
            outputs.sx = 1.0;
            outputs.sm = 1.0;
        }
    }

    for (factor, evaluate) in GATED_FACTORS {
        if phase.applies(factor) {
            evaluations.push(FactorFault::new(factor, evaluate(node)));
        }
    }
    node.outputs_mut().hloc = node.metrics.hloc();

    evaluations.push(FactorFault::new(
        RiskFactor::Application,
        application_risk(node),
    ));
    evaluations.push(FactorFault::new(
        RiskFactor::Development,
        development_risk(node),
    ));
    evaluations.push(FactorFault::new(
        RiskFactor::StandardsReview,
        standards_review_risk(node),
    ));

    combine(node, options.include_standards_review);

    evaluations.push(FactorFault::new(
        RiskFactor::RiskReduction,
        risk_reduction(node),
    ));
    evaluations.push(FactorFault::new(
        RiskFactor::ReliabilityEstimation,
        reliability_estimation_number(node),
    ));

    node.outputs_mut().calculated = true;
    evaluations
}

/// Composite figures. Factors that do not apply at the node's phase count
/// as 1.0.
fn combine(node: &mut SoftwareNode, include_standards_review: bool) {
    let outputs = node.outputs_mut();
    let neutral = |factor: Option<f64>| factor.unwrap_or(1.0);

    outputs.s1 = neutral(outputs.sa) * neutral(outputs.st) * neutral(outputs.sq);
    outputs.s2 = neutral(outputs.sl) * outputs.sm * outputs.sx;
    if include_standards_review {
        outputs.s2 *= outputs.sr;
    }
    outputs.rpfom = outputs.a_risk * outputs.d_risk * outputs.s1 * outputs.s2;
}

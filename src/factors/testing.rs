//! Test phase factors: risk reduction from testing (`t_risk = te * tm * tc`)
//! and the reliability estimation numbers.

use super::fault::{ratio, FaultCode};
use crate::software::{Level, SoftwareNode, TestEffortBasis};

/// Calibration weight applied to the average failure rate during test.
pub const REN_AVG_WEIGHT: f64 = 0.02;

/// Calibration weight applied to the failure rate at end of test.
pub const REN_EOT_WEIGHT: f64 = 0.14;

pub fn test_effort_class(test_to_dev: f64) -> f64 {
    if test_to_dev > 0.4 {
        0.9
    } else {
        1.0
    }
}

pub fn test_method_class(used_fraction: f64) -> f64 {
    if used_fraction > 0.75 {
        0.9
    } else if used_fraction < 0.5 {
        1.1
    } else {
        1.0
    }
}

fn test_effort_factor(node: &SoftwareNode) -> (f64, FaultCode) {
    let effort = &node.test_effort;
    let test_to_dev = match effort.basis {
        TestEffortBasis::LaborHours => ratio(effort.labor_hours_test, effort.labor_hours_dev),
        TestEffortBasis::Budget => ratio(effort.budget_test, effort.budget_dev),
        TestEffortBasis::Schedule => ratio(effort.schedule_test, effort.schedule_dev),
        TestEffortBasis::NotAssessed => Ok(1.0),
    };
    match test_to_dev {
        Ok(value) => (test_effort_class(value), FaultCode::OK),
        Err(code) => (1.0, code),
    }
}

fn test_method_factor(tu: u64, tt: u64) -> (f64, FaultCode) {
    match ratio(tu as f64, tt as f64) {
        Ok(value) => (test_method_class(value), FaultCode::OK),
        Err(code) => (1.0, code),
    }
}

/// Fraction of the structure exercised by test, averaged over two measures.
///
/// CSCIs use units tested and interfaces tested; Units use branches and
/// inputs. Systems are treated as fully covered.
fn coverage(node: &SoftwareNode) -> (f64, FaultCode) {
    let m = &node.metrics;
    let pairs = match node.level {
        Level::System => return (1.0, FaultCode::OK),
        Level::Csci => [(m.nm_test, m.nm), (m.interfaces_test, m.interfaces)],
        Level::Unit => [(m.branches_test, m.branches), (m.inputs_test, m.inputs)],
    };
    let [(tested_a, total_a), (tested_b, total_b)] = pairs;

    match (
        ratio(f64::from(tested_a), f64::from(total_a)),
        ratio(f64::from(tested_b), f64::from(total_b)),
    ) {
        (Ok(a), Ok(b)) => ((a + b) / 2.0, FaultCode::OK),
        (Err(code), _) | (_, Err(code)) => (1.0, code),
    }
}

fn test_coverage_factor(node: &SoftwareNode) -> (f64, FaultCode) {
    let (vs, fault) = coverage(node);
    match ratio(1.0, vs) {
        Ok(tc) => (tc, fault),
        Err(code) => (1.0, fault.or(code)),
    }
}

/// Risk reduction from testing, `t_risk = te * tm * tc`.
///
/// Each of the three sub-factors traps its own zero denominators and falls
/// back to 1.0; the first fault encountered is returned.
pub fn risk_reduction(node: &mut SoftwareNode) -> FaultCode {
    let (te, effort_fault) = test_effort_factor(node);
    let tu = node.questionnaire.test_selection.used();
    let tt = node.questionnaire.test_selection.recommended();
    let (tm, method_fault) = test_method_factor(tu, tt);
    let (tc, coverage_fault) = test_coverage_factor(node);

    let outputs = node.outputs_mut();
    outputs.te = te;
    outputs.tu = tu;
    outputs.tt = tt;
    outputs.tm = tm;
    outputs.tc = tc;
    outputs.t_risk = te * tm * tc;

    effort_fault.or(method_fault).or(coverage_fault)
}

/// Reliability estimation numbers `ren_avg` and `ren_eot`.
///
/// Uses the `t_risk` already stored on the node, so [`risk_reduction`] must
/// run first.
pub fn reliability_estimation_number(node: &mut SoftwareNode) -> FaultCode {
    let execution = &node.execution;
    let mut fault = FaultCode::OK;

    let ew = ratio(execution.et, execution.et - execution.os).unwrap_or_else(|code| {
        fault = fault.or(code);
        1.0
    });
    let ev = 0.1 + 4.5 * execution.ec;

    let ft1 = ratio(f64::from(execution.dr_test), execution.test_time).unwrap_or_else(|code| {
        fault = fault.or(code);
        0.0
    });
    let ft2 = ratio(f64::from(execution.dr_eot), execution.test_time_eot).unwrap_or_else(|code| {
        fault = fault.or(code);
        0.0
    });

    let outputs = node.outputs_mut();
    outputs.ew = ew;
    outputs.ev = ev;
    outputs.e_risk = ew * ev;
    outputs.ft1 = ft1;
    outputs.ft2 = ft2;
    outputs.ren_avg = ft1 * REN_AVG_WEIGHT * outputs.t_risk;
    outputs.ren_eot = ft2 * REN_EOT_WEIGHT * outputs.t_risk;
    fault
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered_unit() -> SoftwareNode {
        let mut node = SoftwareNode::unit(2, 1);
        node.metrics.branches = 10;
        node.metrics.branches_test = 5;
        node.metrics.inputs = 4;
        node.metrics.inputs_test = 4;
        for pair in node.questionnaire.test_selection.0.iter_mut().take(4) {
            *pair = [1, 1];
        }
        node
    }

    #[test]
    fn test_unit_risk_reduction() {
        let mut node = covered_unit();
        node.test_effort.basis = TestEffortBasis::LaborHours;
        node.test_effort.labor_hours_test = 30.0;
        node.test_effort.labor_hours_dev = 100.0;

        assert_eq!(risk_reduction(&mut node), FaultCode::OK);
        let out = node.outputs();
        assert_eq!(out.te, 1.0);
        assert_eq!((out.tu, out.tt), (4, 4));
        assert_eq!(out.tm, 0.9);
        // vs = (0.5 + 1.0) / 2
        assert!((out.tc - 1.0 / 0.75).abs() < 1e-12);
        assert!((out.t_risk - 0.9 / 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_not_assessed_effort_counts_as_full_ratio() {
        let mut node = covered_unit();
        risk_reduction(&mut node);
        assert_eq!(node.outputs().te, 0.9);
    }

    #[test]
    fn test_effort_zero_development_figure_faults() {
        let mut node = covered_unit();
        node.test_effort.basis = TestEffortBasis::Budget;
        node.test_effort.budget_test = 10.0;
        assert_eq!(risk_reduction(&mut node), FaultCode::DIVISION_BY_ZERO);
        assert_eq!(node.outputs().te, 1.0);
        // The other sub-factors are still computed.
        assert_eq!(node.outputs().tm, 0.9);
    }

    #[test]
    fn test_method_totals_do_not_wrap() {
        let mut node = covered_unit();
        for pair in node.questionnaire.test_selection.0.iter_mut() {
            *pair = [u32::MAX, 1];
        }
        assert_eq!(risk_reduction(&mut node), FaultCode::OK);
        let out = node.outputs();
        assert_eq!(out.tu, 21 * u64::from(u32::MAX));
        assert_eq!(out.tt, 21);
        assert_eq!(out.tm, 0.9);
    }

    #[test]
    fn test_method_thresholds() {
        assert_eq!(test_method_class(0.8), 0.9);
        assert_eq!(test_method_class(0.75), 1.0);
        assert_eq!(test_method_class(0.5), 1.0);
        assert_eq!(test_method_class(0.49), 1.1);
        assert_eq!(test_method_factor(0, 0), (1.0, FaultCode::DIVISION_BY_ZERO));
    }

    #[test]
    fn test_csci_coverage_uses_units_and_interfaces() {
        let mut node = SoftwareNode::csci(1);
        node.metrics.nm = 4;
        node.metrics.nm_test = 2;
        node.metrics.interfaces = 2;
        node.metrics.interfaces_test = 1;
        assert_eq!(test_coverage_factor(&node), (2.0, FaultCode::OK));
    }

    #[test]
    fn test_coverage_faults_fall_back() {
        let node = SoftwareNode::csci(1);
        assert_eq!(test_coverage_factor(&node), (1.0, FaultCode::DIVISION_BY_ZERO));

        let mut untested = SoftwareNode::unit(2, 1);
        untested.metrics.branches = 3;
        untested.metrics.inputs = 3;
        assert_eq!(
            test_coverage_factor(&untested),
            (1.0, FaultCode::DIVISION_BY_ZERO)
        );

        let system = SoftwareNode::new(1, Level::System);
        assert_eq!(test_coverage_factor(&system), (1.0, FaultCode::OK));
    }

    #[test]
    fn test_reliability_estimation() {
        let mut node = covered_unit();
        node.execution.et = 10.0;
        node.execution.os = 2.0;
        node.execution.ec = 0.2;
        node.execution.dr_test = 5;
        node.execution.test_time = 100.0;
        node.execution.dr_eot = 2;
        node.execution.test_time_eot = 200.0;
        node.outputs_mut().t_risk = 1.0;

        assert_eq!(reliability_estimation_number(&mut node), FaultCode::OK);
        let out = node.outputs();
        assert!((out.ew - 1.25).abs() < 1e-12);
        assert!((out.ev - 1.0).abs() < 1e-12);
        assert!((out.e_risk - 1.25).abs() < 1e-12);
        assert!((out.ren_avg - 0.05 * 0.02).abs() < 1e-12);
        assert!((out.ren_eot - 0.01 * 0.14).abs() < 1e-12);
    }

    #[test]
    fn test_reliability_estimation_traps_each_division() {
        let mut node = SoftwareNode::unit(2, 1);
        node.execution.et = 3.0;
        node.execution.os = 3.0;
        node.outputs_mut().t_risk = 1.0;

        assert_eq!(
            reliability_estimation_number(&mut node),
            FaultCode::DIVISION_BY_ZERO
        );
        let out = node.outputs();
        assert_eq!(out.ew, 1.0);
        assert_eq!(out.ft1, 0.0);
        assert_eq!(out.ft2, 0.0);
        assert_eq!(out.ren_avg, 0.0);
    }
}

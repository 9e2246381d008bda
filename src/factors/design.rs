//! Requirements and design representation factors: anomaly management
//! (`sa`), traceability (`st`) and quality (`sq`). Their product is `s1`.
//!
//! Each worksheet exists only for certain reviews. At any other phase the
//! factor is set to `None` rather than left at a stale value.

use super::fault::{ratio, FaultCode};
use super::phase::ReviewPhase;
use crate::software::questionnaire::{answer, sum_answers};
use crate::software::SoftwareNode;

/// Count ratio-style answers that meet `passes`, recording zero
/// denominators without skipping the remaining checks.
fn count_passing_ratios(
    sheet: &[f64],
    pairs: &[(usize, usize)],
    passes: impl Fn(usize, f64) -> bool,
    fault: &mut FaultCode,
) -> f64 {
    let mut passing = 0.0;
    for (index, &(numerator, denominator)) in pairs.iter().enumerate() {
        match ratio(answer(sheet, numerator), answer(sheet, denominator)) {
            Ok(value) if passes(index, value) => passing += 1.0,
            Ok(_) => {}
            Err(code) => *fault = fault.or(code),
        }
    }
    passing
}

pub fn anomaly_class(am: f64) -> f64 {
    if am < 0.4 {
        0.9
    } else if am > 0.6 {
        1.1
    } else {
        1.0
    }
}

/// Anomaly management risk `sa` (Worksheets 2A and 2B).
///
/// `am` is the fraction of anomaly management techniques *not* in use.
pub fn anomaly_risk(node: &mut SoftwareNode) -> FaultCode {
    let mut fault = FaultCode::OK;
    let am = match node.review_phase() {
        ReviewPhase::RequirementsReview => {
            let sheet = &node.questionnaire.anomaly_management.srr;
            // Items 0-1, 2-3 and 5-6 are count pairs that pass when every
            // counted item is covered.
            let ratios = count_passing_ratios(
                sheet,
                &[(1, 0), (3, 2), (6, 5)],
                |_, value| value == 1.0,
                &mut fault,
            );
            let n_yes = answer(sheet, 4) + sum_answers(sheet, 7..22) + ratios;
            Some((19.0 - n_yes) / 19.0)
        }
        ReviewPhase::PreliminaryDesignReview => {
            let sheet = &node.questionnaire.anomaly_management.pdr;
            let n_yes = sum_answers(sheet, 0..14);
            Some((14.0 - n_yes) / 14.0)
        }
        _ => None,
    };

    let outputs = node.outputs_mut();
    outputs.am = am;
    outputs.sa = am.map(anomaly_class);
    fault
}

/// Requirements traceability risk `st` (Worksheet 3B).
///
/// At the critical design review both traceability answers must be "yes"
/// for the low-risk value.
pub fn traceability_risk(node: &mut SoftwareNode) -> FaultCode {
    let sheets = &node.questionnaire.traceability;
    let traced = match node.review_phase() {
        ReviewPhase::RequirementsReview => Some(answer(&sheets.srr, 0) == 1.0),
        ReviewPhase::PreliminaryDesignReview => Some(answer(&sheets.pdr, 0) == 1.0),
        ReviewPhase::CriticalDesignReview => {
            Some(answer(&sheets.cdr, 0) == 1.0 && answer(&sheets.cdr, 1) == 1.0)
        }
        _ => None,
    };

    node.outputs_mut().st = traced.map(|ok| if ok { 1.0 } else { 1.1 });
    FaultCode::OK
}

pub fn quality_class(dr: f64) -> f64 {
    if dr < 0.5 {
        1.1
    } else {
        1.0
    }
}

/// Software quality risk `sq` (Worksheet 4A).
///
/// `dr` is the fraction of "no" answers over a 25-item basis at the
/// requirements review and a 19-item basis at the preliminary design review.
pub fn quality_risk(node: &mut SoftwareNode) -> FaultCode {
    let mut fault = FaultCode::OK;
    let dr = match node.review_phase() {
        ReviewPhase::RequirementsReview => {
            let sheet = &node.questionnaire.software_quality.srr;
            let ratios = count_passing_ratios(
                sheet,
                &[(9, 8), (11, 10)],
                |_, value| value == 1.0,
                &mut fault,
            );
            let n_yes = sum_answers(sheet, 0..8) + sum_answers(sheet, 12..27) + ratios;
            Some((25.0 - n_yes) / 25.0)
        }
        ReviewPhase::PreliminaryDesignReview => {
            let sheet = &node.questionnaire.software_quality.pdr;
            // First check compares item 3 with the sum of items 2 and 3.
            let mut ratios = match ratio(answer(sheet, 3), answer(sheet, 2) + answer(sheet, 3)) {
                Ok(value) if value <= 0.3 => 1.0,
                Ok(_) => 0.0,
                Err(code) => {
                    fault = fault.or(code);
                    0.0
                }
            };
            ratios += count_passing_ratios(
                sheet,
                &[(7, 6), (9, 8), (11, 10), (15, 14)],
                |i, value| if i == 3 { value > 0.75 } else { value > 0.5 },
                &mut fault,
            );
            let n_yes = sum_answers(sheet, 0..2)
                + sum_answers(sheet, 4..6)
                + sum_answers(sheet, 12..14)
                + sum_answers(sheet, 16..24)
                + ratios;
            Some((19.0 - n_yes) / 19.0)
        }
        _ => None,
    };

    let outputs = node.outputs_mut();
    outputs.dr = dr;
    outputs.sq = dr.map(quality_class);
    fault
}

//! Application and development environment risk (`a_risk`, `d_risk`).

use super::fault::FaultCode;
use crate::software::{SoftwareNode, DEVELOPMENT_ITEMS};

/// RL-TR-92-52 application categories, indexed by `application_id - 1`.
const APPLICATION_NAMES: [&str; 18] = [
    "Batch (General)",
    "Event Control",
    "Process Control",
    "Procedure Control",
    "Navigation",
    "Flight Dynamics",
    "Orbital Dynamics",
    "Message Processing",
    "Diagnostics",
    "Sensor and Signal Processing",
    "Simulation",
    "Database Management",
    "Data Acquisition",
    "Data Presentation",
    "Decision and Planning Aids",
    "Pattern and Image Processing",
    "System Software",
    "Development Tools",
];

pub fn application_name(application_id: u8) -> Option<&'static str> {
    usize::from(application_id)
        .checked_sub(1)
        .and_then(|index| APPLICATION_NAMES.get(index).copied())
}

/// Relative risk of an application category against Process Control.
///
/// | class  | value | application ids          |
/// |--------|-------|--------------------------|
/// | high   | 3.0   | 5 6 7 11 16 17 18        |
/// | medium | 2.0   | 4 8 9 10 12 13 14 15     |
/// | low    | 1.0   | any other non-zero id    |
/// | none   | 0.0   | 0 (not assessed)         |
pub fn application_class(application_id: u8) -> f64 {
    match application_id {
        0 => 0.0,
        5 | 6 | 7 | 11 | 16 | 17 | 18 => 3.0,
        4 | 8 | 9 | 10 | 12 | 13 | 14 | 15 => 2.0,
        _ => 1.0,
    }
}

/// Application risk `a_risk`. Never faults.
pub fn application_risk(node: &mut SoftwareNode) -> FaultCode {
    node.outputs_mut().a_risk = application_class(node.application_id);
    FaultCode::OK
}

/// Development environment bucket for the fraction of practices in use.
///
/// Boundaries belong to the medium bucket.
pub fn development_class(dc: f64) -> f64 {
    if dc < 0.5 {
        2.0
    } else if dc > 0.9 {
        0.5
    } else {
        1.0
    }
}

/// Development environment risk `d_risk` from Worksheet 1B. Never faults.
pub fn development_risk(node: &mut SoftwareNode) -> FaultCode {
    let dc = f64::from(node.questionnaire.development_yes()) / DEVELOPMENT_ITEMS as f64;
    let outputs = node.outputs_mut();
    outputs.dc = dc;
    outputs.d_risk = development_class(dc);
    FaultCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with_practices(yes: usize) -> SoftwareNode {
        let mut node = SoftwareNode::csci(1);
        for answer in node.questionnaire.development.iter_mut().take(yes) {
            *answer = 1;
        }
        node
    }

    #[test]
    fn test_application_table() {
        for id in [5, 6, 7, 11, 16, 17, 18] {
            assert_eq!(application_class(id), 3.0, "id {}", id);
        }
        for id in [4, 8, 9, 10, 12, 13, 14, 15] {
            assert_eq!(application_class(id), 2.0, "id {}", id);
        }
        for id in [1, 2, 3, 19, 200] {
            assert_eq!(application_class(id), 1.0, "id {}", id);
        }
        assert_eq!(application_class(0), 0.0);
    }

    #[test]
    fn test_application_risk_writes_output() {
        let mut node = SoftwareNode::csci(1);
        node.application_id = 6;
        assert_eq!(application_risk(&mut node), FaultCode::OK);
        assert_eq!(node.outputs().a_risk, 3.0);
    }

    #[test]
    fn test_application_names() {
        assert_eq!(application_name(0), None);
        assert_eq!(application_name(3), Some("Process Control"));
        assert_eq!(application_name(18), Some("Development Tools"));
        assert_eq!(application_name(19), None);
    }

    #[test]
    fn test_development_buckets() {
        let cases = [(39, 0.5), (15, 2.0), (25, 1.0), (43, 0.5), (0, 2.0)];
        for (yes, expected) in cases {
            let mut node = node_with_practices(yes);
            assert_eq!(development_risk(&mut node), FaultCode::OK);
            assert_eq!(node.outputs().d_risk, expected, "{} practices", yes);
        }
    }

    #[test]
    fn test_development_boundaries_are_medium() {
        assert_eq!(development_class(0.5), 1.0);
        assert_eq!(development_class(0.9), 1.0);
        assert_eq!(development_class(0.4999), 2.0);
        assert_eq!(development_class(0.9001), 0.5);
    }

    #[test]
    fn test_development_fraction_is_recorded() {
        let mut node = node_with_practices(39);
        development_risk(&mut node);
        assert!((node.outputs().dc - 39.0 / 43.0).abs() < 1e-12);
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::factors::{FaultCode, RiskFactor};
use crate::software::SoftwareId;

/// Outcome of one factor evaluation on one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorFault {
    pub factor: RiskFactor,
    pub code: FaultCode,
}

impl FactorFault {
    pub fn new(factor: RiskFactor, code: FaultCode) -> Self {
        Self { factor, code }
    }

    pub fn is_fault(&self) -> bool {
        !self.code.is_ok()
    }
}

/// What a calculation visited and which factors fell back.
///
/// `faults` holds one entry per evaluated factor per node, including the
/// ones that succeeded, so callers can see exactly which factors ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    /// Nodes in completion order; children always precede their parent.
    pub order: Vec<SoftwareId>,
    pub faults: BTreeMap<SoftwareId, Vec<FactorFault>>,
}

impl CalculationReport {
    pub(crate) fn record(&mut self, id: SoftwareId, evaluations: Vec<FactorFault>) {
        self.order.push(id);
        self.faults.insert(id, evaluations);
    }

    pub(crate) fn merge(&mut self, other: CalculationReport) {
        self.order.extend(other.order);
        self.faults.extend(other.faults);
    }

    /// Per-factor codes for a node, in evaluation order. Empty when the node
    /// was not part of the calculation.
    pub fn error_codes(&self, id: SoftwareId) -> Vec<u32> {
        self.evaluations(id).iter().map(|f| f.code.code()).collect()
    }

    pub fn evaluations(&self, id: SoftwareId) -> &[FactorFault] {
        self.faults.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Factors that fell back on a node.
    pub fn faults_for(&self, id: SoftwareId) -> Vec<FactorFault> {
        self.evaluations(id)
            .iter()
            .copied()
            .filter(FactorFault::is_fault)
            .collect()
    }

    /// Nodes with at least one non-zero code, in id order.
    pub fn faulted_nodes(&self) -> Vec<SoftwareId> {
        self.faults
            .iter()
            .filter(|(_, evaluations)| evaluations.iter().any(FactorFault::is_fault))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn has_faults(&self) -> bool {
        self.faults
            .values()
            .any(|evaluations| evaluations.iter().any(FactorFault::is_fault))
    }

    pub fn fault_count(&self) -> usize {
        self.faults
            .values()
            .map(|evaluations| evaluations.iter().filter(|f| f.is_fault()).count())
            .sum()
    }
}

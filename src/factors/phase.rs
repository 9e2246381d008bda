use serde::{Deserialize, Serialize};

/// Every risk factor the calculation evaluates, for fault attribution and
/// the phase applicability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// `a_risk`
    Application,
    /// `d_risk`
    Development,
    /// `sa`
    AnomalyManagement,
    /// `st`
    Traceability,
    /// `sq`
    Quality,
    /// `sl`
    LanguageType,
    /// `sx`
    Complexity,
    /// `sm`
    Modularity,
    /// `sr`
    StandardsReview,
    /// `t_risk = te * tm * tc`
    RiskReduction,
    /// `ren_avg`, `ren_eot`
    ReliabilityEstimation,
}

impl RiskFactor {
    /// Name of the output field the factor writes.
    pub fn symbol(self) -> &'static str {
        match self {
            RiskFactor::Application => "a_risk",
            RiskFactor::Development => "d_risk",
            RiskFactor::AnomalyManagement => "sa",
            RiskFactor::Traceability => "st",
            RiskFactor::Quality => "sq",
            RiskFactor::LanguageType => "sl",
            RiskFactor::Complexity => "sx",
            RiskFactor::Modularity => "sm",
            RiskFactor::StandardsReview => "sr",
            RiskFactor::RiskReduction => "t_risk",
            RiskFactor::ReliabilityEstimation => "ren",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Lifecycle review at which questionnaire answers were collected.
///
/// Only some factors are meaningful at each review; see
/// [`ReviewPhase::applicable_factors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPhase {
    /// Software requirements review, `phase_id` 2.
    RequirementsReview,
    /// Preliminary design review, `phase_id` 3.
    PreliminaryDesignReview,
    /// Critical design review, `phase_id` 4.
    CriticalDesignReview,
    /// Test readiness review, `phase_id` 5.
    TestReadinessReview,
    /// Any other `phase_id`, including 0 (unset).
    Other(u8),
}

const REQUIREMENTS_FACTORS: &[RiskFactor] = &[RiskFactor::AnomalyManagement, RiskFactor::Quality];
const PRELIMINARY_DESIGN_FACTORS: &[RiskFactor] = &[
    RiskFactor::AnomalyManagement,
    RiskFactor::Quality,
    RiskFactor::Traceability,
];
const CRITICAL_DESIGN_FACTORS: &[RiskFactor] =
    &[RiskFactor::Traceability, RiskFactor::LanguageType];
const TEST_READINESS_FACTORS: &[RiskFactor] = &[RiskFactor::LanguageType];

/// Factors gated by review phase. Everything else is evaluated at every
/// phase.
pub const PHASE_GATED_FACTORS: &[RiskFactor] = &[
    RiskFactor::AnomalyManagement,
    RiskFactor::Traceability,
    RiskFactor::Quality,
    RiskFactor::LanguageType,
];

impl ReviewPhase {
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => ReviewPhase::RequirementsReview,
            3 => ReviewPhase::PreliminaryDesignReview,
            4 => ReviewPhase::CriticalDesignReview,
            5 => ReviewPhase::TestReadinessReview,
            other => ReviewPhase::Other(other),
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            ReviewPhase::RequirementsReview => 2,
            ReviewPhase::PreliminaryDesignReview => 3,
            ReviewPhase::CriticalDesignReview => 4,
            ReviewPhase::TestReadinessReview => 5,
            ReviewPhase::Other(code) => code,
        }
    }

    /// Phase-gated factors evaluated at this review.
    pub fn applicable_factors(self) -> &'static [RiskFactor] {
        match self {
            ReviewPhase::RequirementsReview => REQUIREMENTS_FACTORS,
            ReviewPhase::PreliminaryDesignReview => PRELIMINARY_DESIGN_FACTORS,
            ReviewPhase::CriticalDesignReview => CRITICAL_DESIGN_FACTORS,
            ReviewPhase::TestReadinessReview => TEST_READINESS_FACTORS,
            ReviewPhase::Other(_) => &[],
        }
    }

    pub fn applies(self, factor: RiskFactor) -> bool {
        !PHASE_GATED_FACTORS.contains(&factor) || self.applicable_factors().contains(&factor)
    }

    pub fn name(self) -> &'static str {
        match self {
            ReviewPhase::RequirementsReview => "Requirements Review",
            ReviewPhase::PreliminaryDesignReview => "Preliminary Design Review",
            ReviewPhase::CriticalDesignReview => "Critical Design Review",
            ReviewPhase::TestReadinessReview => "Test Readiness Review",
            ReviewPhase::Other(_) => "Other",
        }
    }

    /// The four reviews that gate factors, in lifecycle order.
    pub fn reviews() -> [ReviewPhase; 4] {
        [
            ReviewPhase::RequirementsReview,
            ReviewPhase::PreliminaryDesignReview,
            ReviewPhase::CriticalDesignReview,
            ReviewPhase::TestReadinessReview,
        ]
    }
}

impl std::fmt::Display for ReviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewPhase::Other(code) => write!(f, "Other ({})", code),
            phase => write!(f, "{}", phase.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicability_table() {
        use RiskFactor::*;
        let table: Vec<(u8, &[RiskFactor])> = vec![
            (2, &[AnomalyManagement, Quality][..]),
            (3, &[AnomalyManagement, Quality, Traceability][..]),
            (4, &[Traceability, LanguageType][..]),
            (5, &[LanguageType][..]),
            (0, &[][..]),
            (1, &[][..]),
            (6, &[][..]),
        ];
        for (code, expected) in table {
            assert_eq!(
                ReviewPhase::from_code(code).applicable_factors(),
                expected,
                "phase_id {}",
                code
            );
        }
    }

    #[test]
    fn test_ungated_factors_apply_everywhere() {
        for code in 0..8 {
            let phase = ReviewPhase::from_code(code);
            assert!(phase.applies(RiskFactor::Application));
            assert!(phase.applies(RiskFactor::Complexity));
            assert!(phase.applies(RiskFactor::RiskReduction));
        }
        assert!(!ReviewPhase::TestReadinessReview.applies(RiskFactor::Quality));
        assert!(ReviewPhase::CriticalDesignReview.applies(RiskFactor::Traceability));
    }

    #[test]
    fn test_phase_codes_round_trip() {
        for code in 0..10u8 {
            assert_eq!(ReviewPhase::from_code(code).code(), code);
        }
    }
}

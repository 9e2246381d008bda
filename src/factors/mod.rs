//! RL-TR-92-52 software risk factors.
//!
//! Every factor function takes a [`SoftwareNode`](crate::software::SoftwareNode),
//! writes its outputs in place and returns a [`FaultCode`]. A non-zero code
//! means a fallback value was used; it never stops the calculation.
//!
//! The factors group into:
//! - [`baseline`]: application (`a_risk`) and development environment (`d_risk`)
//! - [`design`]: anomaly management, traceability and quality, combined into `s1`
//! - [`implementation`]: language type, complexity, modularity and standards
//!   review, combined into `s2`
//! - [`testing`]: test risk reduction (`t_risk`) and the reliability estimation numbers

pub mod baseline;
pub mod design;
pub mod fault;
pub mod implementation;
pub mod phase;
pub mod testing;

pub use baseline::{application_name, application_risk, development_risk};
pub use design::{anomaly_risk, quality_risk, traceability_risk};
pub use fault::FaultCode;
pub use implementation::{
    complexity_risk, language_type_risk, modularity_risk, standards_review_risk, HistogramBins,
    ModuleHistogram, COMPLEXITY_FALLBACK, LANGUAGE_FALLBACK, MODULARITY_FALLBACK,
};
pub use phase::{ReviewPhase, RiskFactor, PHASE_GATED_FACTORS};
pub use testing::{reliability_estimation_number, risk_reduction, REN_AVG_WEIGHT, REN_EOT_WEIGHT};

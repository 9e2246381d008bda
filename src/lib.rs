//! Software reliability risk model after RL-TR-92-52.
//!
//! A project is a tree of Units, CSCIs and Systems ([`software`]). Each item
//! carries questionnaire answers and structural metrics; [`calculate`] walks
//! the tree bottom-up, evaluates the [`factors`] for every item and combines
//! them into the reliability prediction figure of merit
//! `rpfom = a_risk * d_risk * s1 * s2` and the reliability estimation
//! numbers.
//!
//! ```
//! use swrisk::{calculate, CalculationOptions, SoftwareId, SoftwareNode, SoftwareTree};
//!
//! let mut tree = SoftwareTree::new();
//! tree.insert(SoftwareNode::csci(1)).unwrap();
//! tree.insert(SoftwareNode::unit(2, 1)).unwrap();
//!
//! let report = calculate(&mut tree, SoftwareId::new(1), &CalculationOptions::default()).unwrap();
//! assert_eq!(report.order, vec![SoftwareId::new(2), SoftwareId::new(1)]);
//! assert!(tree.get(SoftwareId::new(1)).unwrap().is_calculated());
//! ```

pub mod calculate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod factors;
pub mod io;
pub mod project;
pub mod software;

pub use crate::calculate::{
    calculate, calculate_all, CalculationOptions, CalculationReport, FactorFault,
};
pub use crate::config::{load_config, load_config_from_path, SwRiskConfig};
pub use crate::error::{Result, SwRiskError};
pub use crate::factors::{FaultCode, HistogramBins, ReviewPhase, RiskFactor};
pub use crate::io::output::{create_writer, CalculationSummary, OutputFormat, OutputWriter};
pub use crate::project::{load_project, ProjectFile};
pub use crate::software::{
    Level, Questionnaire, RiskOutputs, SoftwareId, SoftwareNode, SoftwareTree, StructuralMetrics,
};

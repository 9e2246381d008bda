//! Software decomposition data model.
//!
//! A project is a tree of [`SoftwareNode`]s: Systems and CSCIs (Computer
//! Software Configuration Items) aggregate other CSCIs and Units, Units are
//! leaves. Nodes carry the RL-TR-92-52 questionnaire answers and structural
//! metrics as inputs and the computed risk multipliers as outputs.
//!
//! The tree itself lives in [`SoftwareTree`], an arena keyed by
//! [`SoftwareId`] with explicit child lists.

pub mod node;
pub mod questionnaire;
pub mod tree;

pub use node::{
    ExecutionProfile, RiskOutputs, SoftwareNode, StructuralMetrics, TestEffortBasis,
    TestEffortInputs,
};
pub use questionnaire::{
    AnomalyManagement, Questionnaire, SoftwareQuality, StandardsReview, TestSelection,
    Traceability, DEVELOPMENT_ITEMS,
};
pub use tree::SoftwareTree;

use serde::{Deserialize, Serialize};

/// Identifier of a Unit, CSCI or System, unique within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoftwareId(pub u32);

impl SoftwareId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SoftwareId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SoftwareId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Indenture level of a software item.
///
/// The numeric codes match the historical `level_id` column: 1 = System,
/// 2 = CSCI (called "Module" by the test coverage worksheet), 3 = Unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    System,
    #[default]
    Csci,
    Unit,
}

impl Level {
    pub const fn code(self) -> u8 {
        match self {
            Level::System => 1,
            Level::Csci => 2,
            Level::Unit => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Level::System),
            2 => Some(Level::Csci),
            3 => Some(Level::Unit),
            _ => None,
        }
    }

    /// Whether items at this level may own children.
    pub fn is_aggregate(self) -> bool {
        !matches!(self, Level::Unit)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::System => "System",
            Level::Csci => "CSCI",
            Level::Unit => "Unit",
        };
        write!(f, "{}", name)
    }
}

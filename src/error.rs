//! Structural errors for swrisk operations.
//!
//! Numeric faults raised while evaluating risk factors are *not* errors:
//! they are recorded as [`FaultCode`](crate::factors::FaultCode) values and
//! the calculation continues. `SwRiskError` covers the cases where there is
//! nothing sensible to compute: a malformed tree, an unreadable project or
//! configuration file.

use std::path::PathBuf;

use thiserror::Error;

use crate::software::SoftwareId;

#[derive(Debug, Error)]
pub enum SwRiskError {
    #[error("software item {0} does not exist")]
    UnknownNode(SoftwareId),

    #[error("software item {0} is defined more than once")]
    DuplicateNode(SoftwareId),

    #[error("software item {id} refers to missing parent {parent}")]
    UnknownParent { id: SoftwareId, parent: SoftwareId },

    #[error("software item {id} cannot be a child of unit {parent}")]
    LeafParent { id: SoftwareId, parent: SoftwareId },

    #[error("software item {0} is part of a parent cycle")]
    Cycle(SoftwareId),

    #[error("software item {id}: {sheet} has {actual} answers, expected {expected}")]
    QuestionnaireLength {
        id: SoftwareId,
        sheet: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("configuration error{}: {message}", display_path(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("project file error{}: {message}", display_path(.path))]
    Project {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl SwRiskError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn project(message: impl Into<String>) -> Self {
        Self::Project {
            message: message.into(),
            path: None,
        }
    }

    pub fn project_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Project {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SwRiskError>;

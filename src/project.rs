//! Project documents: a flat list of software items with parent links.
//!
//! ```toml
//! revision_id = 1
//!
//! [[nodes]]
//! software_id = 1
//! level = "csci"
//! description = "Flight software"
//! application_id = 6
//! phase_id = 4
//!
//! [[nodes]]
//! software_id = 2
//! parent_id = 1
//! level = "unit"
//! metrics = { sloc = 1000, aloc = 200, complexity = 12 }
//! ```
//!
//! JSON documents use the same shape. Omitted questionnaire sheets default to
//! all-"no" answers of the correct length.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwRiskError};
use crate::io;
use crate::software::{SoftwareNode, SoftwareTree};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub revision_id: u32,
    #[serde(default)]
    pub nodes: Vec<SoftwareNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Toml,
    Json,
}

impl ProjectFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ProjectFormat::Json,
            _ => ProjectFormat::Toml,
        }
    }
}

impl ProjectFile {
    pub fn parse(contents: &str, format: ProjectFormat) -> Result<Self> {
        match format {
            ProjectFormat::Toml => {
                toml::from_str(contents).map_err(|e| SwRiskError::project(e.to_string()))
            }
            ProjectFormat::Json => {
                serde_json::from_str(contents).map_err(|e| SwRiskError::project(e.to_string()))
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = io::read_file(path)?;
        Self::parse(&contents, ProjectFormat::from_path(path)).map_err(|e| match e {
            SwRiskError::Project { message, .. } => SwRiskError::project_with_path(message, path),
            other => other,
        })
    }

    /// Build the tree and check every questionnaire sheet length.
    pub fn into_tree(self) -> Result<SoftwareTree> {
        let tree = SoftwareTree::from_nodes(self.nodes)?;
        tree.validate()?;
        Ok(tree)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SwRiskError::project(e.to_string()))
    }
}

/// Load a project file and build its tree.
pub fn load_project(path: &Path) -> Result<SoftwareTree> {
    ProjectFile::load(path)?.into_tree().map_err(|e| {
        log::debug!("Rejected project {}: {}", path.display(), e);
        e
    })
}

pub mod output;

pub use output::{
    create_writer, CalculationSummary, JsonWriter, MarkdownWriter, NodeSummary, OutputFormat,
    OutputWriter, TerminalWriter,
};

use std::fs;
use std::path::Path;

use crate::error::{Result, SwRiskError};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| SwRiskError::io(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| SwRiskError::io(path, e))
}

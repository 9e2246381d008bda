use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::calculate::{calculate, calculate_all};
use crate::config::{load_config, load_config_from_path, SwRiskConfig};
use crate::io::{create_writer, CalculationSummary, OutputFormat};
use crate::project::load_project;
use crate::software::SoftwareId;

/// Arguments of `swrisk calculate`.
#[derive(Debug, Clone)]
pub struct CalculateConfig {
    pub project: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub root: Option<u32>,
    pub standards_review: bool,
}

fn resolve_settings(config: &CalculateConfig) -> Result<SwRiskConfig> {
    match &config.config {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_config()),
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

/// Load, calculate and report. Numeric faults are part of the report and do
/// not fail the command.
pub fn handle_calculate(config: CalculateConfig) -> Result<()> {
    let settings = resolve_settings(&config)?;
    match (settings.output.use_color, config.output.is_some()) {
        (_, true) => colored::control::set_override(false),
        (Some(use_color), false) => colored::control::set_override(use_color),
        (None, false) => {}
    }

    let mut options = settings.to_options();
    options.include_standards_review |= config.standards_review;

    let mut tree = load_project(&config.project)
        .with_context(|| format!("Failed to load project {}", config.project.display()))?;

    let report = match config.root {
        Some(root) => calculate(&mut tree, SoftwareId::new(root), &options)?,
        None => calculate_all(&mut tree, &options)?,
    };
    if report.has_faults() {
        log::info!(
            "{} factor(s) used fallback values on {} item(s)",
            report.fault_count(),
            report.faulted_nodes().len()
        );
    }

    let summary = CalculationSummary::new(&tree, &report);
    let format = config.format.unwrap_or(settings.output.default_format);
    let mut writer = create_writer(format, open_output(config.output.as_ref())?);
    writer.write_summary(&summary)?;
    Ok(())
}

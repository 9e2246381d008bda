use std::collections::BTreeMap;
use std::io::Write;

use colored::*;
use serde::{Deserialize, Serialize};

use crate::calculate::{CalculationReport, FactorFault};
use crate::factors::application_name;
use crate::software::{Level, RiskOutputs, SoftwareId, SoftwareTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

/// One calculated item as it appears in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub software_id: SoftwareId,
    pub parent_id: Option<SoftwareId>,
    pub level: Level,
    pub label: String,
    /// Application category name, when assessed.
    pub application: Option<&'static str>,
    pub phase: String,
    pub outputs: RiskOutputs,
}

/// Calculated items in completion order plus every non-zero fault.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationSummary {
    pub nodes: Vec<NodeSummary>,
    pub faults: BTreeMap<SoftwareId, Vec<FactorFault>>,
    pub fault_count: usize,
}

impl CalculationSummary {
    pub fn new(tree: &SoftwareTree, report: &CalculationReport) -> Self {
        let nodes = report
            .order
            .iter()
            .filter_map(|id| tree.get(*id))
            .map(|node| NodeSummary {
                software_id: node.software_id,
                parent_id: node.parent_id,
                level: node.level,
                label: node.label(),
                application: application_name(node.application_id),
                phase: node.review_phase().to_string(),
                outputs: node.outputs().clone(),
            })
            .collect();

        let faults = report
            .faulted_nodes()
            .into_iter()
            .map(|id| (id, report.faults_for(id)))
            .collect();

        Self {
            nodes,
            faults,
            fault_count: report.fault_count(),
        }
    }

    fn parent_map(&self) -> ParentMap {
        self.nodes
            .iter()
            .map(|n| (n.software_id, n.parent_id))
            .collect()
    }
}

type ParentMap = BTreeMap<SoftwareId, Option<SoftwareId>>;

/// Number of reported ancestors above `node`, for indentation.
fn depth(parents: &ParentMap, node: &NodeSummary) -> usize {
    std::iter::successors(node.parent_id, |id| parents.get(id).copied().flatten())
        .take_while(|id| parents.contains_key(id))
        .count()
}

/// Escape a value for use inside a Markdown table cell.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

pub trait OutputWriter {
    fn write_summary(&mut self, summary: &CalculationSummary) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_summary(&mut self, summary: &CalculationSummary) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(summary)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_summary(&mut self, summary: &CalculationSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "# Software Reliability Risk Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| ID | Item | Level | Phase | A | D | S1 | S2 | RPFOM | T | REN avg | REN eot |"
        )?;
        writeln!(
            self.writer,
            "|----|------|-------|-------|---|---|----|----|-------|---|---------|---------|"
        )?;
        for node in &summary.nodes {
            let o = &node.outputs;
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {:.2} | {:.2} | {:.3} | {:.3} | {:.4} | {:.3} | {:.6} | {:.6} |",
                node.software_id,
                table_cell(&node.label),
                node.level,
                node.phase,
                o.a_risk,
                o.d_risk,
                o.s1,
                o.s2,
                o.rpfom,
                o.t_risk,
                o.ren_avg,
                o.ren_eot
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Numeric Faults")?;
        writeln!(self.writer)?;
        if summary.faults.is_empty() {
            writeln!(self.writer, "None.")?;
        }
        for (id, faults) in &summary.faults {
            for fault in faults {
                writeln!(
                    self.writer,
                    "- item {}: `{}` code {}",
                    id, fault.factor, fault.code
                )?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Colored tree view for interactive use.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_node(&mut self, node: &NodeSummary, depth: usize) -> anyhow::Result<()> {
        let o = &node.outputs;
        let indent = "  ".repeat(depth);
        let context = match node.application {
            Some(application) => format!("({}, {}, {})", node.level, application, node.phase),
            None => format!("({}, {})", node.level, node.phase),
        };
        writeln!(
            self.writer,
            "{}{} {} {}",
            indent,
            format!("[{}]", node.software_id).dimmed(),
            node.label.bold(),
            context.dimmed()
        )?;
        writeln!(
            self.writer,
            "{}  RPFOM {}  A {:.2}  D {:.2}  S1 {:.3}  S2 {:.3}",
            indent,
            rpfom_colored(o.rpfom),
            o.a_risk,
            o.d_risk,
            o.s1,
            o.s2
        )?;
        writeln!(
            self.writer,
            "{}  T {:.3}  E {:.3}  REN avg {:.6}  eot {:.6}",
            indent, o.t_risk, o.e_risk, o.ren_avg, o.ren_eot
        )?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_summary(&mut self, summary: &CalculationSummary) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            "Software Reliability Risk Report".bold().blue()
        )?;
        writeln!(self.writer, "{}", "=".repeat(32).blue())?;

        // Completion order puts children first; print parents first.
        let parents = summary.parent_map();
        for node in summary.nodes.iter().rev() {
            self.write_node(node, depth(&parents, node))?;
        }

        writeln!(self.writer)?;
        if summary.fault_count == 0 {
            writeln!(self.writer, "{} no numeric faults", "✓".green())?;
        } else {
            writeln!(
                self.writer,
                "{} {} numeric fault(s), fallback values used:",
                "!".yellow().bold(),
                summary.fault_count
            )?;
            for (id, faults) in &summary.faults {
                let codes: Vec<String> = faults
                    .iter()
                    .map(|f| format!("{}={}", f.factor, f.code))
                    .collect();
                writeln!(self.writer, "  item {}: {}", id, codes.join(", ").yellow())?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn rpfom_colored(rpfom: f64) -> ColoredString {
    let text = format!("{:.4}", rpfom);
    if rpfom > 2.0 {
        text.red().bold()
    } else if rpfom > 1.0 {
        text.yellow()
    } else {
        text.green()
    }
}

pub fn create_writer(format: OutputFormat, out: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::{calculate, CalculationOptions};
    use crate::software::SoftwareNode;

    fn summary() -> CalculationSummary {
        let mut tree = SoftwareTree::new();
        let mut csci = SoftwareNode::csci(1).with_description("Flight software");
        csci.application_id = 6;
        tree.insert(csci).unwrap();
        tree.insert(SoftwareNode::unit(2, 1)).unwrap();
        let report = calculate(&mut tree, SoftwareId::new(1), &CalculationOptions::default())
            .unwrap();
        CalculationSummary::new(&tree, &report)
    }

    #[test]
    fn test_summary_follows_completion_order() {
        let summary = summary();
        let ids: Vec<_> = summary.nodes.iter().map(|n| n.software_id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
        let parents = summary.parent_map();
        assert_eq!(depth(&parents, &summary.nodes[0]), 1);
        assert_eq!(depth(&parents, &summary.nodes[1]), 0);
    }

    #[test]
    fn test_depth_ignores_unreported_ancestors() {
        let mut summary = summary();
        summary.nodes.remove(1);
        let parents = summary.parent_map();
        assert_eq!(depth(&parents, &summary.nodes[0]), 0);
    }

    /// Accepts every write but fails to flush, like a full disk behind a
    /// `BufWriter`.
    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_writers_report_flush_errors() {
        let summary = summary();
        for format in [OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Terminal] {
            let mut writer = create_writer(format, Box::new(FailingFlush));
            let err = writer.write_summary(&summary).unwrap_err();
            assert!(err.to_string().contains("disk full"), "{:?}", format);
        }
    }

    #[test]
    fn test_markdown_escapes_pipes_in_labels() {
        let mut tree = SoftwareTree::new();
        tree.insert(SoftwareNode::csci(1).with_description("Guidance | Control"))
            .unwrap();
        let report = calculate(&mut tree, SoftwareId::new(1), &CalculationOptions::default())
            .unwrap();
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_summary(&CalculationSummary::new(&tree, &report))
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let row = text.lines().find(|l| l.starts_with("| 1 |")).unwrap();
        assert!(row.contains("| Guidance \\| Control |"));
        // Same cell count as the header row.
        let cells = |line: &str| line.replace("\\|", "").matches('|').count();
        let header = text.lines().find(|l| l.starts_with("| ID |")).unwrap();
        assert_eq!(cells(row), cells(header));
    }

    #[test]
    fn test_json_writer_emits_outputs_and_faults() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_summary(&summary())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["nodes"][1]["label"], "Flight software");
        assert_eq!(value["nodes"][1]["outputs"]["calculated"], true);
        assert_eq!(value["nodes"][1]["application"], "Flight Dynamics");
        assert!(value["nodes"][0]["application"].is_null());
        // Empty CSCI has no coverage or effort figures.
        assert!(value["fault_count"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_markdown_writer_has_row_per_node() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_summary(&summary())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("| 1 | Flight software | CSCI |"));
        assert!(text.contains("| 2 | Unit 2 | Unit |"));
        assert!(text.contains("## Numeric Faults"));
    }

    #[test]
    fn test_terminal_writer_prints_parents_first() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_summary(&summary())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let parent = text.find("Flight software").unwrap();
        let child = text.find("Unit 2").unwrap();
        assert!(parent < child);
        assert!(text.contains("(CSCI, Flight Dynamics,"));
        assert!(text.contains("numeric fault(s)"));
    }
}

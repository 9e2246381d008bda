use std::io::Write;

use anyhow::Result;

use crate::factors::{ReviewPhase, PHASE_GATED_FACTORS};

/// Write the phase applicability table, one row per gating review.
pub fn write_phase_table(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<9} {:<27} factors evaluated", "phase_id", "review")?;
    for phase in ReviewPhase::reviews() {
        let factors: Vec<&str> = phase
            .applicable_factors()
            .iter()
            .map(|factor| factor.symbol())
            .collect();
        writeln!(
            out,
            "{:<9} {:<27} {}",
            phase.code(),
            phase.name(),
            factors.join(", ")
        )?;
    }
    let gated: Vec<&str> = PHASE_GATED_FACTORS.iter().map(|f| f.symbol()).collect();
    writeln!(
        out,
        "{:<9} {:<27} none of {}",
        "other",
        "-",
        gated.join(", ")
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_review() {
        let mut buffer = Vec::new();
        write_phase_table(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("2 "));
        assert!(lines[1].ends_with("sa, sq"));
        assert!(lines[2].ends_with("sa, sq, st"));
        assert!(lines[3].ends_with("st, sl"));
        assert!(lines[4].ends_with("sl"));
        assert!(lines[5].starts_with("other"));
    }
}

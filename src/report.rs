//! Human-readable policy dumps.

use std::fmt;

/// One arm's line in a [`Report`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportRow {
    pub id: String,
    /// What `value` measures, e.g. "Performance".
    pub label: String,
    pub value: f64,
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier: {} {}: {:.6}", self.id, self.label, self.value)
    }
}

/// Snapshot of a policy's per-arm standing.
///
/// Rendering frames each row between dashed rules as wide as the row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub header: String,
    pub rows: Vec<ReportRow>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for row in &self.rows {
            let line = row.to_string();
            let rule = "-".repeat(line.chars().count());
            writeln!(f, "{rule}")?;
            writeln!(f, "{line}")?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_framed_by_matching_rules() {
        let r = Report {
            header: "Epsilon: 0.3".into(),
            rows: vec![ReportRow {
                id: "a".into(),
                label: "Performance".into(),
                value: 2.5,
            }],
        };
        let text = r.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Epsilon: 0.3");
        assert_eq!(lines[2], "Identifier: a Performance: 2.500000");
        assert_eq!(lines[1].len(), lines[2].len());
        assert_eq!(lines[1], lines[3]);
        assert!(lines[1].chars().all(|c| c == '-'));
    }
}

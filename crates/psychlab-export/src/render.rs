//! The line contract for `fullReport`.
//!
//! Each line is one block. A line that starts (at column 0) with `# `, `## `
//! or `### ` is a heading of level 1, 2 or 3; every other line, blank lines
//! included, is a paragraph. The prompt in `psychlab-bedrock` asks for
//! exactly this markup.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
}

pub fn parse_report(full_report: &str) -> Vec<ReportBlock> {
    full_report.lines().map(parse_line).collect()
}

pub fn parse_line(line: &str) -> ReportBlock {
    if let Some(text) = line.strip_prefix("### ") {
        heading(3, text)
    } else if let Some(text) = line.strip_prefix("## ") {
        heading(2, text)
    } else if let Some(text) = line.strip_prefix("# ") {
        heading(1, text)
    } else {
        ReportBlock::Paragraph {
            text: line.to_string(),
        }
    }
}

fn heading(level: u8, text: &str) -> ReportBlock {
    ReportBlock::Heading {
        level,
        text: text.to_string(),
    }
}

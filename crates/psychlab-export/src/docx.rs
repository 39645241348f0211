use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use psychlab_core::models::report::LabReport;

use crate::error::ExportError;
use crate::render::{ReportBlock, parse_report};
use crate::styles::DocumentStyles;

/// Generate a DOCX document for a report.
///
/// The letterhead, patient profile and executive summary come first, then
/// the `fullReport` body following the line contract in [`crate::render`].
/// Within paragraphs:
/// - `- item` / `* item` → bullet list item (prefixed with bullet character)
/// - `**bold**` → bold run
/// - `---` or `***` → page break
pub fn generate_docx(report: &LabReport, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    docx = docx
        .add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                Run::new()
                    .add_text(&styles.letterhead)
                    .bold()
                    .size((styles.heading1_size + 2) * 2)
                    .fonts(RunFonts::new().ascii(&styles.heading_font)),
            ),
        )
        .add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                Run::new()
                    .add_text(&styles.department)
                    .italic()
                    .fonts(RunFonts::new().ascii(&styles.body_font)),
            ),
        )
        .add_paragraph(Paragraph::new());

    let patient = &report.patient;
    let profile = [
        ("Patient Name", patient.name.clone()),
        ("Date of Report", report.date().to_string()),
        ("Age / Gender", format!("{} / {}", patient.age, patient.gender)),
        ("Assessment Tool", report.tool.label().to_string()),
    ];
    for (label, value) in profile {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(body_run(&format!("{label}: "), styles).bold())
                .add_run(body_run(&value, styles)),
        );
    }

    docx = docx
        .add_paragraph(Paragraph::new())
        .add_paragraph(heading_paragraph("Executive Summary", "Heading2"))
        .add_paragraph(
            Paragraph::new().add_run(body_run(&report.summary, styles).italic()),
        );

    for block in parse_report(&report.full_report) {
        docx = docx.add_paragraph(block_paragraph(&block, styles));
    }

    docx = docx
        .add_paragraph(Paragraph::new())
        .add_paragraph(Paragraph::new().add_run(body_run("Authorized Signatory", styles).bold()))
        .add_paragraph(Paragraph::new().add_run(body_run("Clinical Neuropsychologist", styles)))
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Right)
                .add_run(body_run(&format!("Electronic Document ID: {}", report.id), styles)),
        );

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn block_paragraph(block: &ReportBlock, styles: &DocumentStyles) -> Paragraph {
    match block {
        ReportBlock::Heading { level, text } => {
            let style_id = match level {
                1 => "Heading1",
                2 => "Heading2",
                _ => "Heading3",
            };
            heading_paragraph(text, style_id)
        }
        ReportBlock::Paragraph { text } => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Paragraph::new()
            } else if trimmed == "---" || trimmed == "***" {
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
            } else if let Some(item) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                bullet_paragraph(item, styles)
            } else {
                body_paragraph(trimmed, styles)
            }
        }
    }
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
}

fn heading_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .style(style_id)
        .add_run(Run::new().add_text(text))
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run("\u{2022} ", styles));

    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }

    para
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

/// Parse simple inline formatting: **bold** segments.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(body_run(before, styles));
        }

        let after_start = &remaining[start + 2..];
        if let Some(end) = after_start.find("**") {
            runs.push(body_run(&after_start[..end], styles).bold());
            remaining = &after_start[end + 2..];
        } else {
            // Unclosed marker: keep the rest verbatim.
            runs.push(body_run(remaining, styles));
            return runs;
        }
    }

    if !remaining.is_empty() {
        runs.push(body_run(remaining, styles));
    }

    runs
}

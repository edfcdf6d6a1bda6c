//! Output formatting for the CLI.

use crate::commands::inspect::InspectionReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lenskit_curator::{AuditReport, MigrationReport, ReembedReport};
use lenskit_domain::Contrast;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether output should be machine-readable JSON.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Serialize any report as pretty JSON.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format an embedding audit.
    pub fn format_audit(&self, report: &AuditReport) -> Result<String> {
        if self.is_json() {
            return self.json(report);
        }

        let mut out = vec![self.heading("Embedding coverage")];
        out.push(table(
            ["Storage", "Lenses"],
            [
                ["native array".to_string(), report.native.to_string()],
                ["encoded string".to_string(), report.encoded.to_string()],
                ["NULL".to_string(), report.missing.to_string()],
                ["empty / invalid".to_string(), report.invalid.to_string()],
                ["total".to_string(), report.total.to_string()],
            ],
        ));

        if report.total > 0 && report.with_embeddings() == report.total {
            out.push(self.success(&format!("All {} lenses have embeddings", report.total)));
        } else {
            out.push(self.warning(&format!(
                "{} of {} lenses have embeddings",
                report.with_embeddings(),
                report.total
            )));
        }

        if !report.samples.is_empty() {
            out.push(self.heading("Sample lenses with embeddings"));
            out.push(table(
                ["ID", "Name", "Dimension", "Storage"],
                report.samples.iter().map(|s| {
                    [
                        s.id.clone(),
                        s.name.clone(),
                        s.dimension.to_string(),
                        s.storage.to_string(),
                    ]
                }),
            ));
        }

        if !report.missing_ids.is_empty() {
            out.push(self.heading("Lenses with NULL embeddings"));
            let mut lines: Vec<String> = report.missing_ids.iter().map(|id| format!("  - {}", id)).collect();
            if report.missing_more > 0 {
                lines.push(format!("  ... and {} more", report.missing_more));
            }
            out.push(lines.join("\n"));
        }

        if !report.invalid_entries.is_empty() {
            out.push(self.heading("Lenses with empty or invalid embeddings"));
            out.push(table(
                ["ID", "Name", "Problem"],
                report
                    .invalid_entries
                    .iter()
                    .map(|e| [e.id.clone(), e.name.clone(), e.reason.clone()]),
            ));
        }

        if !report.prefixes.is_empty() {
            out.push(self.heading("ID prefixes"));
            out.push(table(
                ["Prefix", "Lenses"],
                report.prefixes.iter().map(|(p, n)| [p.clone(), n.to_string()]),
            ));
        }

        Ok(out.join("\n\n"))
    }

    /// Format generated contrasts.
    pub fn format_contrasts(&self, contrasts: &[Contrast]) -> String {
        if contrasts.is_empty() {
            return self.colorize("No contrasts generated.", "yellow");
        }
        table(
            ["Source", "Target", "Distance", "Dialectic", "Score", "Weight"],
            contrasts.iter().map(|c| {
                [
                    c.source_id.clone(),
                    c.target_id.clone(),
                    format!("{:.3}", c.metadata.distance),
                    format!("{:.2}", c.metadata.dialectic_score),
                    format!("{:.3}", c.metadata.combined_score),
                    format!("{:.2}", c.weight),
                ]
            }),
        )
    }

    /// Format raw row descriptions.
    pub fn format_inspection(&self, report: &InspectionReport) -> Result<String> {
        if self.is_json() {
            return self.json(report);
        }

        let mut out = Vec::new();
        if report.rows.is_empty() {
            out.push(self.warning("No rows returned"));
        }
        for (i, fields) in report.rows.iter().enumerate() {
            out.push(self.heading(&format!("Row {} (all columns)", i + 1)));
            out.push(table(
                ["Column", "Value"],
                fields.iter().map(|f| [f.name.clone(), f.description.clone()]),
            ));
        }

        if !report.embeddings.is_empty() {
            out.push(self.heading("Embedding column"));
            out.push(
                report
                    .embeddings
                    .iter()
                    .map(|e| format!("{} ({})\n  {}", e.name, e.id, e.embedding))
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }
        Ok(out.join("\n\n"))
    }

    /// Format a re-embedding report.
    pub fn format_reembed(&self, report: &ReembedReport) -> Result<String> {
        if self.is_json() {
            return self.json(report);
        }

        if report.dry_run {
            let mut lines = vec![self.info(&format!("DRY RUN: would update {} lenses", report.total))];
            if !report.preview.is_empty() {
                lines.push("First lenses:".to_string());
                lines.extend(report.preview.iter().map(|name| format!("  - {}", name)));
            }
            return Ok(lines.join("\n"));
        }

        let mut lines = vec![self.success(&format!("Updated {} of {} lenses", report.updated, report.total))];
        if report.errors > 0 {
            lines.push(self.warning(&format!("{} lenses failed:", report.errors)));
            lines.extend(report.failed.iter().map(|name| format!("  - {}", name)));
        }
        Ok(lines.join("\n"))
    }

    /// Format a migration readiness report.
    pub fn format_migration(&self, report: &MigrationReport) -> Result<String> {
        if self.is_json() {
            return self.json(report);
        }

        let mut out = vec![self.heading("Embedding storage")];
        out.push(table(
            ["Storage", "Lenses"],
            [
                ["encoded string".to_string(), report.encoded.to_string()],
                ["native array".to_string(), report.native.to_string()],
                ["no usable embedding".to_string(), report.unusable.to_string()],
                ["total".to_string(), report.total.to_string()],
            ],
        ));
        out.push(self.warning(
            "Schema changes need direct database access; run these statements in the SQL editor:",
        ));
        out.push(
            report
                .runbook
                .iter()
                .enumerate()
                .map(|(i, step)| format!("  {}. {}", i + 1, step))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        Ok(out.join("\n\n"))
    }

    /// Format a section heading.
    pub fn heading(&self, title: &str) -> String {
        if self.color_enabled {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render rows as a rounded table with a centered header.
pub fn table<const N: usize, R>(header: [&str; N], rows: R) -> String
where
    R: IntoIterator<Item = [String; N]>,
{
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

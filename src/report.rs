/*!
 * Reporting functionality for repo-to-txt
 *
 * Provides functionality for generating formatted reports of a run
 * using the tabled library for clean, consistent table rendering.
 */

use std::path::Path;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{EntryOutcome, SkipReason};
use crate::utils::format_file_size;

/// Outcome of one write run
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to walk and write
    pub duration: Duration,
    /// Emitted records in output order, with content size
    pub emitted: Vec<(String, u64)>,
    /// Files that passed the filter but were not written
    pub skipped: Vec<(String, SkipReason)>,
}

impl ScanReport {
    /// Start an empty report for `output_file`
    pub fn new(output_file: &Path) -> Self {
        Self {
            output_file: output_file.display().to_string(),
            ..Self::default()
        }
    }

    /// Fold one entry outcome into the report
    pub fn record(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Excluded => {}
            EntryOutcome::Emitted { path, bytes } => self.emitted.push((path, bytes)),
            EntryOutcome::Skipped { path, reason } => self.skipped.push((path, reason)),
        }
    }

    /// Total content bytes written, separators excluded
    pub fn total_bytes(&self) -> u64 {
        self.emitted.iter().map(|(_, bytes)| bytes).sum()
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, where the file name lives
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let tail: String = path
            .chars()
            .rev()
            .take(max_len.saturating_sub(3))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }

    fn styled(table: &mut Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Written",
                value: report.emitted.len().to_string(),
            },
            SummaryRow {
                key: "Files Skipped",
                value: report.skipped.len().to_string(),
            },
            SummaryRow {
                key: "Total Size",
                value: format_file_size(report.total_bytes()),
            },
        ];

        Self::styled(&mut Table::new(rows))
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Status")]
            status: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let written = report.emitted.iter().map(|(path, bytes)| FileRow {
            path: self.format_path(path, 60),
            status: "written".to_string(),
            size: format_file_size(*bytes),
        });
        let skipped = report.skipped.iter().map(|(path, reason)| FileRow {
            path: self.format_path(path, 60),
            status: format!("skipped ({})", reason),
            size: "-".to_string(),
        });

        let mut rows: Vec<FileRow> = written.chain(skipped).collect();
        if rows.len() > 25 {
            rows.truncate(25);
        }

        Self::styled(&mut Table::new(rows))
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let total = report.emitted.len() + report.skipped.len();
        let files_title = if total > 25 {
            format!("FIRST 25 OF {} FILES", total)
        } else {
            "PROCESSED FILES".to_string()
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            self.create_files_table(report),
            "DONE",
            self.create_summary_table(report)
        )
    }
}

//! Structured reporting of what happened to each document.
//!
//! The driver never prints. It hands [`Report`] values to a [`Reporter`], so
//! callers can print them, log them through `tracing`, or keep them for later
//! inspection.

use crate::resolve::diff::render_value;
use crate::resolve::Finding;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// One diagnostic line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub severity: Severity,
    pub file: Option<PathBuf>,
    pub message: String,
}

impl Report {
    pub fn new(severity: Severity, file: Option<&Path>, message: impl Into<String>) -> Self {
        Self {
            severity,
            file: file.map(Path::to_path_buf),
            message: message.into(),
        }
    }

    pub fn info(file: &Path, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, Some(file), message)
    }

    pub fn warning(file: &Path, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, Some(file), message)
    }

    pub fn error(file: &Path, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, Some(file), message)
    }

    /// Console lines for one resolver finding
    pub fn from_finding(file: &Path, finding: &Finding) -> Vec<Report> {
        match finding {
            Finding::IgnoredName { index, found } => vec![Report::new(
                Severity::Debug,
                Some(file),
                format!("element {} has a {} name, not checked", index, found),
            )],
            Finding::DuplicateName { name, count } => vec![Report::warning(
                file,
                format!("duplicate: '{}' occurs {} times", name, count),
            )],
            Finding::FieldDiffs {
                name,
                occurrence,
                diffs,
                ..
            } => {
                let mut reports = vec![Report::warning(
                    file,
                    format!("  differences in occurrence {} of '{}':", occurrence, name),
                )];
                reports.extend(diffs.iter().map(|diff| {
                    Report::warning(
                        file,
                        format!(
                            "    - {}: '{}' → '{}'",
                            diff.field,
                            render_value(diff.reference.as_ref()),
                            render_value(diff.compared.as_ref())
                        ),
                    )
                }));
                reports
            }
            Finding::Renamed { from, to, .. } => {
                vec![Report::info(file, format!("  → {} → {}", from, to))]
            }
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Sink for reports
pub trait Reporter {
    fn emit(&mut self, report: Report);
}

/// Prints to the terminal: warnings and errors on stderr, the rest on stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub show_debug: bool,
}

impl ConsoleReporter {
    pub fn new(show_debug: bool) -> Self {
        Self { show_debug }
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&mut self, report: Report) {
        match report.severity {
            Severity::Debug if self.show_debug => {
                println!("[{}] {}", report.severity, report.message)
            }
            Severity::Debug => {}
            Severity::Info => println!("{}", report.message),
            Severity::Warning | Severity::Error => {
                eprintln!("[{}] {}", report.severity, report.message)
            }
        }
    }
}

/// Forwards reports to `tracing` events
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn emit(&mut self, report: Report) {
        let file = report
            .file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        match report.severity {
            Severity::Debug => tracing::debug!(file = %file, "{}", report.message),
            Severity::Info => tracing::info!(file = %file, "{}", report.message),
            Severity::Warning => tracing::warn!(file = %file, "{}", report.message),
            Severity::Error => tracing::error!(file = %file, "{}", report.message),
        }
    }
}

/// Keeps every report in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub reports: Vec<Report>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.reports.iter().map(|r| r.message.as_str()).collect()
    }

    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &Report> + '_ {
        self.reports.iter().filter(move |r| r.severity >= severity)
    }
}

impl Reporter for MemoryReporter {
    fn emit(&mut self, report: Report) {
        self.reports.push(report);
    }
}

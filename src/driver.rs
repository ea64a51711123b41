//! Top-level run over a directory: scan, load, resolve, write.

use crate::config::Config;
use crate::document::Document;
use crate::report::{Report, Reporter, Severity};
use crate::resolve::DuplicateResolver;
use crate::scanner::DocumentScanner;
use crate::writer::DocumentWriter;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Per-run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub scanned: usize,
    pub marked: usize,
    /// Duplicates found during a dry run
    pub unwritten: usize,
    pub clean: usize,
    pub skipped: usize,
    pub write_failures: usize,
}

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Marked,
    /// Duplicates found but nothing written
    DryRun,
    Clean,
    Skipped,
    WriteFailed,
}

/// Process every candidate document in `dir`. Per-file failures are
/// reported and never stop the run.
pub fn run(dir: &Path, config: &Config, reporter: &mut dyn Reporter) -> RunSummary {
    let scanner = DocumentScanner::new(dir, &config.scan, &config.output.suffix);
    let resolver = DuplicateResolver::new();
    let writer = DocumentWriter::new(&config.output);
    let mut summary = RunSummary::default();

    info!("Scanning directory: {}", dir.display());

    for entry in scanner.entries() {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                reporter.emit(Report::new(
                    Severity::Warning,
                    Some(dir),
                    format!("[skip] unreadable entry: {}", e),
                ));
                continue;
            }
        };

        summary.scanned += 1;
        if scanner.is_previous_output(&path) {
            reporter.emit(Report::warning(
                &path,
                format!(
                    "[skip] {} looks like a previous output (scan.skip_marked_outputs)",
                    display_target(&path)
                ),
            ));
            summary.skipped += 1;
            continue;
        }

        match process_file(&path, config.output.dry_run, &resolver, &writer, reporter) {
            FileOutcome::Marked => summary.marked += 1,
            FileOutcome::DryRun => summary.unwritten += 1,
            FileOutcome::Clean => summary.clean += 1,
            FileOutcome::Skipped => summary.skipped += 1,
            FileOutcome::WriteFailed => summary.write_failures += 1,
        }
    }

    info!(
        "Run complete: {} scanned, {} marked, {} clean, {} skipped, {} write failures",
        summary.scanned, summary.marked, summary.clean, summary.skipped, summary.write_failures
    );

    summary
}

/// Load, resolve and conditionally write one document
pub fn process_file(
    path: &Path,
    dry_run: bool,
    resolver: &DuplicateResolver,
    writer: &DocumentWriter,
    reporter: &mut dyn Reporter,
) -> FileOutcome {
    let display_name = display_target(path);
    reporter.emit(Report::info(path, format!("Checking: {}", display_name)));

    let mut document = match Document::load(path) {
        Ok(document) => document,
        Err(e) => {
            reporter.emit(Report::error(path, format!("[skip] {}", e)));
            return FileOutcome::Skipped;
        }
    };

    for skipped in document.skipped_elements() {
        reporter.emit(Report::warning(
            path,
            format!(
                "[skip] element {} of {} is a {}, not an object",
                skipped.index, display_name, skipped.found
            ),
        ));
    }

    let resolution = match resolver.resolve(&mut document) {
        Ok(resolution) => resolution,
        Err(e) => {
            reporter.emit(Report::error(path, format!("[skip] {}", e)));
            return FileOutcome::Skipped;
        }
    };

    for finding in &resolution.findings {
        for report in Report::from_finding(path, finding) {
            reporter.emit(report);
        }
    }

    if !resolution.modified {
        reporter.emit(Report::info(path, "[OK] no duplicates"));
        return FileOutcome::Clean;
    }

    if dry_run {
        reporter.emit(Report::info(
            path,
            format!(
                "[dry-run] would save {}",
                display_target(&writer.marked_path(path))
            ),
        ));
        return FileOutcome::DryRun;
    }

    match writer.write(&document) {
        Ok(target) => {
            debug!("{} records renamed in {}", resolution.renamed_count(), display_name);
            reporter.emit(Report::info(
                path,
                format!("[saved] marked file: {}", display_target(&target)),
            ));
            FileOutcome::Marked
        }
        Err(e) => {
            reporter.emit(Report::error(path, format!("[error] {}", e)));
            FileOutcome::WriteFailed
        }
    }
}

fn display_target(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

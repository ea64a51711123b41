//! # namemark
//!
//! Finds records that share a `name` in directories of JSON array documents,
//! reports how same-named records differ, and writes a marked copy where every
//! duplicate gets a descending suffix (`Fox.99`, `Fox.98`, ...).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use namemark::{driver, Config, MemoryReporter};
//! use std::path::Path;
//!
//! let mut reporter = MemoryReporter::new();
//! let summary = driver::run(Path::new("./data"), &Config::default(), &mut reporter);
//! println!("{} files marked", summary.marked);
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod driver;
pub mod error;
pub mod logging;
pub mod report;
pub mod resolve;
pub mod scanner;
pub mod writer;

// Re-export commonly used types
pub use config::Config;
pub use document::Document;
pub use driver::RunSummary;
pub use error::{Error, Result};
pub use report::{ConsoleReporter, MemoryReporter, Report, Reporter, Severity, TracingReporter};
pub use resolve::{DuplicateResolver, Finding, Resolution};

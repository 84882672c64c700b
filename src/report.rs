//! Verdict report sink: every line goes to the console, and to a plain-text
//! file when one is configured.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append-only report of PASS/FAIL lines, one per verdict. File trouble is
/// surfaced loudly through the log and the run continues console-only.
pub struct Report {
    file: Option<BufWriter<File>>,
}

impl Report {
    pub fn console_only() -> Self {
        Self { file: None }
    }

    /// Open a per-run report file. On failure the run still gets its console
    /// report.
    pub fn with_file(path: &Path) -> Self {
        match File::create(path) {
            Ok(file) => Self {
                file: Some(BufWriter::new(file)),
            },
            Err(err) => {
                log::error!(
                    "cannot open report file {}: {err}; continuing console-only",
                    path.display()
                );
                Self { file: None }
            }
        }
    }

    /// Mirror one record line to the console and the file sink.
    pub fn record(&mut self, line: &str) {
        println!("{line}");
        if let Some(file) = self.file.as_mut() {
            if let Err(err) = writeln!(file, "{line}") {
                log::error!("report file write failed: {err}; continuing console-only");
                self.file = None;
            }
        }
    }

    /// Flush the file sink once the run is over.
    pub fn finish(&mut self) {
        if let Some(file) = self.file.as_mut() {
            if let Err(err) = file.flush() {
                log::error!("report file flush failed: {err}");
            }
        }
    }
}

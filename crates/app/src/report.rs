//! Console rendering of suite reports.

use std::io::{self, Write};

use probe_domain::SuiteReport;

/// Writes one line per case followed by the suite summary.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_report<W: Write>(out: &mut W, report: &SuiteReport) -> io::Result<()> {
    writeln!(out, "== {} (run {})", report.suite_name, report.run_id)?;
    for case in &report.cases {
        writeln!(out, "{case}")?;
    }
    writeln!(out, "{report}")
}

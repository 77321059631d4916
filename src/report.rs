//! CSV reports written next to every output design.
//!
//! - domain report: one row per strand, `start,end,domains,length`
//! - crossover report: one row per pair of neighboring helices,
//!   `helix_pair,total,scaffold,staple,filled_length,short_domains`

use std::fmt;
use std::path::{Path, PathBuf};

use crate::autobreak::pipeline::PassResult;
use crate::core::design::DesignGraph;
use crate::parsing::cadnano::{write_design_file, FormatError};
use crate::strands::topology::{crossover_density, PairDensity};

pub const DOMAIN_HEADER: &str = "start,end,domains,length";
pub const CROSSOVER_HEADER: &str = "helix_pair,total,scaffold,staple,filled_length,short_domains";

/// Domain report table for one classification pass
pub struct DomainReport<'a> {
    pub pass: &'a PassResult,
    /// Filler bases appended to pinned strands
    pub extension: usize,
}

impl fmt::Display for DomainReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{DOMAIN_HEADER}")?;
        for record in &self.pass.strands {
            let domains = record.trace.report_string(record.pinned, self.extension);
            writeln!(
                f,
                "{},{},{},{}",
                record.trace.start,
                record.trace.end,
                domains,
                domains.len()
            )?;
        }
        Ok(())
    }
}

/// Crossover report table, one row per neighboring helix pair
pub struct CrossoverReport<'a>(pub &'a [PairDensity]);

impl fmt::Display for CrossoverReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{CROSSOVER_HEADER}")?;
        for row in self.0 {
            writeln!(
                f,
                "{},{},{},{},{},{}",
                row.pair_id(),
                row.total_crossovers(),
                row.scaffold_crossovers,
                row.staple_crossovers,
                row.filled_length,
                row.short_domains
            )?;
        }
        Ok(())
    }
}

/// Domain report for one classification pass; pinned strands get `extension` filler bases
#[must_use]
pub fn domain_report(pass: &PassResult, extension: usize) -> String {
    DomainReport { pass, extension }.to_string()
}

#[must_use]
pub fn crossover_report(rows: &[PairDensity]) -> String {
    CrossoverReport(rows).to_string()
}

/// File names of one design output and its two reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub design: PathBuf,
    pub domain_report: PathBuf,
    pub crossover_report: PathBuf,
}

impl OutputFiles {
    /// `output{suffix}.json`, `domain_report{suffix}.csv` and
    /// `crossover_report{suffix}.csv` inside `dir`
    #[must_use]
    pub fn in_dir(dir: &Path, suffix: &str) -> Self {
        Self {
            design: dir.join(format!("output{suffix}.json")),
            domain_report: dir.join(format!("domain_report{suffix}.csv")),
            crossover_report: dir.join(format!("crossover_report{suffix}.csv")),
        }
    }

    /// Write `graph` and both reports for `pass`
    ///
    /// # Errors
    ///
    /// Returns `FormatError::Io` if any file cannot be written.
    pub fn write(
        &self,
        graph: &DesignGraph,
        pass: &PassResult,
        extension: usize,
    ) -> Result<(), FormatError> {
        write_design_file(&self.design, graph)?;
        std::fs::write(&self.domain_report, domain_report(pass, extension))?;
        let rows = crossover_density(graph, &pass.short_domains);
        std::fs::write(&self.crossover_report, crossover_report(&rows))?;
        Ok(())
    }
}

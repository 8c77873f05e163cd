use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::matching::{Match, Strand};

/// Output encoding of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated text with '#' header lines
    Tsv,
    /// bincode-encoded `Report`
    Bincode,
}

/// Provenance stamped on every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub command: String,
    pub generated: String,
}

impl ReportMeta {
    pub fn now(command: impl Into<String>) -> Self {
        Self { command: command.into(), generated: chrono::Utc::now().to_rfc3339() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report<R> {
    pub meta: ReportMeta,
    pub rows: Vec<R>,
}

pub trait TsvRow {
    const COLUMNS: &'static [&'static str];
    fn write_tsv(&self, out: &mut dyn Write) -> std::io::Result<()>;
}

/// One common substring between two named records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    pub a_id: String,
    pub b_id: String,
    pub hit: Match,
}

impl TsvRow for MatchRow {
    const COLUMNS: &'static [&'static str] = &["a_id", "b_id", "a_start", "b_start", "length"];

    fn write_tsv(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            self.a_id, self.b_id, self.hit.start_a, self.hit.start_b, self.hit.length
        )
    }
}

/// Best placement of a read on a reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedHit {
    pub ref_id: String,
    pub strand: Strand,
    pub hit: Match,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRow {
    pub read_id: String,
    pub mapped: Option<MappedHit>,
}

impl TsvRow for MapRow {
    const COLUMNS: &'static [&'static str] = &["read_id", "ref_id", "strand", "ref_start", "read_start", "length"];

    fn write_tsv(&self, out: &mut dyn Write) -> std::io::Result<()> {
        match &self.mapped {
            Some(m) => writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}",
                self.read_id, m.ref_id, m.strand, m.hit.start_a, m.hit.start_b, m.hit.length
            ),
            // unmapped
            None => writeln!(out, "{}\t*\t*\t0\t0\t0", self.read_id),
        }
    }
}

/// stdout when no path is given.
pub fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    let out: Box<dyn Write> = if let Some(p) = path {
        let fh = std::fs::File::create(p).map_err(|e| anyhow!("cannot create output '{}': {}", p, e))?;
        Box::new(std::io::BufWriter::new(fh))
    } else {
        Box::new(std::io::BufWriter::new(std::io::stdout()))
    };
    Ok(out)
}

pub fn write_report<R: TsvRow + Serialize>(out: &mut dyn Write, report: &Report<R>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            writeln!(out, "#command\t{}", report.meta.command)?;
            writeln!(out, "#generated\t{}", report.meta.generated)?;
            writeln!(out, "#{}", R::COLUMNS.join("\t"))?;
            for row in &report.rows {
                row.write_tsv(out)?;
            }
        }
        OutputFormat::Bincode => bincode::serialize_into(&mut *out, report)?,
    }
    out.flush()?;
    Ok(())
}

pub fn read_bincode<R: DeserializeOwned, I: Read>(input: I) -> Result<Report<R>> {
    let report = bincode::deserialize_from(input)?;
    Ok(report)
}

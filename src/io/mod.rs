use anyhow::{anyhow, bail, Result};
use std::io::{BufRead, BufReader};

pub mod fasta;
pub mod fastq;
pub mod report;

#[derive(Debug, Clone)]
pub struct SeqRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

/// Record id: the header text up to the first whitespace; the description is not kept.
fn header_id(header: &str) -> String {
    header.split_whitespace().next().unwrap_or("").to_string()
}

/// Read every record from a FASTA or FASTQ stream; the format is taken
/// from the first non-whitespace byte ('>' or '@').
pub fn read_records<R: BufRead>(mut reader: R) -> Result<Vec<SeqRecord>> {
    let first = loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(Vec::new());
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(i) => break buf[i],
            None => {
                let n = buf.len();
                reader.consume(n);
            }
        }
    };

    let mut records = Vec::new();
    match first {
        b'>' => {
            let mut r = fasta::FastaReader::new(reader);
            while let Some(rec) = r.next_record()? {
                records.push(rec);
            }
        }
        b'@' => {
            let mut r = fastq::FastqReader::new(reader);
            while let Some(rec) = r.next_record()? {
                records.push(rec);
            }
        }
        other => bail!("unrecognized sequence format (first byte '{}')", other as char),
    }
    Ok(records)
}

pub fn read_records_from_path(path: &str) -> Result<Vec<SeqRecord>> {
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open sequence file '{}': {}", path, e))?;
    let records = read_records(BufReader::new(fh))
        .map_err(|e| anyhow!("cannot parse '{}': {}", path, e))?;
    if records.is_empty() {
        bail!("sequence file '{}' contains no records", path);
    }
    log::info!("{}: {} records", path, records.len());
    Ok(records)
}

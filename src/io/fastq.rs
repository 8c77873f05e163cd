use anyhow::{anyhow, Result};
use std::io::BufRead;

use super::SeqRecord;

/// Four-line FASTQ reader. Qualities are validated for length and then dropped.
pub struct FastqReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false }
    }

    pub fn next_record(&mut self) -> Result<Option<SeqRecord>> {
        if self.done { return Ok(None); }

        // header line starting with '@', blank lines skipped
        let header = loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 { self.done = true; return Ok(None); }
            if !self.buf.trim().is_empty() { break self.buf.trim().to_string(); }
        };
        let header = header
            .strip_prefix('@')
            .ok_or_else(|| anyhow!("FASTQ header not starting with '@': {}", header))?;
        let id = super::header_id(header);

        // sequence line
        self.buf.clear();
        let mut n = self.reader.read_line(&mut self.buf)?;
        if n == 0 { return Err(anyhow!("unexpected EOF after header of '{}'", id)); }
        let seq = self.buf.trim_end().as_bytes().to_vec();

        // plus line
        self.buf.clear();
        n = self.reader.read_line(&mut self.buf)?;
        if n == 0 || !self.buf.starts_with('+') { return Err(anyhow!("missing '+' line for '{}'", id)); }

        // quality line
        self.buf.clear();
        n = self.reader.read_line(&mut self.buf)?;
        if n == 0 { return Err(anyhow!("missing quality line for '{}'", id)); }
        if self.buf.trim_end().len() != seq.len() { return Err(anyhow!("seq/qual length mismatch for '{}'", id)); }

        Ok(Some(SeqRecord { id, seq }))
    }
}

use anyhow::Result;
use std::io::BufRead;

use super::SeqRecord;

/// Multi-line FASTA reader. Headers may be indented; sequence bytes keep
/// their case and lose all whitespace.
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    pending_id: Option<String>,
}

/// `Some(id)` if the line is a `>` header.
fn header_line(line: &str) -> Option<String> {
    line.trim_start().strip_prefix('>').map(super::header_id)
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false, pending_id: None }
    }

    pub fn next_record(&mut self) -> Result<Option<SeqRecord>> {
        if self.done {
            return Ok(None);
        }

        // anything before the first header is ignored
        let id = match self.pending_id.take() {
            Some(id) => id,
            None => loop {
                self.buf.clear();
                if self.reader.read_line(&mut self.buf)? == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(id) = header_line(&self.buf) {
                    break id;
                }
            },
        };

        let mut seq: Vec<u8> = Vec::new();
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                self.done = true;
                break;
            }
            if let Some(next) = header_line(&self.buf) {
                self.pending_id = Some(next);
                break;
            }
            seq.extend(self.buf.bytes().filter(|b| !b.is_ascii_whitespace()));
        }

        Ok(Some(SeqRecord { id, seq }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{self, Match, MatchOpt};
    use std::io::Cursor;

    fn read_all(data: &[u8]) -> Vec<SeqRecord> {
        let mut r = FastaReader::new(Cursor::new(data));
        let mut out = Vec::new();
        while let Some(rec) = r.next_record().unwrap() {
            out.push(rec);
        }
        out
    }

    #[test]
    fn multi_line_records_keep_case() {
        let recs = read_all(b">frag1 pUC19 backbone\nACgTNN\nggat\n>frag2\r\n AC g t \r\n");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, "frag1");
        assert_eq!(recs[0].seq, b"ACgTNNggat");
        assert_eq!(recs[1].id, "frag2");
        assert_eq!(recs[1].seq, b"ACgt");
    }

    #[test]
    fn indented_headers_and_leading_blank_lines() {
        let recs = read_all(b"\n\n   >frag1\nACGT\n\t>frag2\nTT\n");
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["frag1", "frag2"]);
        assert_eq!(recs[1].seq, b"TT");
    }

    #[test]
    fn empty_record_between_headers() {
        let recs = read_all(b">a\n>b\nAC\n");
        assert_eq!(recs.len(), 2);
        assert!(recs[0].seq.is_empty());
        assert_eq!(recs[1].seq, b"AC");
    }

    #[test]
    fn soft_masked_records_match_only_when_ignoring_case() {
        // 小写（软屏蔽）区域原样读入，只有 ignore_case 时才参与匹配
        let recs = read_all(b">masked\nTTTTggatccaagcTTTT\n>plain\nAAGGATCCAAGCAA\n");
        let (masked, plain) = (&recs[0].seq, &recs[1].seq);
        assert_eq!(&masked[4..14], b"ggatccaagc");

        let strict = MatchOpt { limit: 10, ignore_case: false };
        assert!(matching::common_substrings_with_opt(masked, plain, strict).is_empty());

        let folded = MatchOpt { limit: 10, ignore_case: true };
        let hits = matching::common_substrings_with_opt(masked, plain, folded);
        assert_eq!(hits, vec![Match::new(4, 2, 10)]);
    }
}

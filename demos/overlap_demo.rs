//! 演示如何在 library 模式下使用 commonseq 查找公共子串与片段重叠。
//!
//! 运行方式：
//! ```bash
//! cargo run --example overlap_demo
//! ```

use commonseq::index::repeat;
use commonseq::matching::{self, MatchOpt};
use commonseq::util::dna;

fn main() {
    // 1. 两条序列的全部公共子串
    let x = b"atctgaacgctttgaatgttgtctctattccacgaggcattcaaaaactggttaccgaacc";
    let y = b"ttcgtcacgaatagattccgaacgctttgaatgttgtctctattccacgaggcattcaaaaagggg";
    println!("x: {} bp, y: {} bp", x.len(), y.len());
    for m in matching::common_substrings(x, y, 10) {
        println!(
            "  x[{}..{}] == y[{}..{}] ({} bp)",
            m.start_a,
            m.end_a(),
            m.start_b,
            m.end_b(),
            m.length
        );
    }

    // 2. 片段拼接：a 的尾部与 b 的头部重叠
    let a = "GGGCGCGGGCGGNNNNTATATCATATAAA";
    let b = "TATATCATATAAAnnGGGCGCGGGCGG";
    println!("\nterminal overlaps (limit 12):");
    for m in matching::terminal_overlap(a, b, 12) {
        println!("  a[{}..] / b[{}..] : {}", m.start_a, m.start_b, &a[m.start_a..m.end_a()]);
    }

    // 3. 单条序列上的最大重复
    let text = b"GGATCCAAGGATCCTTGGATCC";
    println!("\nmaximal repeats of {}:", std::str::from_utf8(text).unwrap_or("?"));
    for r in repeat::extract_repeats_min(text, 3) {
        println!("  len={} at {:?}", r.length, r.occurrences);
    }

    // 4. read 定位（正反两条链）
    let reference = b"TTTTTTGGATCCAAGCTTGGGGGG";
    let read = dna::revcomp(b"GGATCCAAGCTT");
    let opt = MatchOpt { limit: 10, ignore_case: false };
    match matching::map_read(reference, &read, opt, true) {
        Some(h) => println!("\nread -> ref[{}..{}] strand {}", h.hit.start_a, h.hit.end_a(), h.strand),
        None => println!("\nread unmapped"),
    }
}

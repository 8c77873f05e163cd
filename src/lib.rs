//! # commonseq
//!
//! 基于后缀数组的公共子串查找，用于 DNA / 蛋白质序列的比对与注释。
//!
//! 本 crate 提供：
//!
//! - **最大重复枚举**：后缀数组（倍增法）+ LCP（Kasai）+ 单次栈扫描
//! - **跨序列匹配**：`A + 分隔符 + B` 探针串上的最大重复划分为位置对，
//!   按长度降序输出
//! - **末端重叠**：片段拼接时的首尾重叠检测
//! - **read 定位**：最长公共子串 + 可选反向互补
//!
//! ## 快速示例
//!
//! ```rust
//! use commonseq::{common_substrings, terminal_overlap, Match};
//!
//! assert_eq!(common_substrings("GGATCC", "GGATCC", 6), vec![Match::new(0, 0, 6)]);
//! assert!(common_substrings("CCCCC", "GGATCC", 6).is_empty());
//!
//! let a = "GGGCGCGGGCGGNNNNTATATCATATAAA";
//! let b = "TATATCATATAAAnnGGGCGCGGGCGG";
//! let olaps = terminal_overlap(a, b, 12);
//! assert_eq!(olaps[0], Match::new(16, 0, 13));
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 后缀数组、LCP 数组、最大重复枚举
//! - [`matching`] — 公共子串、末端重叠、read 定位
//! - [`io`] — FASTA / FASTQ 读取与结果报告（命令行使用）
//! - [`util`] — 反向互补、大小写折叠

pub mod index;
pub mod io;
pub mod matching;
pub mod util;

pub use matching::{
    common_substrings, longest_common_substring, terminal_overlap, Match, MatchOpt, DEFAULT_LIMIT,
    DEFAULT_OVERLAP_LIMIT,
};

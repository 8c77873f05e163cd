//! 两条序列之间的公共子串查找。
//!
//! 将 `A + 分隔符 + B` 拼接成探针串，在探针串上一次性枚举最大重复，
//! 再把每个重复的出现位置划分到 A / B 两侧，取笛卡尔积得到位置对。

pub mod probe;

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::index::repeat::extract_repeats_where;
use crate::util::dna;
use probe::{Probe, Side};

/// `common_substrings` 的默认最小长度。
pub const DEFAULT_LIMIT: usize = 25;
/// `terminal_overlap` 的默认最小长度。
pub const DEFAULT_OVERLAP_LIMIT: usize = 15;

/// 一个公共子串：`a[start_a..start_a + length] == b[start_b..start_b + length]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub start_a: usize,
    pub start_b: usize,
    pub length: usize,
}

impl Match {
    pub fn new(start_a: usize, start_b: usize, length: usize) -> Self {
        Self { start_a, start_b, length }
    }

    #[inline]
    pub fn end_a(&self) -> usize {
        self.start_a + self.length
    }

    #[inline]
    pub fn end_b(&self) -> usize {
        self.start_b + self.length
    }

    /// 是否为首尾相接的重叠（A 的后缀对 B 的前缀，或 B 的后缀对 A 的前缀）。
    pub fn is_terminal(&self, len_a: usize, len_b: usize) -> bool {
        (self.start_a == 0 && self.end_b() == len_b) || (self.start_b == 0 && self.end_a() == len_a)
    }
}

impl From<Match> for (usize, usize, usize) {
    fn from(m: Match) -> Self {
        (m.start_a, m.start_b, m.length)
    }
}

/// 匹配参数
#[derive(Debug, Clone, Copy)]
pub struct MatchOpt {
    /// 最小子串长度（包含边界）
    pub limit: usize,
    /// 匹配前将两条序列统一为大写
    pub ignore_case: bool,
}

impl Default for MatchOpt {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, ignore_case: false }
    }
}

/// 找出 a 与 b 之间所有长度 `>= limit` 的公共子串。
///
/// 结果按长度降序排列，长度相同时按 `(start_a, start_b)` 升序；
/// 同一位置对只保留最长的一条。区分大小写。
pub fn common_substrings<A: AsRef<[u8]>, B: AsRef<[u8]>>(a: A, b: B, limit: usize) -> Vec<Match> {
    let (a, b) = (a.as_ref(), b.as_ref());
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let probe = Probe::new(a, b);
    // 只出现在一侧的重复不构成跨序列匹配，在复制出现位置之前就丢弃
    let repeats = extract_repeats_where(probe.symbols(), limit, |occ| probe.spans_both(occ));
    log::debug!(
        "common_substrings: len_a={} len_b={} limit={} repeats={}",
        probe.len_a(),
        probe.len_b(),
        limit,
        repeats.len()
    );

    let mut best: FxHashMap<(usize, usize), usize> = FxHashMap::default();
    let mut starts_a: Vec<usize> = Vec::new();
    let mut starts_b: Vec<usize> = Vec::new();
    for rep in &repeats {
        if rep.length < limit {
            continue;
        }
        starts_a.clear();
        starts_b.clear();
        for &off in &rep.occurrences {
            match probe.locate(off as usize) {
                Side::A(x) => starts_a.push(x),
                Side::B(y) => starts_b.push(y),
                Side::Separator => {}
            }
        }
        for &x in &starts_a {
            for &y in &starts_b {
                best.entry((x, y))
                    .and_modify(|l| *l = (*l).max(rep.length))
                    .or_insert(rep.length);
            }
        }
    }

    let mut matches: Vec<Match> = best
        .into_iter()
        .filter(|&(_, length)| length >= limit)
        .map(|((x, y), length)| Match::new(x, y, length))
        .collect();
    sort_matches(&mut matches);
    matches
}

/// 带选项的 `common_substrings`。
pub fn common_substrings_with_opt(a: &[u8], b: &[u8], opt: MatchOpt) -> Vec<Match> {
    if opt.ignore_case {
        common_substrings(dna::fold_case(a), dna::fold_case(b), opt.limit)
    } else {
        common_substrings(a, b, opt.limit)
    }
}

/// 只保留首尾相接的重叠，用于片段拼接（如 Gibson 组装）的接头检测。
pub fn terminal_overlap<A: AsRef<[u8]>, B: AsRef<[u8]>>(a: A, b: B, limit: usize) -> Vec<Match> {
    let (a, b) = (a.as_ref(), b.as_ref());
    let mut matches = common_substrings(a, b, limit);
    matches.retain(|m| m.is_terminal(a.len(), b.len()));
    matches
}

/// 带选项的 `terminal_overlap`。
pub fn terminal_overlap_with_opt(a: &[u8], b: &[u8], opt: MatchOpt) -> Vec<Match> {
    let mut matches = common_substrings_with_opt(a, b, opt);
    matches.retain(|m| m.is_terminal(a.len(), b.len()));
    matches
}

/// 片段两两之间（`i < j`）的首尾重叠，返回 `(i, j, 重叠)`。
///
/// 首尾条件本身覆盖了两种拼接方向，因此每个无序对只比较一次。
pub fn pairwise_terminal_overlaps<S: AsRef<[u8]>>(fragments: &[S], opt: MatchOpt) -> Vec<(usize, usize, Match)> {
    let mut joins = Vec::new();
    for (i, a) in fragments.iter().enumerate() {
        for (j, b) in fragments.iter().enumerate().skip(i + 1) {
            let olaps = terminal_overlap_with_opt(a.as_ref(), b.as_ref(), opt);
            joins.extend(olaps.into_iter().map(|m| (i, j, m)));
        }
    }
    joins
}

/// 最长公共子串；长度相同时取位置最小者。没有达到 `limit` 的子串时返回 None。
pub fn longest_common_substring<A: AsRef<[u8]>, B: AsRef<[u8]>>(a: A, b: B, limit: usize) -> Option<Match> {
    common_substrings(a, b, limit).into_iter().next()
}

fn sort_matches(matches: &mut [Match]) {
    matches.sort_by(|p, q| {
        q.length
            .cmp(&p.length)
            .then_with(|| (p.start_a, p.start_b).cmp(&(q.start_a, q.start_b)))
    });
}

/// read 相对参考的链方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// read 在参考上的最佳命中。反向链时 `start_b` 为反向互补 read 上的偏移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadHit {
    pub strand: Strand,
    pub hit: Match,
}

/// 用最长公共子串将 read 映射到参考：`start_a` 为参考偏移，`start_b` 为 read 偏移。
/// `both_strands` 时同时尝试反向互补，长度相同优先正向。
pub fn map_read(reference: &[u8], read: &[u8], opt: MatchOpt, both_strands: bool) -> Option<ReadHit> {
    let fwd = longest_with_opt(reference, read, opt).map(|hit| ReadHit { strand: Strand::Forward, hit });
    if !both_strands {
        return fwd;
    }
    let rc = dna::revcomp(read);
    let rev = longest_with_opt(reference, &rc, opt).map(|hit| ReadHit { strand: Strand::Reverse, hit });
    match (fwd, rev) {
        (Some(f), Some(r)) if r.hit.length > f.hit.length => Some(r),
        (Some(f), _) => Some(f),
        (None, r) => r,
    }
}

/// 在多条参考上映射 read，返回最长命中及其参考下标；长度相同时靠前的参考优先。
pub fn map_read_best<'r, I>(references: I, read: &[u8], opt: MatchOpt, both_strands: bool) -> Option<(usize, ReadHit)>
where
    I: IntoIterator<Item = &'r [u8]>,
{
    let mut best: Option<(usize, ReadHit)> = None;
    for (i, reference) in references.into_iter().enumerate() {
        if let Some(h) = map_read(reference, read, opt, both_strands) {
            if best.as_ref().map_or(true, |(_, b)| h.hit.length > b.hit.length) {
                best = Some((i, h));
            }
        }
    }
    best
}

fn longest_with_opt(a: &[u8], b: &[u8], opt: MatchOpt) -> Option<Match> {
    common_substrings_with_opt(a, b, opt).into_iter().next()
}

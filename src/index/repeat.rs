use super::lcp::build_lcp;
use super::sa::build_sa;

/// 最大重复子串：长度 + 全部出现位置（升序、去重，至少两个）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repeat {
    pub length: usize,
    pub occurrences: Vec<u32>,
}

/// 枚举文本中的全部最大重复子串。
pub fn extract_repeats<T: Copy + Into<u32> + PartialEq>(text: &[T]) -> Vec<Repeat> {
    extract_repeats_min(text, 1)
}

/// 枚举长度不小于 `min_len` 的最大重复子串。
///
/// 先构建 SA 与 LCP，再自底向上扫描 LCP 数组：栈中保存尚未闭合的
/// `(lcp, 左边界)` 区间，LCP 下降时弹栈得到一个 lcp-interval `[lb, rb]`，
/// 它对应一个右极大重复，出现位置即 `sa[lb..=rb]`。
/// 只有左侧字符不全相同（或包含位置 0）的区间才是左极大的，予以保留。
///
/// 结果按长度降序、出现位置升序排列。
pub fn extract_repeats_min<T: Copy + Into<u32> + PartialEq>(text: &[T], min_len: usize) -> Vec<Repeat> {
    extract_repeats_where(text, min_len, |_| true)
}

/// 同 `extract_repeats_min`，但只收集 `keep` 接受的区间。
/// `keep` 看到的是未排序的 `sa[lb..=rb]` 切片，拒绝的区间不会被复制。
pub(crate) fn extract_repeats_where<T, F>(text: &[T], min_len: usize, mut keep: F) -> Vec<Repeat>
where
    T: Copy + Into<u32> + PartialEq,
    F: FnMut(&[u32]) -> bool,
{
    let n = text.len();
    if n < 2 {
        return Vec::new();
    }
    let min_len = min_len.max(1);
    let sa = build_sa(text);
    let lcp = build_lcp(text, &sa);

    let mut repeats = Vec::new();
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
    for i in 1..=n {
        let cur = if i < n { lcp[i] as usize } else { 0 };
        let mut lb = i - 1;
        while let Some(&(h, top_lb)) = stack.last() {
            if cur >= h {
                break;
            }
            stack.pop();
            let occ = &sa[top_lb..i];
            if h >= min_len && keep(occ) && is_left_maximal(text, occ) {
                let mut occurrences = occ.to_vec();
                occurrences.sort_unstable();
                repeats.push(Repeat { length: h, occurrences });
            }
            lb = top_lb;
        }
        if stack.last().map_or(true, |&(h, _)| cur > h) {
            stack.push((cur, lb));
        }
    }

    repeats.sort_by(|a, b| b.length.cmp(&a.length).then_with(|| a.occurrences.cmp(&b.occurrences)));
    log::trace!("extract_repeats: n={} min_len={} repeats={}", n, min_len, repeats.len());
    repeats
}

/// 出现位置的前驱字符不全相同时为左极大；位置 0 没有前驱，视为唯一。
fn is_left_maximal<T: PartialEq>(text: &[T], occ: &[u32]) -> bool {
    let mut first: Option<&T> = None;
    for &p in occ {
        let p = p as usize;
        if p == 0 {
            return true;
        }
        let c = &text[p - 1];
        match first {
            None => first = Some(c),
            Some(f) if f != c => return true,
            Some(_) => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashMap};

    /// 暴力枚举：对每个出现 ≥2 次的子串检查左右两侧上下文。
    fn naive_repeats(text: &[u8]) -> BTreeSet<(usize, Vec<u32>)> {
        let n = text.len();
        let mut occ: HashMap<&[u8], Vec<u32>> = HashMap::new();
        for i in 0..n {
            for j in i + 1..=n {
                occ.entry(&text[i..j]).or_default().push(i as u32);
            }
        }
        let distinct = |ctx: Vec<Option<u8>>| {
            ctx.contains(&None) || ctx.iter().collect::<BTreeSet<_>>().len() > 1
        };
        let mut out = BTreeSet::new();
        for (s, pos) in occ {
            if pos.len() < 2 {
                continue;
            }
            let left: Vec<Option<u8>> =
                pos.iter().map(|&p| (p > 0).then(|| text[p as usize - 1])).collect();
            let right: Vec<Option<u8>> = pos.iter().map(|&p| text.get(p as usize + s.len()).copied()).collect();
            if distinct(left) && distinct(right) {
                let mut pos = pos;
                pos.sort_unstable();
                out.insert((s.len(), pos));
            }
        }
        out
    }

    fn as_set(repeats: &[Repeat]) -> BTreeSet<(usize, Vec<u32>)> {
        repeats.iter().map(|r| (r.length, r.occurrences.clone())).collect()
    }

    #[test]
    fn no_repeats_in_short_texts() {
        assert!(extract_repeats::<u8>(&[]).is_empty());
        assert!(extract_repeats(b"A").is_empty());
        assert!(extract_repeats(b"AC").is_empty());
    }

    #[test]
    fn two_symbol_run() {
        let r = extract_repeats(b"AA");
        assert_eq!(r, vec![Repeat { length: 1, occurrences: vec![0, 1] }]);
    }

    #[test]
    fn nested_repeats_share_occurrences() {
        // GGATCC&GGATCC：GGATCC 两次，GATCC 不是左极大
        let r = extract_repeats(b"GGATCC&GGATCC");
        assert_eq!(r[0], Repeat { length: 6, occurrences: vec![0, 7] });
        assert!(!r.iter().any(|x| x.length == 5));
        assert!(r.iter().any(|x| x.length == 1 && x.occurrences == vec![0, 1, 7, 8]));
    }

    #[test]
    fn matches_naive_enumeration() {
        let mut x: u32 = 7;
        for sigma in [2usize, 3, 4] {
            for len in 2..=30 {
                let text: Vec<u8> = (0..len)
                    .map(|_| {
                        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                        b"ACGT"[(x >> 16) as usize % sigma]
                    })
                    .collect();
                let got = extract_repeats(&text);
                assert_eq!(as_set(&got), naive_repeats(&text), "text={:?}", String::from_utf8_lossy(&text));
            }
        }
    }

    #[test]
    fn min_len_filters_short_repeats() {
        let text = b"ACGTTACGTAACGTT";
        let all = extract_repeats(text);
        let long = extract_repeats_min(text, 4);
        let expected: Vec<Repeat> = all.into_iter().filter(|r| r.length >= 4).collect();
        assert_eq!(long, expected);
    }

    #[test]
    fn keep_predicate_drops_intervals() {
        let text = b"ACGTTACGTAACGTT";
        let all = extract_repeats_min(text, 2);
        // 只保留包含位置 0 的区间
        let kept = extract_repeats_where(text, 2, |occ| occ.contains(&0));
        let expected: Vec<Repeat> = all.into_iter().filter(|r| r.occurrences.contains(&0)).collect();
        assert!(!expected.is_empty());
        assert_eq!(kept, expected);
        assert!(extract_repeats_where(text, 1, |_| false).is_empty());
    }

    #[test]
    fn output_is_sorted_by_length() {
        let r = extract_repeats(b"ABCABCABDABD");
        for w in r.windows(2) {
            assert!(w[0].length > w[1].length || (w[0].length == w[1].length && w[0].occurrences <= w[1].occurrences));
        }
        for rep in &r {
            assert!(rep.occurrences.len() >= 2);
        }
    }
}

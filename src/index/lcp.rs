use super::sa::inverse_sa;

/// Kasai 算法构建 LCP 数组，O(n)。
///
/// `lcp[0] = 0`，`lcp[i]` 为后缀 `sa[i - 1]` 与 `sa[i]` 的最长公共前缀长度。
pub fn build_lcp<T: PartialEq>(text: &[T], sa: &[u32]) -> Vec<u32> {
    let n = text.len();
    debug_assert_eq!(n, sa.len());
    let mut lcp = vec![0u32; n];
    if n < 2 {
        return lcp;
    }
    let rank = inverse_sa(sa);

    let mut h = 0usize;
    for i in 0..n {
        let r = rank[i] as usize;
        if r == 0 {
            h = 0;
            continue;
        }
        let j = sa[r - 1] as usize;
        while i + h < n && j + h < n && text[i + h] == text[j + h] {
            h += 1;
        }
        lcp[r] = h as u32;
        h = h.saturating_sub(1);
    }
    lcp
}

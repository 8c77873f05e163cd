/// 构建后缀数组（基于倍增法，O(n log² n) 排序）。
/// 输入为任意整数字母表的文本（u8 / u16 均可），符号按数值大小比较。
/// 较短的后缀在公共前缀相同时排在前面，因此文本末尾无需额外的终止符。
pub fn build_sa<T: Copy + Into<u32>>(text: &[T]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut sa: Vec<usize> = (0..n).collect();
    let mut rank: Vec<i64> = text.iter().map(|&b| i64::from(Into::<u32>::into(b))).collect();
    let mut tmp: Vec<i64> = vec![0; n];

    let mut k = 1usize;
    loop {
        let key = |i: usize, rank: &[i64]| (rank[i], if i + k < n { rank[i + k] } else { -1 });
        sa.sort_unstable_by(|&i, &j| key(i, &rank).cmp(&key(j, &rank)));

        tmp[sa[0]] = 0;
        for i in 1..n {
            let a = sa[i - 1];
            let b = sa[i];
            tmp[b] = tmp[a] + i64::from(key(a, &rank) != key(b, &rank));
        }

        // 复制回 rank
        rank.copy_from_slice(&tmp);
        if rank[sa[n - 1]] as usize == n - 1 || k >= n {
            break;
        }
        k <<= 1;
    }

    sa.into_iter().map(|x| x as u32).collect()
}

/// 后缀数组的逆：rank[sa[i]] = i。
pub fn inverse_sa(sa: &[u32]) -> Vec<u32> {
    let mut inv = vec![0u32; sa.len()];
    for (i, &p) in sa.iter().enumerate() {
        inv[p as usize] = i as u32;
    }
    inv
}

/// 互补碱基，保留大小写；U 视作 T，其余字符映射为 N。
#[inline]
pub fn complement(base: u8) -> u8 {
    let c = match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' | b'U' => b'A',
        _ => b'N',
    };
    if base.is_ascii_lowercase() {
        c.to_ascii_lowercase()
    } else {
        c
    }
}

pub fn revcomp(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq.iter().rev() {
        out.push(complement(b));
    }
    out
}

/// 统一为大写，供不区分大小写的匹配使用。
pub fn fold_case(seq: &[u8]) -> Vec<u8> {
    seq.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revcomp_basic() {
        assert_eq!(revcomp(b"ACGTN"), b"NACGT");
        assert_eq!(revcomp(b"GGATCC"), b"GGATCC");
    }

    #[test]
    fn revcomp_keeps_case() {
        assert_eq!(revcomp(b"aaCg"), b"cGtt");
        assert_eq!(revcomp(b"u"), b"a");
    }

    #[test]
    fn fold_case_upper() {
        assert_eq!(fold_case(b"acGt"), b"ACGT");
    }
}

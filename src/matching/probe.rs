/// 分隔符编码。输入字节 `x` 编码为 `x + 1`，因此 0 永远不会与输入冲突。
pub const SEPARATOR: u16 = 0;

/// 探针串 `A + 分隔符 + B` 的编码形式。
#[derive(Debug, Clone)]
pub struct Probe {
    symbols: Vec<u16>,
    len_a: usize,
    len_b: usize,
}

/// 探针偏移所属的一侧（已换算为原串内偏移）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A(usize),
    B(usize),
    Separator,
}

impl Probe {
    pub fn new(a: &[u8], b: &[u8]) -> Self {
        let mut symbols = Vec::with_capacity(a.len() + b.len() + 1);
        symbols.extend(a.iter().map(|&x| u16::from(x) + 1));
        symbols.push(SEPARATOR);
        symbols.extend(b.iter().map(|&x| u16::from(x) + 1));
        Self { symbols, len_a: a.len(), len_b: b.len() }
    }

    pub fn symbols(&self) -> &[u16] {
        &self.symbols
    }

    pub fn len_a(&self) -> usize {
        self.len_a
    }

    pub fn len_b(&self) -> usize {
        self.len_b
    }

    /// 将探针偏移映射回 A 或 B。
    /// 出现位置是否同时落在 A 与 B 两侧。
    pub fn spans_both(&self, occ: &[u32]) -> bool {
        let (mut in_a, mut in_b) = (false, false);
        for &p in occ {
            match self.locate(p as usize) {
                Side::A(_) => in_a = true,
                Side::B(_) => in_b = true,
                Side::Separator => {}
            }
            if in_a && in_b {
                return true;
            }
        }
        false
    }

    #[inline]
    pub fn locate(&self, offset: usize) -> Side {
        if offset < self.len_a {
            Side::A(offset)
        } else if offset > self.len_a {
            Side::B(offset - self.len_a - 1)
        } else {
            Side::Separator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_sits_at_len_a() {
        let p = Probe::new(b"ACG", b"TT");
        assert_eq!(p.symbols().len(), 6);
        assert_eq!(p.symbols()[3], SEPARATOR);
        assert_eq!(p.symbols().iter().filter(|&&s| s == SEPARATOR).count(), 1);
    }

    #[test]
    fn nul_bytes_do_not_collide() {
        let p = Probe::new(&[0, 0], &[0]);
        assert_eq!(p.symbols(), &[1, 1, 0, 1]);
    }

    #[test]
    fn locate_offsets() {
        let p = Probe::new(b"ACG", b"TT");
        assert_eq!(p.locate(0), Side::A(0));
        assert_eq!(p.locate(2), Side::A(2));
        assert_eq!(p.locate(3), Side::Separator);
        assert_eq!(p.locate(4), Side::B(0));
        assert_eq!(p.locate(5), Side::B(1));
    }

    #[test]
    fn spans_both_needs_each_side() {
        let p = Probe::new(b"ACG", b"TT");
        assert!(p.spans_both(&[4, 0]));
        assert!(!p.spans_both(&[0, 1, 2]));
        assert!(!p.spans_both(&[3, 4, 5]));
        assert!(!p.spans_both(&[]));
    }

    #[test]
    fn empty_sides() {
        let p = Probe::new(b"", b"");
        assert_eq!(p.symbols(), &[SEPARATOR]);
        assert_eq!(p.locate(0), Side::Separator);
    }
}

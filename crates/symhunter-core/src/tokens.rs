//! 可打印 ASCII 片段切分（单趟、惰性）

/// 可打印 ASCII 区间 [32, 126]
#[inline]
pub(crate) fn is_printable(b: u8) -> bool {
    (0x20..=0x7E).contains(&b)
}

/// 在字节缓冲上惰性产出可打印片段
/// - 片段为极大连续可打印字节串，以不可打印字节或缓冲末尾为界
/// - 仅产出长度 ≥ min_len 的片段（阈值含等号）
/// - 产出的是对原缓冲的借用切片，除游标外不占额外内存
pub(crate) struct PrintableTokens<'a> {
    buf: &'a [u8],
    pos: usize,
    min_len: usize,
}

impl<'a> PrintableTokens<'a> {
    pub(crate) fn new(buf: &'a [u8], min_len: usize) -> Self {
        // 空片段永不产出
        Self { buf, pos: 0, min_len: min_len.max(1) }
    }
}

impl<'a> Iterator for PrintableTokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        while self.pos < self.buf.len() {
            let rest = &self.buf[self.pos..];
            // 没有终止字节时一直延伸到末尾（末尾冲刷）
            let run = rest.iter().position(|&b| !is_printable(b)).unwrap_or(rest.len());
            let start = self.pos;
            // 越过本段以及其后的终止字节
            self.pos = (start + run + 1).min(self.buf.len());
            if run >= self.min_len {
                return Some(&self.buf[start..start + run]);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(buf: &[u8], min_len: usize) -> Vec<&[u8]> {
        PrintableTokens::new(buf, min_len).collect()
    }

    #[test]
    fn splits_on_non_printable_bytes() {
        let toks = collect(b"abcd\x00efgh\x01\x02ijkl", 4);
        assert_eq!(toks, vec![&b"abcd"[..], &b"efgh"[..], &b"ijkl"[..]]);
    }

    #[test]
    fn space_and_tilde_are_printable() {
        let toks = collect(b"a b~c\x7fzzzz", 4);
        assert_eq!(toks, vec![&b"a b~c"[..], &b"zzzz"[..]]);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(collect(b"abc\x00abcd\x00", 4), vec![&b"abcd"[..]]);
    }

    #[test]
    fn trailing_run_is_flushed() {
        assert_eq!(collect(b"\x00\x00tail_sym", 4), vec![&b"tail_sym"[..]]);
    }

    #[test]
    fn empty_and_all_binary_inputs_yield_nothing() {
        assert!(collect(b"", 4).is_empty());
        assert!(collect(&[0u8, 1, 2, 0xff, 0x80], 1).is_empty());
    }

    #[test]
    fn zero_min_len_never_yields_empty_tokens() {
        assert_eq!(collect(b"\x00\x00a\x00", 0), vec![&b"a"[..]]);
    }
}

//! 符号候选扫描器（可打印片段 → 检索词预筛 → 标识符形状校验）
//!
//! 对任意二进制内容做启发式扫描：不解析导出表，只把“看起来像 C 标识符、
//! 且包含检索词”的可打印片段当作候选符号。

use std::collections::BTreeSet;

use aho_corasick::AhoCorasick;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::ScanError;
use crate::options::ScanStats;
use crate::tokens::PrintableTokens;

/// 去重后的命中集合；BTreeSet 迭代即为展示所需的字典序
pub type ResultSet = BTreeSet<String>;

/// 标识符形状：仅字母、数字、下划线
const IDENT_PATTERN: &str = r"^[A-Za-z0-9_]+$";

/// 符号扫描器（构建一次，可对多个缓冲复用；扫描本身无副作用）
pub struct SymbolScanner {
    /// 检索词自动机（任一检索词出现在片段任意位置即视为命中）
    targets: AhoCorasick,
    ident: Regex,
    min_len: usize,
}

impl SymbolScanner {
    /// 构建扫描器；检索词为空时返回 `ScanError::EmptyTargets`
    pub fn new<I, S>(targets: I, min_len: usize) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = targets.into_iter().map(|s| s.as_ref().to_string()).collect();
        if terms.is_empty() {
            return Err(ScanError::EmptyTargets);
        }
        let targets = AhoCorasick::new(&terms)?;
        let ident = Regex::new(IDENT_PATTERN).map_err(|source| ScanError::InvalidPattern {
            pattern: IDENT_PATTERN.to_string(),
            source,
        })?;
        Ok(Self { targets, ident, min_len })
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// 是否包含任一检索词（大小写敏感的子串匹配）
    pub fn matches_target(&self, s: &str) -> bool {
        self.targets.is_match(s)
    }

    /// 是否满足标识符形状
    pub fn is_identifier(&self, s: &str) -> bool {
        self.ident.is_match(s)
    }

    /// 扫描整个缓冲，返回候选符号集合
    pub fn scan(&self, blob: &[u8]) -> ResultSet {
        let mut stats = ScanStats::default();
        self.scan_with_stats(blob, &mut stats)
    }

    /// 同 `scan`，同时累计统计信息
    pub fn scan_with_stats(&self, blob: &[u8], stats: &mut ScanStats) -> ResultSet {
        let mut found = ResultSet::new();
        stats.bytes_scanned += blob.len();

        for raw in PrintableTokens::new(blob, self.min_len) {
            stats.tokens_seen += 1;
            // 片段均在可打印区间内，解码失败只作为本地跳过
            let token = match std::str::from_utf8(raw) {
                Ok(s) => s,
                Err(_) => {
                    stats.decode_skipped += 1;
                    trace!(len = raw.len(), "token skipped: not ascii");
                    continue;
                }
            };
            // 先做廉价的检索词预筛，再做正则校验
            if !self.matches_target(token) {
                continue;
            }
            if !self.is_identifier(token) {
                continue;
            }
            stats.candidates += 1;
            found.insert(token.to_string());
        }

        debug!(tokens = stats.tokens_seen, unique = found.len(), "string scan finished");
        found
    }
}

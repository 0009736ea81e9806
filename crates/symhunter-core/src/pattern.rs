//! 字节级正则直扫（例如 `dds_[a-zA-Z0-9_]+`），可选前缀过滤
use regex::bytes::Regex;
use tracing::{debug, trace};

use crate::error::ScanError;
use crate::options::ScanStats;
use crate::scanner::ResultSet;

/// 直接在原始字节上运行正则，命中值按 ASCII 解码后收集
pub struct PatternScanner {
    re: Regex,
    require_prefix: Option<String>,
}

impl PatternScanner {
    pub fn new(pattern: &str, require_prefix: Option<String>) -> Result<Self, ScanError> {
        let re = Regex::new(pattern).map_err(|source| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { re, require_prefix })
    }

    pub fn scan_with_stats(&self, blob: &[u8], stats: &mut ScanStats) -> ResultSet {
        let mut found = ResultSet::new();
        stats.bytes_scanned += blob.len();

        for m in self.re.find_iter(blob) {
            stats.tokens_seen += 1;
            let raw = m.as_bytes();
            // 非 ASCII 命中直接跳过，不中断扫描
            if !raw.is_ascii() {
                stats.decode_skipped += 1;
                trace!(offset = m.start(), "match skipped: not ascii");
                continue;
            }
            let value = std::str::from_utf8(raw).unwrap_or_default();
            if let Some(prefix) = &self.require_prefix {
                if !value.starts_with(prefix.as_str()) {
                    continue;
                }
            }
            stats.candidates += 1;
            found.insert(value.to_string());
        }

        debug!(matches = stats.tokens_seen, unique = found.len(), "pattern scan finished");
        found
    }

    pub fn scan(&self, blob: &[u8]) -> ResultSet {
        let mut stats = ScanStats::default();
        self.scan_with_stats(blob, &mut stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DDS: &str = r"dds_[a-zA-Z0-9_]+";

    #[test]
    fn finds_embedded_symbols_without_token_boundaries() {
        let scanner = PatternScanner::new(DDS, None).unwrap();
        let found = scanner.scan(b"xx dds_write_foo \x00\x01 dds_other;dds_write_foo");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["dds_other", "dds_write_foo"]);
    }

    #[test]
    fn prefix_filter_keeps_only_matching_values() {
        // ddsi_* 本身不以 dds_ 开头，因此用能覆盖两者的正则
        let scanner = PatternScanner::new(r"ddsi?_[a-zA-Z0-9_]+", Some("ddsi_".into())).unwrap();
        let found = scanner.scan(b"\x00ddsi_serdata_ref\x00dds_write\x00ddsi_sertype_init\x00");
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec!["ddsi_serdata_ref", "ddsi_sertype_init"]
        );
    }

    #[test]
    fn non_ascii_matches_are_skipped() {
        let scanner = PatternScanner::new(r"(?-u)dds_[^\x00]+", None).unwrap();
        let mut stats = ScanStats::default();
        let found = scanner.scan_with_stats(b"dds_ok\x00dds_\xffbad\x00", &mut stats);
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["dds_ok"]);
        assert_eq!(stats.decode_skipped, 1);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        assert!(matches!(
            PatternScanner::new("dds_[", None),
            Err(ScanError::InvalidPattern { .. })
        ));
    }
}

//! 公共类型（对外暴露）
use serde::Serialize;
use std::path::PathBuf;

use crate::options::ScanStats;
use crate::scanner::ResultSet;

/// 命中结果的来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "lister", rename_all = "lowercase")]
pub enum MatchSource {
    /// 由导出列举器给出（携带列举器名）
    Exports(String),
    /// 可打印字符串扫描
    Strings,
    /// 字节正则直扫
    Pattern,
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchSource::Exports(name) => write!(f, "exports ({name})"),
            MatchSource::Strings => f.write_str("binary strings"),
            MatchSource::Pattern => f.write_str("pattern"),
        }
    }
}

/// 单次检查的结果
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub path: PathBuf,
    pub source: MatchSource,
    /// 字典序、去重
    pub symbols: ResultSet,
    pub stats: ScanStats,
}

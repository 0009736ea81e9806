//! 扫描选项与统计信息（模块）
use serde::{Deserialize, Serialize};

/// 默认检索词（函数名中的写入/序列化相关片段）
pub const DEFAULT_TERMS: [&str; 3] = ["write", "create_serdata", "serdata_from"];
/// 默认最小 token 长度（含）
pub const DEFAULT_MIN_LEN: usize = 4;

/// 符号来源策略
/// - Auto：先用导出表解析器，再尝试外部 dumpbin，最后回退到字符串扫描
/// - Object / Dumpbin：只尝试指定的导出列举器，失败或无命中时回退到字符串扫描
/// - Strings：只做可打印字符串扫描
/// - Pattern：对原始字节直接跑正则（需要配置 pattern）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMethod {
    Auto,
    Object,
    Dumpbin,
    Strings,
    Pattern,
}

impl ScanMethod {
    /// 从命令行字符串解析；未知值返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "object" => Some(Self::Object),
            "dumpbin" => Some(Self::Dumpbin),
            "strings" => Some(Self::Strings),
            "pattern" => Some(Self::Pattern),
            _ => None,
        }
    }
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 每行一个符号，按字典序
    Text,
    /// 完整的 ScanReport（JSON）
    Json,
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 检索词；大小写敏感的子串匹配，至少一个
    pub terms: Vec<String>,
    /// 最小 token 长度（含）
    pub min_len: usize,
    /// 符号来源策略
    pub method: ScanMethod,
    /// Pattern 策略使用的字节正则
    pub pattern: Option<String>,
    /// Pattern 策略下要求命中值以此前缀开头
    pub require_prefix: Option<String>,
    /// 外部导出列举工具（程序名与前置参数，文件路径追加在最后）
    pub dumpbin_program: String,
    pub dumpbin_args: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            terms: DEFAULT_TERMS.iter().map(|s| s.to_string()).collect(),
            min_len: DEFAULT_MIN_LEN,
            method: ScanMethod::Auto,
            pattern: None,
            require_prefix: None,
            dumpbin_program: "dumpbin".to_string(),
            dumpbin_args: vec!["/EXPORTS".to_string()],
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub bytes_scanned: usize,
    pub tokens_seen: usize,
    pub candidates: usize,
    pub decode_skipped: usize,
    pub lister_attempts: usize,
}

//! 错误类型
use std::path::PathBuf;
use thiserror::Error;

/// 扫描流程错误（对调用方终止本次操作）
#[derive(Debug, Error)]
pub enum ScanError {
    /// 输入路径不存在；不重试
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// 未提供任何检索词
    #[error("at least one search term is required")]
    EmptyTargets,

    /// 正则编译失败
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// 检索词自动机构建失败
    #[error("failed to build term matcher: {0}")]
    TermMatcher(#[from] aho_corasick::BuildError),

    /// 选择了 pattern 策略但没有配置正则
    #[error("method `pattern` requires a pattern")]
    MissingPattern,

    /// 读取输入文件失败（权限不足等）
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写出结果失败
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 导出列举器错误；总是由调度方本地恢复（回退到字符串扫描）
#[derive(Debug, Error)]
pub enum ListError {
    #[error("{tool} unavailable: {reason}")]
    Unavailable { tool: String, reason: String },
}

impl ListError {
    pub(crate) fn unavailable(tool: &str, reason: impl ToString) -> Self {
        ListError::Unavailable { tool: tool.to_string(), reason: reason.to_string() }
    }
}

/// 配置文件错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

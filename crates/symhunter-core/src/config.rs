//! 配置文件加载（TOML）
//!
//! 所有字段都可省略；存在的字段覆盖 `ScanOptions` 中的对应值。
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::options::{ScanMethod, ScanOptions};

/// 外部导出列举工具配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DumpbinSection {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

/// 顶层配置文件结构
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub terms: Option<Vec<String>>,
    #[serde(default)]
    pub min_len: Option<usize>,
    #[serde(default)]
    pub method: Option<ScanMethod>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub require_prefix: Option<String>,
    #[serde(default)]
    pub dumpbin: DumpbinSection,
}

impl ConfigFile {
    /// 将配置叠加到选项上
    pub fn apply_to(self, opts: &mut ScanOptions) {
        if let Some(terms) = self.terms {
            opts.terms = terms;
        }
        if let Some(n) = self.min_len {
            opts.min_len = n;
        }
        if let Some(m) = self.method {
            opts.method = m;
        }
        if self.pattern.is_some() {
            opts.pattern = self.pattern;
        }
        if self.require_prefix.is_some() {
            opts.require_prefix = self.require_prefix;
        }
        if let Some(p) = self.dumpbin.program {
            opts.dumpbin_program = p;
        }
        if let Some(a) = self.dumpbin.args {
            opts.dumpbin_args = a;
        }
    }
}

/// 从 TOML 文件加载配置
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let txt = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    toml::from_str(&txt).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

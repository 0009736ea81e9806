//! 导出符号检索核心库
//!
//! 在编译好的原生库中查找名字包含指定片段的函数（例如写入、序列化相关的导出）。
//! - 优先通过导出列举器（`object` 解析导出表，或外部 dumpbin）拿到真实导出名；
//! - 列举器不可用或无命中时，回退到可打印字符串扫描：单趟切分可打印 ASCII 片段，
//!   先用检索词预筛，再用标识符形状 `^[A-Za-z0-9_]+$` 校验；
//! - 结果去重并按字典序输出。

mod config;
mod error;
mod listers;
mod options;
mod pattern;
mod scan;
mod scanner;
mod tokens;
mod types;

pub use config::{load_config, ConfigFile, DumpbinSection};
pub use error::{ConfigError, ListError, ScanError};
pub use listers::{DumpbinLister, ExportLister, ObjectLister};
pub use options::{OutputFormat, ScanMethod, ScanOptions, ScanStats, DEFAULT_MIN_LEN, DEFAULT_TERMS};
pub use pattern::PatternScanner;
pub use scan::{check_exports, check_exports_with, default_listers, write_report};
pub use scanner::{ResultSet, SymbolScanner};
pub use types::{MatchSource, ScanReport};

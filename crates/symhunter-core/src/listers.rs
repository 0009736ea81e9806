//! 导出符号列举器
//!
//! - `ObjectLister`：用 `object` 直接解析 PE/ELF/Mach-O 的导出表
//! - `DumpbinLister`：调用外部 `dumpbin /EXPORTS`，按列启发式取最后一列
//!
//! 任何失败都以 `ListError::Unavailable` 返回，由调度方回退到字符串扫描。

use std::path::Path;
use std::process::Command;

use object::{Object, ObjectSymbol};
use tracing::debug;

use crate::error::ListError;

/// 导出符号列举能力
pub trait ExportLister {
    /// 用于日志与报告中的来源名
    fn name(&self) -> &str;
    /// 列出文件的导出符号名（未过滤）
    fn list_exports(&self, path: &Path) -> Result<Vec<String>, ListError>;
}

/// 基于 `object` 的导出表解析
#[derive(Debug, Default, Clone)]
pub struct ObjectLister;

impl ExportLister for ObjectLister {
    fn name(&self) -> &str {
        "object"
    }

    fn list_exports(&self, path: &Path) -> Result<Vec<String>, ListError> {
        let data = std::fs::read(path).map_err(|e| ListError::unavailable(self.name(), e))?;
        let file = object::File::parse(&*data).map_err(|e| ListError::unavailable(self.name(), e))?;

        let mut names: Vec<String> = Vec::new();
        for ex in file.exports().map_err(|e| ListError::unavailable(self.name(), e))? {
            let name = String::from_utf8_lossy(ex.name()).into_owned();
            if !name.is_empty() {
                names.push(name);
            }
        }

        // 无导出表时退回到已定义的全局动态符号
        if names.is_empty() {
            for sym in file.dynamic_symbols() {
                if !(sym.is_global() && sym.is_definition()) {
                    continue;
                }
                if let Ok(name) = sym.name() {
                    if !name.is_empty() {
                        names.push(name.to_string());
                    }
                }
            }
        }

        debug!(?path, count = names.len(), "object exports listed");
        Ok(names)
    }
}

/// 外部 dumpbin（或兼容工具）列举
#[derive(Debug, Clone)]
pub struct DumpbinLister {
    program: String,
    args: Vec<String>,
}

impl DumpbinLister {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// 解析 dumpbin 文本输出
    /// 典型行格式：`ordinal hint RVA name`；至少 4 列的行取最后一列作为符号名
    pub fn parse_output(stdout: &str) -> Vec<String> {
        stdout
            .lines()
            .filter_map(|line| {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 4 {
                    parts.last().map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for DumpbinLister {
    fn default() -> Self {
        Self::new("dumpbin", vec!["/EXPORTS".to_string()])
    }
}

impl ExportLister for DumpbinLister {
    fn name(&self) -> &str {
        &self.program
    }

    fn list_exports(&self, path: &Path) -> Result<Vec<String>, ListError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ListError::unavailable(&self.program, "not found in PATH")
                } else {
                    ListError::unavailable(&self.program, e)
                }
            })?;
        if !output.status.success() {
            return Err(ListError::unavailable(&self.program, format!("exited with {}", output.status)));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let names = Self::parse_output(&stdout);
        debug!(program = %self.program, count = names.len(), "dumpbin exports listed");
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DUMPBIN_SAMPLE: &str = "\
Microsoft (R) COFF/PE Dumper Version 14.38.33135.0

Dump of file ddsc.dll

File Type: DLL

  Section contains the following exports for ddsc.dll

    00000000 characteristics
    FFFFFFFF time date stamp

    ordinal hint RVA      name

          1    0 00012340 dds_create_participant
          2    1 00012560 dds_write
          3    2 000128A0 ddsi_serdata_from_sample

  Summary
";

    #[test]
    fn dumpbin_last_column_of_wide_lines() {
        let names = DumpbinLister::parse_output(DUMPBIN_SAMPLE);
        assert!(names.contains(&"dds_create_participant".to_string()));
        assert!(names.contains(&"dds_write".to_string()));
        assert!(names.contains(&"ddsi_serdata_from_sample".to_string()));
        // 列启发式会带入表头行
        assert!(names.contains(&"name".to_string()));
        assert!(!names.iter().any(|n| n == "characteristics" || n == "Summary"));
    }

    #[test]
    fn missing_tool_is_unavailable() {
        let lister = DumpbinLister::new("symhunter-no-such-dumper", vec![]);
        let err = lister.list_exports(Path::new("whatever.dll")).unwrap_err();
        assert!(matches!(err, ListError::Unavailable { .. }));
        assert!(err.to_string().contains("not found in PATH"));
    }

    #[test]
    fn object_lister_rejects_non_object_files() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"plain text, not a library").unwrap();
        let err = ObjectLister.list_exports(f.path()).unwrap_err();
        assert!(matches!(err, ListError::Unavailable { .. }));
    }

    #[test]
    fn object_lister_parses_current_executable() {
        let exe = std::env::current_exe().unwrap();
        assert!(ObjectLister.list_exports(&exe).is_ok());
    }

    /// 系统 libc 的常见位置；都不存在时跳过
    const LIBC_CANDIDATES: [&str; 5] = [
        "/lib/x86_64-linux-gnu/libc.so.6",
        "/usr/lib/x86_64-linux-gnu/libc.so.6",
        "/lib/aarch64-linux-gnu/libc.so.6",
        "/lib64/libc.so.6",
        "/usr/lib/libc.so.6",
    ];

    #[test]
    fn object_lister_lists_libc_exports() {
        let libc = match LIBC_CANDIDATES.into_iter().map(Path::new).find(|p| p.exists()) {
            Some(p) => p,
            None => {
                eprintln!("skipping: no system libc found");
                return;
            }
        };
        let names = ObjectLister.list_exports(libc).unwrap();
        assert!(names.len() > 100);
        assert!(names.iter().any(|n| n == "fwrite"));
    }

    #[cfg(unix)]
    #[test]
    fn dumpbin_stand_in_output_is_parsed() {
        // 文件路径被追加为 sh -c 的 $0，不影响输出
        let lister = DumpbinLister::new(
            "sh",
            vec!["-c".to_string(), "echo '  1 0 0001 dds_write'".to_string()],
        );
        let names = lister.list_exports(Path::new("ddsc.dll")).unwrap();
        assert_eq!(names, vec!["dds_write".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn dumpbin_non_zero_exit_is_unavailable() {
        let lister = DumpbinLister::new("false", vec![]);
        let err = lister.list_exports(Path::new("ddsc.dll")).unwrap_err();
        assert!(matches!(err, ListError::Unavailable { .. }));
        assert!(err.to_string().contains("exited with"));
    }
}

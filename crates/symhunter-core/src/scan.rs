//! 检查主流程：导出列举器链 → 字符串扫描回退 → 报告输出
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::error::ScanError;
use crate::listers::{DumpbinLister, ExportLister, ObjectLister};
use crate::options::{OutputFormat, ScanMethod, ScanOptions, ScanStats};
use crate::pattern::PatternScanner;
use crate::scanner::{ResultSet, SymbolScanner};
use crate::types::{MatchSource, ScanReport};

/// 按选项构建默认的列举器链
/// - Auto：先 object（真实导出表），再 dumpbin（列启发式）
/// - Object / Dumpbin：仅对应一个
/// - Strings / Pattern：空链
pub fn default_listers(opts: &ScanOptions) -> Vec<Box<dyn ExportLister>> {
    let object = || -> Box<dyn ExportLister> { Box::new(ObjectLister) };
    let dumpbin = || -> Box<dyn ExportLister> {
        Box::new(DumpbinLister::new(opts.dumpbin_program.clone(), opts.dumpbin_args.clone()))
    };
    match opts.method {
        ScanMethod::Auto => vec![object(), dumpbin()],
        ScanMethod::Object => vec![object()],
        ScanMethod::Dumpbin => vec![dumpbin()],
        ScanMethod::Strings | ScanMethod::Pattern => Vec::new(),
    }
}

/// 检查单个文件的导出符号
pub fn check_exports(path: &Path, opts: &ScanOptions) -> Result<ScanReport, ScanError> {
    let listers = default_listers(opts);
    check_exports_with(path, opts, &listers)
}

/// 同 `check_exports`，列举器由调用方提供
/// 稳定性保证：同一输入与选项总是得到同一结果集（BTreeSet 天然有序）
pub fn check_exports_with(
    path: &Path,
    opts: &ScanOptions,
    listers: &[Box<dyn ExportLister>],
) -> Result<ScanReport, ScanError> {
    info!(?path, method = ?opts.method, "checking exports");
    if !path.exists() {
        return Err(ScanError::FileNotFound(path.to_path_buf()));
    }

    let mut stats = ScanStats::default();

    if opts.method == ScanMethod::Pattern {
        let pattern = opts.pattern.as_deref().ok_or(ScanError::MissingPattern)?;
        let scanner = PatternScanner::new(pattern, opts.require_prefix.clone())?;
        let blob = read_blob(path)?;
        let symbols = scanner.scan_with_stats(&blob, &mut stats);
        return Ok(report(path, MatchSource::Pattern, symbols, stats));
    }

    // 先构建扫描器：检索词为空在任何外部调用之前失败
    let scanner = SymbolScanner::new(&opts.terms, opts.min_len)?;

    for lister in listers {
        stats.lister_attempts += 1;
        match lister.list_exports(path) {
            Ok(names) => {
                let total = names.len();
                let symbols: ResultSet = names.into_iter().filter(|n| scanner.matches_target(n)).collect();
                if !symbols.is_empty() {
                    stats.candidates += symbols.len();
                    info!(lister = lister.name(), exports = total, matched = symbols.len(), "exports matched");
                    return Ok(report(path, MatchSource::Exports(lister.name().to_string()), symbols, stats));
                }
                info!(lister = lister.name(), exports = total, "lister ran but no matches found, trying next stage");
            }
            Err(e) => warn!(error = %e, "export lister unavailable, falling back"),
        }
    }

    info!("performing binary string search");
    let blob = read_blob(path)?;
    let symbols = scanner.scan_with_stats(&blob, &mut stats);
    Ok(report(path, MatchSource::Strings, symbols, stats))
}

/// 以结果格式写出报告
pub fn write_report(out: &mut dyn Write, report: &ScanReport, format: OutputFormat) -> Result<(), ScanError> {
    match format {
        OutputFormat::Text => {
            for s in &report.symbols {
                writeln!(out, "{s}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// 整体读入文件（句柄在读取结束后即释放）
fn read_blob(path: &Path) -> Result<Vec<u8>, ScanError> {
    std::fs::read(path).map_err(|source| ScanError::Io { path: path.to_path_buf(), source })
}

fn report(path: &Path, source: MatchSource, symbols: ResultSet, stats: ScanStats) -> ScanReport {
    ScanReport { path: path.to_path_buf(), source, symbols, stats }
}

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use symhunter_core::{check_exports, load_config, write_report, OutputFormat, ScanMethod, ScanOptions};
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "symhunter", version, about = "在原生库中检索导出符号")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 检查库文件并输出命中的符号名
    Scan {
        /// 输入文件（DLL / SO / dylib 等）
        #[arg(long)]
        input: PathBuf,

        /// 检索词（可重复；大小写敏感的子串匹配）
        #[arg(long = "term")]
        terms: Vec<String>,

        /// 最小片段长度（含）
        #[arg(long)]
        min_len: Option<usize>,

        /// 符号来源：auto、object、dumpbin、strings 或 pattern
        #[arg(long, value_parser = ["auto", "object", "dumpbin", "strings", "pattern"])]
        method: Option<String>,

        /// pattern 方式使用的字节正则，例如 'dds_[a-zA-Z0-9_]+'
        #[arg(long)]
        pattern: Option<String>,

        /// pattern 方式下只保留以此开头的命中
        #[arg(long)]
        require_prefix: Option<String>,

        /// 外部导出列举程序（默认 dumpbin）
        #[arg(long)]
        dumpbin: Option<String>,

        /// 配置文件路径（TOML）
        #[arg(long)]
        config: Option<PathBuf>,

        /// 输出格式：text 或 json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// 输出文件；缺省写到标准输出
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            input,
            terms,
            min_len,
            method,
            pattern,
            require_prefix,
            dumpbin,
            config,
            format,
            output,
        } => {
            // 选项分层：默认值 → 配置文件 → 命令行
            let mut opts = ScanOptions::default();
            if let Some(path) = &config {
                load_config(path).context("load config")?.apply_to(&mut opts);
            }
            if !terms.is_empty() {
                opts.terms = terms;
            }
            if let Some(n) = min_len {
                opts.min_len = n;
            }
            if let Some(m) = method {
                opts.method = ScanMethod::parse(&m).ok_or_else(|| anyhow!("unknown method: {m}"))?;
            }
            if pattern.is_some() {
                opts.pattern = pattern;
            }
            if require_prefix.is_some() {
                opts.require_prefix = require_prefix;
            }
            if let Some(p) = dumpbin {
                opts.dumpbin_program = p;
            }

            let format = match format.as_str() {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Text,
            };

            info!(?input, terms = ?opts.terms, "starting scan");
            let report = check_exports(&input, &opts).context("check exports failed")?;

            let mut out: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path).context("create output file")?)),
                None => Box::new(BufWriter::new(std::io::stdout().lock())),
            };
            write_report(&mut *out, &report, format).context("write report")?;
            out.flush().context("flush output")?;

            info!(source = %report.source, matched = report.symbols.len(), "scan finished");
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只保留结果
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

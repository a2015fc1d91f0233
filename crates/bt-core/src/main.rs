//! Bibliographic timeline report generator.
//!
//! Reads a spreadsheet of publications and writes year, month, timeline
//! and author charts plus a composite HTML report.

use bt_core::config::{load_config, ConfigOptions};
use bt_core::exit_codes::ExitCode;
use bt_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel, Stage};
use bt_core::{Pipeline, RunSummary};
use clap::Parser;
use std::path::PathBuf;

/// Generate publication-time charts and an analysis report from a spreadsheet
#[derive(Parser, Debug)]
#[command(name = "bt-core")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input spreadsheet (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Directory receiving the charts and the report
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Log level (overrides BT_LOG and RUST_LOG)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Log format on stderr (overrides BT_LOG_FORMAT)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and exit cleanly.
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = cli
        .log_level
        .or_else(|| LogLevel::from_verbosity(cli.verbose, cli.quiet));
    init_logging(&LogConfig::from_env(cli_level, cli.log_format));

    let run_id = generate_run_id();
    let span = tracing::info_span!("run", %run_id);
    let _entered = span.enter();

    let exit_code = match run(&cli) {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::Clean
        }
        Err(err) => {
            let code = ExitCode::from(&err);
            tracing::error!(
                error_code = err.code(),
                kind = %err.kind(),
                exit = %code,
                "{err}"
            );
            eprintln!("{}", err.format_human());
            code
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> bt_common::Result<RunSummary> {
    let options = ConfigOptions {
        config_path: cli.config.clone(),
        input: cli.input.clone(),
        output_dir: cli.output_dir.clone(),
    };
    let resolved = load_config(&options)?;
    tracing::info!(
        stage = %Stage::Config,
        source = ?resolved.source,
        "Configuration loaded"
    );

    let summary = Pipeline::new(resolved.config).run()?;
    tracing::info!(
        records = summary.records,
        authors = summary.authors,
        report = %summary.report.display(),
        "Analysis complete"
    );
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!("=== 分析完成 ===");
    println!("已生成以下文件:");
    for path in summary.outputs() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("- {name}");
    }
}

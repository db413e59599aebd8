// Main entry point for testlens

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{info, warn};

use testlens::cli::{Cli, Commands, CorrelateArgs, OutputFormat, ParseArgs, ReportArgs};
use testlens::config::Config;
use testlens::correlate::{self, CorrelationMode, TreeNode};
use testlens::parse;
use testlens::report::{ConsoleSink, JsonSink, ReportSink};
use testlens::session::{ReportBuilder, SessionEvent};

use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from file (if exists)
    let config = Config::load().unwrap_or_default();

    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose {
        "testlens=debug,warn"
    } else {
        "testlens=warn,error"
    };

    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .event_format(testlens::logging::CompactFormatter)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    if cli.verbose {
        info!("Starting testlens v{}", env!("CARGO_PKG_VERSION"));
    }

    // Handle config flag
    if cli.config {
        println!("{}", config.to_toml());
        return Ok(());
    }

    // Handle completion flag
    if let Some(shell_name) = &cli.completion {
        let shell: clap_complete::Shell = shell_name
            .parse()
            .map_err(|_| anyhow::anyhow!("Unsupported shell: {}", shell_name))?;
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "testlens", &mut std::io::stdout());
        return Ok(());
    }

    match cli.command {
        Some(Commands::Parse(args)) => run_parse(args, &config).await,
        Some(Commands::Report(args)) => run_report(args).await,
        Some(Commands::Correlate(args)) => run_correlate(args, &config).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Read a whole input file, with "-" standing for stdin
async fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        use tokio::io::AsyncReadExt;
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn sink_for(format: OutputFormat, output: Option<std::path::PathBuf>) -> Box<dyn ReportSink> {
    match format {
        OutputFormat::Console => Box::new(ConsoleSink::new()),
        OutputFormat::Json => Box::new(JsonSink::new(output)),
    }
}

async fn run_parse(args: ParseArgs, config: &Config) -> Result<()> {
    let text = read_input(&args.input).await?;
    let results = parse::parse_output(&text, &config.parser);

    if results.is_empty() {
        warn!("no test results recognized in input");
    }

    sink_for(args.format, args.output).write_results(&results)?;

    if results.values().any(|outcome| !outcome.passed) {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_report(args: ReportArgs) -> Result<()> {
    let text = read_input(&args.input).await?;

    let events: Vec<SessionEvent> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()
        .context("Failed to parse session event stream")?;

    let report = ReportBuilder::new()
        .collect_stream(tokio_stream::iter(events))
        .await
        .context("Session event stream violated the run protocol")?;

    match report {
        Some(report) => {
            let failed = report.stats.failures > 0;
            sink_for(args.format, args.output).write_report(&report)?;
            if failed {
                std::process::exit(1);
            }
        }
        None => {
            // Stream ended without a run-end event
            warn!("event stream produced no report");
        }
    }
    Ok(())
}

async fn run_correlate(args: CorrelateArgs, config: &Config) -> Result<()> {
    let tree_json = tokio::fs::read_to_string(&args.tree)
        .await
        .with_context(|| format!("Failed to read {}", args.tree.display()))?;
    let mut tree: TreeNode =
        serde_json::from_str(&tree_json).context("Failed to parse test tree JSON")?;

    let text = read_input(&args.input).await?;
    let results = parse::parse_output(&text, &config.parser);

    let mode = if args.strict || config.correlate.strict {
        CorrelationMode::Strict
    } else {
        CorrelationMode::Lenient
    };
    correlate::apply_parsed(&mut tree, &results, mode);

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, &tree)
                .context("Failed to serialize annotated tree")?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
    }
    Ok(())
}

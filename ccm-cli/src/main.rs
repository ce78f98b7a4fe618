use anyhow::{Context, Result};
use ccm_ingest::{LayoutParser, OutputFormat, StatementRecord, write_records};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

mod config;
mod extract;
mod state;

use config::Config;
use extract::{TextExtractor, list_documents};

#[derive(Parser, Debug)]
#[command(
    name = "ccm2csv",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CCM_BUILD_SHA"), ")"),
    about = "Convert bank statement PDFs into a transaction table"
)]
struct Cli {
    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file (default: ~/.ccm2csv/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract and parse every PDF statement in a directory into one table
    Convert {
        /// Directory containing the statement PDFs
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format: csv or json (default from config)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Parse already extracted layout text files, in the order given
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: csv or json (default from config)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file (never overwrites)
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Convert {
            input,
            output,
            format,
        } => {
            let cfg = config::load_config(config_path)?;
            let format = format.unwrap_or(cfg.output.format);
            let records = convert_dir(&cfg, &input)?;
            write_output(&records, format, Some(&output))?;
            println!(
                "Wrote {} records ({}) to {}",
                records.len(),
                format,
                output.display()
            );
        }

        Command::Parse {
            files,
            output,
            format,
        } => {
            let cfg = config::load_config(config_path)?;
            let format = format.unwrap_or(cfg.output.format);
            let records = parse_text_files(&cfg, &files)?;
            write_output(&records, format, output.as_deref())?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config(config_path)?;
            }
            ConfigCommand::Show => {
                let cfg = config::load_config(config_path)?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Extract every statement PDF in `dir` and parse them in file-name order.
fn convert_dir(cfg: &Config, dir: &Path) -> Result<Vec<StatementRecord>> {
    let parser = LayoutParser::new(cfg.layout.clone())?;
    let extractor = TextExtractor::locate(&cfg.extractor)?;

    let docs = list_documents(dir, "pdf")?;
    if docs.is_empty() {
        warn!(dir = %dir.display(), "no PDF statements found");
    }

    let mut all = Vec::new();
    for doc in &docs {
        let text = extractor
            .extract(doc)
            .with_context(|| format!("extracting {}", doc.display()))?;
        let records = parser.parse(&text);
        info!(document = %doc.display(), records = records.len(), "parsed statement");
        all.extend(records);
    }

    summarize(docs.len(), &all);
    Ok(all)
}

fn parse_text_files(cfg: &Config, files: &[PathBuf]) -> Result<Vec<StatementRecord>> {
    let parser = LayoutParser::new(cfg.layout.clone())?;

    let mut all = Vec::new();
    for path in files {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let records = parser.parse(&String::from_utf8_lossy(&bytes));
        info!(document = %path.display(), records = records.len(), "parsed statement");
        all.extend(records);
    }

    summarize(files.len(), &all);
    Ok(all)
}

fn summarize(documents: usize, records: &[StatementRecord]) {
    let dates: Vec<_> = records.iter().filter_map(|r| r.transaction_date()).collect();
    let without_amount = records.iter().filter(|r| !r.has_amount()).count();

    match (dates.iter().min(), dates.iter().max()) {
        (Some(first), Some(last)) => info!(
            documents,
            records = records.len(),
            without_amount,
            first = %first,
            last = %last,
            "done"
        ),
        _ => info!(documents, records = records.len(), without_amount, "done"),
    }
}

fn write_output(
    records: &[StatementRecord],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_records(records, format, BufWriter::new(file))
                .with_context(|| format!("write {}", path.display()))
        }
        None => write_records(records, format, io::stdout().lock()),
    }
}

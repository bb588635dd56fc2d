use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use grph_lib::constants::{DEFAULT_LOG_FILE, DEFAULT_OVERLAP};
use grph_lib::{
    open_input, parse_overlap, parse_records, GrphError, OverlapConfig, OverlapIndex,
    OverlapIndexBuilder,
};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "grph")]
#[command(version = "0.1.0")]
#[command(about = "Overlap Graphs", long_about = None)]
struct Cli {
    /// FASTA file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Size of overlap
    #[arg(
        short = 'k',
        long = "overlap",
        value_name = "SIZE",
        default_value_t = DEFAULT_OVERLAP,
        value_parser = parse_overlap,
        allow_negative_numbers = true
    )]
    overlap: usize,

    /// Debug
    #[arg(short, long)]
    debug: bool,

    /// Log file for debug output (overwritten on every run)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

/// Report a usage error the way clap does and exit
fn usage_error(err: &GrphError) -> ! {
    let kind = match err {
        GrphError::InvalidOverlap(_) => ErrorKind::ValueValidation,
        _ => ErrorKind::Io,
    };
    Cli::command().error(kind, err).exit()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `overlap` was validated by `parse_overlap`.
    let config = OverlapConfig {
        k: cli.overlap,
        ..OverlapConfig::default()
    }
    .with_debug(cli.debug)
    .with_log_file(&cli.log_file);

    // The input is opened and read from before the log file is touched so
    // that a bad path is a usage error.
    let input = match open_input(&cli.file) {
        Ok(input) => input,
        Err(e) if e.is_usage() => usage_error(&e),
        Err(e) => return Err(e.into()),
    };

    init_logging(&config)?;
    config.print();

    let index = build_index(&cli, &config, input)?;

    let stdout = io::stdout();
    match write_pairs(&index, stdout.lock()) {
        Ok(num_pairs) => info!("Wrote {} overlap pairs", num_pairs),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => debug!("stdout closed, stopping"),
        Err(e) => return Err(e).context("Failed to write overlap pairs"),
    }

    Ok(())
}

/// Install the tracing subscriber writing to the log file
///
/// The file is truncated on every run. Without `--debug` nothing is logged;
/// with it the filter comes from `RUST_LOG`, defaulting to `debug`.
fn init_logging(config: &OverlapConfig) -> anyhow::Result<()> {
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file.display()))?;

    let filter = if config.debug {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"))
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Read every record of `input` into an overlap index
fn build_index<R>(cli: &Cli, config: &OverlapConfig, input: R) -> anyhow::Result<OverlapIndex>
where
    R: Read + Send,
{
    let source_name = cli.file.display().to_string();
    info!("Building overlap index...");
    info!("  Input: {}", source_name);

    let mut builder = OverlapIndexBuilder::new(config.k);
    let num_records = parse_records(input, &source_name, |record| {
        builder.add_record(&record);
        Ok(())
    })
    .with_context(|| format!("Failed to read records from {}", source_name))?;
    info!("  Loaded {} records", num_records);

    let index = builder.build();
    index.log_buckets();
    index.summary().print_summary();

    Ok(index)
}

/// Print one `<source> <target>` line per overlap pair
fn write_pairs<W: Write>(index: &OverlapIndex, out: W) -> io::Result<usize> {
    let mut out = BufWriter::new(out);
    let mut num_pairs = 0;
    for pair in index.pairs() {
        writeln!(out, "{}", pair)?;
        num_pairs += 1;
    }
    out.flush()?;
    Ok(num_pairs)
}

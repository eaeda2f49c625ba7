//! lcp - Lazy Copy
//!
//! Copy one file in fixed-size chunks, powered by lazycopy.

use clap::{ArgAction, Parser, ValueEnum};
use lazycopy::{
    ChunkSize, CopyOptions, CopyStats, Error as LazycopyError, ErrorCode, OnConflict, copy_file,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// lcp - Bounded-memory file copy
///
/// Copy a single file by reading and writing fixed-size chunks, so memory
/// use never exceeds one chunk whatever the file size.
///
/// Usage:
///   lcp SOURCE DEST
///   lcp SOURCE DIRECTORY
#[derive(Parser, Debug)]
#[command(name = "lcp", version, about, long_about = None)]
struct Args {
    /// Source file
    source: PathBuf,

    /// Destination file, or an existing directory to copy into
    destination: PathBuf,

    /// Bytes read and written per cycle
    #[arg(
        short = 's',
        long,
        value_name = "BYTES",
        default_value_t = 4096,
        allow_negative_numbers = true
    )]
    chunk_size: i64,

    /// What to do when the destination already exists
    #[arg(short = 'c', long, value_enum, default_value = "overwrite")]
    on_conflict: ConflictStrategy,

    /// Sync the destination to disk before closing it
    #[arg(long)]
    fsync: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Do not print a summary on success
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Verbose output (-v for debug logs, -vv for per-chunk logs)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConflictStrategy {
    /// Truncate and rewrite the existing file (default)
    Overwrite,
    /// Leave the existing file unchanged
    Skip,
    /// Fail if destination exists
    Error,
}

impl From<ConflictStrategy> for OnConflict {
    fn from(s: ConflictStrategy) -> Self {
        match s {
            ConflictStrategy::Overwrite => OnConflict::Overwrite,
            ConflictStrategy::Skip => OnConflict::Skip,
            ConflictStrategy::Error => OnConflict::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    InvalidOption(LazycopyError),

    #[error("Source has no filename: {path}")]
    SourceHasNoFilename { path: PathBuf },

    #[error(transparent)]
    Copy(LazycopyError),
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidOption(source) | Self::Copy(source) => source.code(),
            Self::SourceHasNoFilename { .. } => ErrorCode::InvalidArgument,
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidArgument | ErrorCode::InvalidPath => 2,
        _ => 1,
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Failures before the destination is resolved report it as given
    let (dest, result) = match prepare(&args) {
        Ok((options, dest)) => {
            let result = run(&args, &options, &dest);
            (dest, result)
        }
        Err(error) => (args.destination.clone(), Err(error)),
    };

    if let Err(error) = result {
        tracing::debug!(code = %error.code(), "copy failed");
        if args.output == OutputMode::Json {
            print_json_value(&failure_json(&args, &dest, &error));
        }
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(exit_code_for(error.code()));
    }
}

/// Send logs to stderr; `RUST_LOG` overrides the level picked by `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validate options, then resolve the destination path.
fn prepare(args: &Args) -> CliResult<(CopyOptions, PathBuf)> {
    // Options first: a bad chunk size must fail before any file is touched
    let options = build_options(args)?;
    let dest = resolve_destination(&args.source, &args.destination)?;
    Ok((options, dest))
}

fn run(args: &Args, options: &CopyOptions, dest: &Path) -> CliResult<()> {
    tracing::debug!(
        source = %args.source.display(),
        destination = %dest.display(),
        chunk_size = options.chunk_size.get(),
        "starting copy"
    );

    let outcome = copy_file(&args.source, dest, options).map_err(CliError::Copy)?;

    match args.output {
        OutputMode::Json => {
            print_json_value(&success_json(args, dest, options, outcome.as_ref()));
        }
        OutputMode::Human if !args.quiet => {
            print_summary(dest, outcome.as_ref(), args.verbose > 0);
        }
        OutputMode::Human => {}
    }

    Ok(())
}

fn build_options(args: &Args) -> CliResult<CopyOptions> {
    let chunk_size = ChunkSize::try_from(args.chunk_size).map_err(CliError::InvalidOption)?;

    let mut options = CopyOptions::default()
        .with_chunk_size(chunk_size)
        .with_on_conflict(args.on_conflict.into());

    if args.fsync {
        options = options.with_fsync();
    }

    Ok(options)
}

/// Copying into an existing directory keeps the source's file name.
fn resolve_destination(src: &Path, dest: &Path) -> CliResult<PathBuf> {
    if dest.is_dir() {
        let filename = src
            .file_name()
            .ok_or_else(|| CliError::SourceHasNoFilename {
                path: src.to_path_buf(),
            })?;
        Ok(dest.join(filename))
    } else {
        Ok(dest.to_path_buf())
    }
}

fn success_json(
    args: &Args,
    dest: &Path,
    options: &CopyOptions,
    stats: Option<&CopyStats>,
) -> Value {
    let mut obj = serde_json::Map::new();
    obj.insert(
        "source".to_owned(),
        Value::String(display_path(&args.source)),
    );
    obj.insert("destination".to_owned(), Value::String(display_path(dest)));
    obj.insert(
        "chunk_size".to_owned(),
        Value::Number(u64::from(options.chunk_size).into()),
    );

    match stats {
        Some(stats) => {
            obj.insert("outcome".to_owned(), Value::String("copied".to_owned()));
            obj.insert(
                "bytes_copied".to_owned(),
                Value::Number(stats.bytes_copied.into()),
            );
            obj.insert("chunks".to_owned(), Value::Number(stats.chunks.into()));
        }
        None => {
            obj.insert("outcome".to_owned(), Value::String("skipped".to_owned()));
        }
    }

    Value::Object(obj)
}

fn failure_json(args: &Args, dest: &Path, error: &CliError) -> Value {
    json!({
        "source": display_path(&args.source),
        "destination": display_path(dest),
        "outcome": "failed",
        "error_code": error.code().as_str(),
        "error_message": error.to_string(),
    })
}

fn print_summary(dest: &Path, stats: Option<&CopyStats>, verbose: bool) {
    let Some(stats) = stats else {
        println!("Skipped {} (destination exists)", dest.display());
        return;
    };

    let bytes_str = format_bytes(stats.bytes_copied);

    if verbose {
        println!("Copy completed in {:?}", stats.duration);
        println!("  Destination:    {}", dest.display());
        println!("  Total size:     {}", bytes_str);
        println!("  Chunks:         {}", stats.chunks);
        println!("  Slowest write:  {:?}", stats.slowest_write);

        if stats.duration.as_secs_f64() > 0.0 {
            let speed = stats.bytes_copied as f64 / stats.duration.as_secs_f64();
            println!("  Speed:          {}/s", format_bytes(speed as u64));
        }
    } else {
        println!(
            "Copied {} to {} ({} chunks)",
            bytes_str,
            dest.display(),
            stats.chunks
        );
    }
}

fn print_json_value(value: &Value) {
    println!("{value}");
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

//! line-csv - Decode, encode, check and normalize line-oriented CSV files
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 2 | Check found problem lines |
//! | 3 | File I/O or input error |

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use line_csv::checker::CsvChecker;
use line_csv::cli::{Args, Mode};
use line_csv::codec::{CsvFileReader, CsvFileWriter};
use line_csv::error::LineCsvError;
use line_csv::normalizer::CsvNormalizer;
use line_csv::transcode::{decode_to_json, encode_from_json};

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for a check that found problem lines
const EXIT_CHECK_FAILURE: u8 = 2;
/// Exit code for file I/O and input errors
const EXIT_IO_ERROR: u8 = 3;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: Configuration error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    init_tracing(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

/// Installs a stderr `fmt` subscriber; `RUST_LOG` takes precedence over `--log-level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), LineCsvError> {
    match args.mode {
        Mode::Decode => run_decode_mode(args),
        Mode::Encode => run_encode_mode(args),
        Mode::Check => run_check_mode(args),
        Mode::Normalize => run_normalize_mode(args),
    }
}

/// Opens `--output`, or stdout when absent.
fn open_output(args: &Args) -> Result<Box<dyn Write>, LineCsvError> {
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    Ok(writer)
}

fn run_decode_mode(args: &Args) -> Result<(), LineCsvError> {
    let mut reader = CsvFileReader::open(&args.file)?;
    let rows = decode_to_json(&mut reader, open_output(args)?)?;
    tracing::info!(rows, lines = reader.line_number(), "decode finished");
    Ok(())
}

fn run_encode_mode(args: &Args) -> Result<(), LineCsvError> {
    let input = BufReader::new(File::open(&args.file)?);
    let mut writer = CsvFileWriter::from_writer(open_output(args)?);
    let rows = encode_from_json(input, &mut writer)?;

    let stats = writer.stats();
    if stats.fields_with_newline > 0 {
        eprintln!(
            "Warning: {} field(s) contained line breaks and were written unescaped",
            stats.fields_with_newline
        );
    }
    tracing::info!(rows, quoted = stats.quoted_fields, "encode finished");
    Ok(())
}

fn run_check_mode(args: &Args) -> Result<(), LineCsvError> {
    eprintln!("Checking file: {:?}", args.file);

    let mut checker = CsvChecker::new(args.expected_fields);
    let stats = checker.check(&args.file)?;

    println!("{}", stats);

    if stats.is_clean() {
        eprintln!("Check complete. All {} lines are clean.", stats.total_lines);
        Ok(())
    } else {
        eprintln!(
            "Check failed. {} of {} lines have problems.",
            stats.problem_lines, stats.total_lines
        );
        Err(LineCsvError::CheckFailed(format!(
            "{} problem lines found",
            stats.problem_lines
        )))
    }
}

fn run_normalize_mode(args: &Args) -> Result<(), LineCsvError> {
    // validate() guarantees an output path in normalize mode.
    let output = args.output.as_ref().ok_or_else(|| {
        LineCsvError::InvalidArgument("--output is required for normalize mode".to_string())
    })?;

    eprintln!("Input file: {:?}", args.file);
    eprintln!("Output file: {:?}", output);

    let normalizer = CsvNormalizer::new(!args.drop_blank_lines);
    let stats = normalizer.normalize(&args.file, output)?;

    println!("{}", stats);
    eprintln!(
        "Normalize complete. {} lines written, {} rewritten.",
        stats.written_lines(),
        stats.rewritten_lines
    );
    Ok(())
}

/// Maps an error to the process exit code.
fn error_to_exit_code(error: &LineCsvError) -> u8 {
    match error {
        LineCsvError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        LineCsvError::CheckFailed(_) => EXIT_CHECK_FAILURE,
        LineCsvError::Io(_) => EXIT_IO_ERROR,
        LineCsvError::Json(_) => EXIT_IO_ERROR,
        LineCsvError::InvalidInput { .. } => EXIT_IO_ERROR,
    }
}

mod config;

use clap::Parser;
use config::{Config, ConfigError};
use d86_decoder::{disassemble, DecodeError, DisassemblySummary};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Disassemble 8086 machine code into a NASM listing")]
struct Opt {
    /// The binary file to disassemble
    binary: PathBuf,

    /// Write the listing to this file instead of next to the binary
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the listing to standard output
    #[arg(long)]
    stdout: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log more, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not open {} ({})", .0.display(), .1)]
    Open(PathBuf, #[source] std::io::Error),

    #[error("Could not create {} ({})", .0.display(), .1)]
    Create(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Names the listing after the binary by appending `suffix` to the full file name, so
/// `listing_37` becomes `listing_37_dec.asm`.
fn output_path_for(binary: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(binary.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn write_listing(
    input: BufReader<File>,
    output: &mut impl Write,
) -> Result<DisassemblySummary, Error> {
    let summary = disassemble(input, output)?;
    output.flush().map_err(DecodeError::from)?;
    Ok(summary)
}

fn run(opt: &Opt, config: &Config) -> Result<(), Error> {
    let input = File::open(&opt.binary).map_err(|err| Error::Open(opt.binary.clone(), err))?;
    let input = BufReader::new(input);

    let start = Instant::now();

    let summary = if opt.stdout {
        write_listing(input, &mut std::io::stdout().lock())?
    } else {
        let path = match &opt.output {
            Some(path) => path.clone(),
            None => output_path_for(&opt.binary, &config.output_suffix),
        };

        info!("Writing listing to {}", path.display());

        let file = File::create(&path).map_err(|err| Error::Create(path.clone(), err))?;
        write_listing(input, &mut BufWriter::new(file))?
    };

    info!(
        "Disassembled {} bytes ({} instructions, {} unrecognized) in {:?}",
        summary.bytes,
        summary.instructions,
        summary.unrecognized,
        start.elapsed()
    );

    Ok(())
}

fn main() -> ExitCode {
    let opt = Opt::parse();

    // Logging is not up yet, so config errors go straight to stderr.
    let (config, level) = match Config::load(opt.config.as_deref())
        .and_then(|config| config.log_level(opt.verbose).map(|level| (config, level)))
    {
        Ok(r) => r,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&opt, &config) {
        error!("{}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

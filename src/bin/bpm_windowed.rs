//! Thin CLI front end over [`bpm_windowed::Aligner`].
//!
//! Grounded on `pa-bitpacking/src/main.rs`'s `clap::Parser` CLI shape and
//! `astar-map/src/main.rs`'s `env_logger` setup
//! (`env_logger::Builder::from_default_env().format_timestamp(None).init()`).
//! Pattern/text can be given positionally or read from a two-record FASTA
//! file via `--fasta`, echoing the shape of `quicked`'s command-line
//! benchmarking front end without pulling in its benchmarking harness.

use std::path::PathBuf;
use std::process::ExitCode;

use bio::io::fasta;
use bpm_windowed::{Aligner, Params, Status};
use clap::Parser;

#[derive(Parser)]
#[command(about = "Windowed bit-parallel Myers (BPM) edit-distance aligner")]
struct Cli {
    #[command(flatten)]
    params: Params,

    /// The pattern sequence (ignored if --fasta is given).
    pattern: Option<String>,

    /// The text sequence (ignored if --fasta is given).
    text: Option<String>,

    /// Read pattern and text as the first two records of a FASTA file,
    /// instead of from positional arguments.
    #[arg(long)]
    fasta: Option<PathBuf>,

    /// Print the result as a JSON object instead of the plain `score\tcigar`
    /// line, for consumption by a benchmarking harness.
    #[arg(long)]
    json: bool,
}

fn read_fasta_pair(path: &PathBuf) -> std::io::Result<(Vec<u8>, Vec<u8>)> {
    let reader = fasta::Reader::from_file(path)?;
    let mut records = reader.records();
    let pattern = records
        .next()
        .expect("FASTA file must contain at least two records")
        .expect("malformed FASTA record")
        .seq()
        .to_vec();
    let text = records
        .next()
        .expect("FASTA file must contain at least two records")
        .expect("malformed FASTA record")
        .seq()
        .to_vec();
    (pattern, text)
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let (pattern, text) = if let Some(path) = &cli.fasta {
        match read_fasta_pair(path) {
            Ok(pair) => pair,
            Err(err) => {
                log::error!("failed to read FASTA file {path:?}: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        match (&cli.pattern, &cli.text) {
            (Some(pattern), Some(text)) => (pattern.clone().into_bytes(), text.clone().into_bytes()),
            _ => {
                log::error!("either --fasta or both a pattern and a text argument are required");
                return ExitCode::FAILURE;
            }
        }
    };

    let json = cli.json;
    let mut aligner = Aligner::new(cli.params);
    match aligner.align(&pattern, &text) {
        Status::Ok => {
            if json {
                if let Err(err) = serde_json::to_writer(std::io::stdout(), &aligner.result()) {
                    log::error!("failed to serialize result: {err}");
                    return ExitCode::FAILURE;
                }
                println!();
            } else {
                let score = aligner.score().unwrap_or(-1);
                match aligner.cigar() {
                    Some(cigar) => println!("{score}\t{cigar}"),
                    None => println!("{score}"),
                }
            }
            ExitCode::SUCCESS
        }
        status => {
            log::error!("alignment failed: {status:?}");
            ExitCode::FAILURE
        }
    }
}

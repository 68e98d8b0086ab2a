use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use franklin::{encode_pattern, FmIndex, PackedDna};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "franklin", about = "Compressed full-text search over nucleotide sequences")]
struct Cli {
    /// Emit build and query tracing to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count exact occurrences of a pattern in the reference.
    Count {
        /// Reference sequence (plain FASTA without headers or raw sequence file).
        reference: PathBuf,
        /// Pattern over A/C/G/T.
        pattern: String,
    },
    /// Report the text offset of one occurrence of a pattern.
    Locate {
        /// Reference sequence (plain FASTA or raw sequence).
        reference: PathBuf,
        /// Pattern over A/C/G/T.
        pattern: String,
    },
    /// Find the maximal mappable suffix of a pattern (N acts as a wildcard).
    Mms {
        /// Reference sequence (plain FASTA or raw sequence).
        reference: PathBuf,
        /// Pattern over A/C/G/T/N.
        pattern: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Count { reference, pattern } => {
            let index = build_index(&reference)?;
            let encoded = encode_pattern(pattern.as_bytes())?;
            let count = index.count(&encoded)?;
            println!("{count}");
        }
        Commands::Locate { reference, pattern } => {
            let index = build_index(&reference)?;
            let encoded = encode_pattern(pattern.as_bytes())?;
            match index.locate(&encoded)? {
                Some(offset) => println!("{offset}"),
                None => println!("not found"),
            }
        }
        Commands::Mms { reference, pattern } => {
            let index = build_index(&reference)?;
            let encoded = encode_pattern(pattern.as_bytes())?;
            let result = index.mms(&encoded)?;
            println!(
                "matched {} of {} bases\tinterval=[{}, {})\toccurrences={}",
                result.matched,
                encoded.len(),
                result.rows.start,
                result.rows.end,
                result.rows.len()
            );
        }
    }

    Ok(())
}

fn build_index(reference_path: &PathBuf) -> Result<FmIndex> {
    let sequence = read_sequence_file(reference_path)
        .with_context(|| format!("failed to read reference from {}", reference_path.display()))?;
    let packed = PackedDna::from_ascii(&sequence).context("failed to pack reference sequence")?;
    let index = FmIndex::build(&packed).context("failed to build fm-index")?;
    Ok(index)
}

fn read_sequence_file(path: &PathBuf) -> Result<Vec<u8>> {
    let contents = std::fs::read_to_string(path)?;
    let sequence: String = contents
        .lines()
        .filter(|line| !line.starts_with('>') && !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("");
    Ok(sequence.trim().to_ascii_uppercase().into_bytes())
}

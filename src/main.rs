//! CLI for converting topic-modeling corpora
//!
//! Usage:
//! ```bash
//! cargo run -- encode --input dtm.csv --output corpus.ldac
//! cargo run -- decode --input corpus.ldac --output dtm.csv
//! cargo run -- tokens --input corpus.ldac
//! cargo run -- inspect --input corpus.ldac
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use topic_corpus::{
    degenerate_axes, from_ldac_sparse, from_ldac_with, matrix_to_stream,
    utils::io::{read_dense_csv, write_dense_csv},
    write_ldac, CountMatrix, DegenerateAxis, LdacConfig,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "topic_corpus")]
#[command(version = "0.1.0")]
#[command(about = "Convert document-term matrices, token streams and LDA-C corpora", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Args)]
struct IoArgs {
    /// Input file (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dense CSV count matrix to LDA-C
    Encode {
        #[command(flatten)]
        paths: IoArgs,

        /// Log progress every N documents (0 disables)
        #[arg(long, default_value = "1000")]
        progress_every: usize,
    },

    /// LDA-C to dense CSV count matrix
    Decode {
        #[command(flatten)]
        paths: IoArgs,

        /// Check each line's unique-term count
        #[arg(long)]
        validate_counts: bool,
    },

    /// LDA-C to a JSON token stream {"words": [...], "docs": [...]}
    Tokens {
        #[command(flatten)]
        paths: IoArgs,

        /// Check each line's unique-term count
        #[arg(long)]
        validate_counts: bool,
    },

    /// Print corpus statistics for an LDA-C file
    Inspect {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Encode {
            paths,
            progress_every,
        } => run_encode(&paths, progress_every),
        Commands::Decode {
            paths,
            validate_counts,
        } => run_decode(&paths, validate_counts),
        Commands::Tokens {
            paths,
            validate_counts,
        } => run_tokens(&paths, validate_counts),
        Commands::Inspect { input } => run_inspect(input.as_ref()),
    }
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn run_encode(paths: &IoArgs, progress_every: usize) -> Result<()> {
    let dtm = read_dense_csv(open_input(paths.input.as_ref())?)?;
    info!(
        "Encoding {} documents x {} terms",
        dtm.nrows(),
        dtm.ncols()
    );

    let config = LdacConfig::new().progress_every(progress_every);
    let mut out = open_output(paths.output.as_ref())?;
    let written = write_ldac(&dtm, &mut out, &config)?;

    info!("Wrote {} documents", written);
    Ok(())
}

fn run_decode(paths: &IoArgs, validate_counts: bool) -> Result<()> {
    let config = LdacConfig::new().validate_term_count(validate_counts);
    let dtm = from_ldac_with(open_input(paths.input.as_ref())?, &config)?;
    info!("Decoded {} documents x {} terms", dtm.nrows(), dtm.ncols());

    write_dense_csv(&dtm, open_output(paths.output.as_ref())?)?;
    Ok(())
}

fn run_tokens(paths: &IoArgs, validate_counts: bool) -> Result<()> {
    let config = LdacConfig::new().validate_term_count(validate_counts);
    let dtm = from_ldac_sparse(open_input(paths.input.as_ref())?, &config)?;

    let stream = matrix_to_stream(&dtm);
    info!("Expanded corpus into {} tokens", stream.len());

    let mut out = open_output(paths.output.as_ref())?;
    serde_json::to_writer(&mut out, &stream)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn run_inspect(input: Option<&PathBuf>) -> Result<()> {
    let dtm = from_ldac_sparse(open_input(input)?, &LdacConfig::default())?;
    let (n_docs, n_terms) = dtm.dims();

    println!("Documents:      {}", n_docs);
    println!("Vocabulary:     {}", n_terms);
    println!("Tokens:         {}", CountMatrix::total(&dtm));
    println!("Non-zero cells: {}", dtm.nnz());

    for degeneracy in degenerate_axes(&dtm) {
        let label = match degeneracy.axis {
            DegenerateAxis::Rows => "Empty documents",
            DegenerateAxis::Columns => "Unused terms",
        };
        println!("{}: {:?}", label, degeneracy.indices);
    }

    Ok(())
}

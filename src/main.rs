use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, error};
use serde::Serialize;

use token_align::error::{Error, Result};
use token_align::tokenizer::{tokenize, Mode};
use token_align::{compute_distance, render, EditCounts, MatchPair};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print the aligned index pairs
    #[arg(short, long)]
    debug: bool,
    /// Reference then hypothesis text, unless read from files
    texts: Vec<String>,
    #[arg(long, value_name = "FILE")]
    ref_file: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    hyp_file: Option<PathBuf>,
    /// Split into characters (CER) or words (WER)
    #[arg(short, long, value_enum, default_value_t = Mode::Chars)]
    mode: Mode,
    /// Marker printed where one side has no token
    #[arg(long, default_value = "***")]
    gap: String,
    /// Print counts and matches as JSON
    #[arg(long)]
    json: bool,
    #[arg(long)]
    no_color: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    distance: usize,
    error_rate: f64,
    counts: EditCounts,
    matches: &'a [MatchPair],
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn input(
    file: Option<&Path>,
    texts: &mut impl Iterator<Item = String>,
    side: &'static str,
) -> Result<String> {
    match file {
        Some(path) => read_text(path),
        None => texts.next().ok_or(Error::MissingInput(side)),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut texts = cli.texts.into_iter();
    let reference_text = input(cli.ref_file.as_deref(), &mut texts, "ref")?;
    let hypothesis_text = input(cli.hyp_file.as_deref(), &mut texts, "hyp")?;
    let reference = tokenize(reference_text.trim_end_matches('\n'), cli.mode);
    let hypothesis = tokenize(hypothesis_text.trim_end_matches('\n'), cli.mode);
    debug!(
        "{} reference and {} hypothesis tokens",
        reference.len(),
        hypothesis.len()
    );

    let distance = compute_distance(&hypothesis, &reference);
    if cli.json {
        let report = Report {
            distance: distance.edits,
            error_rate: distance.counts.error_rate(),
            counts: distance.counts,
            matches: distance.matches.as_slice(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.debug {
        for pair in distance.matches.iter() {
            println!("{:?}", pair);
        }
    }
    let c = distance.counts;
    let rate_name = match cli.mode {
        Mode::Chars => "CER",
        Mode::Words => "WER",
    };
    println!(
        "{}: {:.2}% (N={} C={} S={} D={} I={})",
        rate_name,
        c.error_rate() * 100.,
        c.reference_len,
        c.correct,
        c.substitutions,
        c.deletions,
        c.insertions
    );
    render(&reference, &hypothesis, &distance.matches).pretty(&cli.gap);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

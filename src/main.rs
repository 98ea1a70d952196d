use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use itertools::Itertools;
use tracing::warn;

use silmari::logging::{self, Profile};
use silmari::{
    CountCheck, CountSummary, GlossaryEntry, GlossaryStore, check_actual, compute_counts, expand,
    final_count, track_rows, unresolved,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Glossary file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "SILMARI_GLOSSARY",
        default_value = "data/symbols.json"
    )]
    glossary: PathBuf,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up an abbreviation or term
    Lookup {
        #[arg(required = true)]
        query: Vec<String>,

        /// Reject matches scoring below this (0-100)
        #[arg(long, value_name = "SCORE")]
        min_score: Option<f64>,
    },
    /// List every glossary entry
    List,
    /// Expand a pattern into single stitches
    Expand {
        #[arg(required = true)]
        pattern: Vec<String>,
    },
    /// Show the stitch count after every stitch of a pattern
    Count {
        #[arg(required = true)]
        pattern: Vec<String>,

        /// Stitches on the needle before the pattern
        #[arg(short, long)]
        start: i64,
    },
    /// Expected counts row by row, one row per line
    Rows {
        /// Rows file; reads stdin if omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(short, long)]
        start: i64,

        /// Your actual count after the last row
        #[arg(short, long)]
        actual: Option<i64>,
    },
    /// Glossary terms mentioned in a text
    Detect {
        /// Text file; reads stdin if omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let profile = if args.log_json {
        Profile::Production
    } else {
        Profile::Development
    };
    logging::init(profile, args.verbose);

    let store = GlossaryStore::new();
    let glossary = store
        .load(&args.glossary)
        .with_context(|| format!("loading glossary {}", args.glossary.display()))?;

    match args.command {
        Command::Lookup { query, min_score } => {
            let query = query.join(" ");
            let found = match min_score {
                Some(floor) => glossary
                    .find_term_with_floor(&query, floor)
                    .map(|m| (m.key, m.entry)),
                None => glossary.find_term(&query),
            };
            match found {
                Some((key, entry)) => print_entry(key, entry),
                None => println!("{}", format!("No term found for {query:?}.").red()),
            }
        }
        Command::List => {
            for (key, entry) in glossary.entries() {
                print_entry(key, entry);
                println!();
            }
        }
        Command::Expand { pattern } => {
            let tokens = expand(&pattern.join(" "));
            println!("{}", tokens.iter().join(", "));
            println!("{} stitches", tokens.len());
        }
        Command::Count { pattern, start } => {
            let tokens = expand(&pattern.join(" "));
            let steps = compute_counts(&tokens, start, &glossary);
            println!("{:>5}  {:<10} {:>6} {:>6}", "step", "stitch", "delta", "count");
            for step in &steps {
                println!(
                    "{:>5}  {:<10} {:>+6} {:>6}",
                    step.step,
                    step.token.as_str(),
                    step.delta,
                    step.count
                );
            }
            let summary = CountSummary::of(&steps, start);
            println!(
                "Expected count after {} steps: {} ({:+})",
                summary.steps,
                summary.end.to_string().bold(),
                summary.net()
            );
            warn_unresolved(&steps);
        }
        Command::Rows {
            file,
            start,
            actual,
        } => {
            let text = read_input(file.as_ref())?;
            let reports = track_rows(&text, start, &glossary);
            for report in &reports {
                println!(
                    "{:<8} {:>6} -> {:>6} ({:+})  {}",
                    report.label,
                    report.start,
                    report.end,
                    report.delta(),
                    report.pattern
                );
            }
            let expected = final_count(&reports, start);
            println!("Expected count after all rows: {}", expected.to_string().bold());

            match actual.map(|actual| check_actual(expected, actual)) {
                Some(CountCheck::Match) => println!("{}", "Your count matches.".green()),
                Some(CountCheck::Mismatch {
                    expected,
                    actual,
                    difference,
                }) => {
                    println!(
                        "{}",
                        format!("Mismatch: expected {expected}, counted {actual} ({difference:+}).")
                            .yellow()
                    );
                    println!("Check the rows with increases or decreases first.");
                }
                None => {}
            }
        }
        Command::Detect { file } => {
            let text = read_input(file.as_ref())?;
            for key in glossary.detect_terms(&text) {
                if let Some(entry) = glossary.get(key) {
                    println!("{key:<8} {}", entry.name);
                }
            }
        }
    }
    Ok(())
}

fn print_entry(key: &str, entry: &GlossaryEntry) {
    println!("{} ({})", entry.name.as_str().bold(), key);
    if !entry.desc.is_empty() {
        println!("{}", entry.desc);
    }
    if !entry.compare.is_empty() {
        println!("Compare: {}", entry.compare.iter().join(", "));
    }
    for media in &entry.media {
        println!("- {}: {}", media.kind, media.url);
    }
}

fn warn_unresolved(steps: &[silmari::CountStep]) {
    let unknown = unresolved(steps);
    if unknown.is_empty() {
        return;
    }
    let listed = unknown.iter().unique().join(", ");
    warn!(tokens = %listed, "counted unrecognised stitches as zero");
    println!(
        "{}",
        format!("Unrecognised stitches counted as 0: {listed}").yellow()
    );
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

pub mod commands;
pub mod study_file;

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use leitner_core::{AnswerDifficulty, Flashcard, ProgressStats, MAX_BUCKET};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::study_file::{StudyFile, DEFAULT_RETIRED_BUCKET};

#[derive(Parser)]
#[command(version, about = "Modified-Leitner flashcard scheduler", long_about = None)]
pub struct Cli {
    /// Path to the study file.
    #[arg(long, global = true, env = "LEITNER_FILE", default_value = "leitner.json")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty study file.
    Init {
        /// Index of the retired bucket.
        #[arg(
            long,
            default_value_t = DEFAULT_RETIRED_BUCKET,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_BUCKET as u64),
        )]
        retired: usize,
    },
    /// Add a card to bucket 0.
    Add {
        #[arg(long)]
        front: String,
        #[arg(long)]
        back: String,
        #[arg(long)]
        hint: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List the cards due today.
    Practice {
        /// Day to schedule for. Defaults to the study file's current day.
        #[arg(long)]
        day: Option<u64>,
        /// Show a hint for each card.
        #[arg(long)]
        hints: bool,
    },
    /// Record an answer and move the card.
    Answer {
        #[arg(long)]
        front: String,
        #[arg(long)]
        back: String,
        /// wrong, hard or easy.
        #[arg(long)]
        difficulty: AnswerDifficulty,
    },
    /// Show a hint for a card.
    Hint {
        #[arg(long)]
        front: String,
    },
    /// Show the lowest and highest occupied buckets.
    Range,
    /// Show progress statistics.
    Progress {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Move on to the next day.
    Advance,
}

#[derive(ValueEnum, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    execute(&cli.file, cli.command)
}

/// Run one command against the study file at `path`.
pub fn execute(path: &Path, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Init { retired } => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            StudyFile::new(retired).save(path)?;
            println!("Created {} with retired bucket {retired}.", path.display());
        }
        Command::Add {
            front,
            back,
            hint,
            tags,
        } => {
            let mut study = StudyFile::load(path)?;
            let mut flashcard = Flashcard::new(front, back).with_tags(tags);
            flashcard.hint = hint;
            commands::add(&mut study, flashcard)?;
            study.save(path)?;
        }
        Command::Practice { day, hints } => {
            let study = StudyFile::load(path)?;
            let day = day.unwrap_or(study.day);
            let due = commands::practice(&study, day, hints);
            println!("{} card(s) due on day {day}.", due.len());
            for card in due {
                match card.hint {
                    Some(hint) => println!("[{}] {} ({hint})", card.bucket, card.front),
                    None => println!("[{}] {}", card.bucket, card.front),
                }
            }
        }
        Command::Answer {
            front,
            back,
            difficulty,
        } => {
            let mut study = StudyFile::load(path)?;
            let moved = commands::answer(&mut study, &front, &back, difficulty)?;
            study.save(path)?;
            println!("Moved from bucket {} to bucket {}.", moved.from, moved.to);
        }
        Command::Hint { front } => {
            let study = StudyFile::load(path)?;
            println!("{}", commands::hint(&study, &front)?);
        }
        Command::Range => {
            let study = StudyFile::load(path)?;
            match commands::range(&study) {
                Some(range) => println!("Buckets {} to {}.", range.min, range.max),
                None => println!("No cards filed."),
            }
        }
        Command::Progress { format } => {
            let study = StudyFile::load(path)?;
            let stats = commands::progress(&study)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text => print_progress(&stats),
            }
        }
        Command::Advance => {
            let mut study = StudyFile::load(path)?;
            let day = commands::advance(&mut study);
            study.save(path)?;
            println!("Day {day}.");
        }
    }
    Ok(())
}

fn print_progress(stats: &ProgressStats) {
    println!("Cards: {} ({} retired)", stats.total_cards, stats.retired_cards);
    for (bucket, count) in &stats.cards_by_bucket {
        println!("  bucket {bucket}: {count}");
    }
    println!(
        "Practice events: {} ({:.1}% correct, {:.2} per card)",
        stats.total_practice_events, stats.success_rate, stats.average_moves_per_card
    );
    if !stats.hardest_cards.is_empty() {
        println!("Hardest cards:");
        for card in &stats.hardest_cards {
            println!("  {} / {}", card.front, card.back);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_retired(args: &[&str]) -> Result<usize, clap::Error> {
        let cli = Cli::try_parse_from(["leitner", "init"].iter().chain(args))?;
        match cli.command {
            Command::Init { retired } => Ok(retired),
            _ => unreachable!("parsed a non-init command"),
        }
    }

    #[test]
    fn retired_defaults_to_five() {
        assert_eq!(init_retired(&[]).unwrap(), DEFAULT_RETIRED_BUCKET);
    }

    #[test]
    fn retired_must_fit_the_cadence_range() {
        assert_eq!(init_retired(&["--retired", "63"]).unwrap(), 63);
        assert!(init_retired(&["--retired", "64"]).is_err());
        assert!(init_retired(&["--retired", "1000000000000"]).is_err());
        assert!(init_retired(&["--retired", "0"]).is_err());
    }

    #[test]
    fn difficulty_parses_from_arguments() {
        let cli = Cli::try_parse_from([
            "leitner", "answer", "--front", "uno", "--back", "one", "--difficulty", "hard",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Answer {
                difficulty: AnswerDifficulty::Hard,
                ..
            }
        ));
    }
}

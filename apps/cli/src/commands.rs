//! Study operations on a loaded [`StudyFile`].
//!
//! Each function works on in-memory state; loading, saving and printing are
//! left to the caller.

use leitner_core::{
    apply, compute_progress_with, get_range, hint_with, select_for_day, to_sequence,
    AnswerDifficulty, BucketRange, Card, Flashcard, PracticeRecord, ProgressStats,
};
use thiserror::Error;

use crate::study_file::StudyFile;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no card with front {front:?} and back {back:?}")]
    CardNotFound { front: String, back: String },

    #[error("no card with front {0:?}")]
    FrontNotFound(String),

    #[error("a card with front {front:?} and back {back:?} already exists")]
    DuplicateCard { front: String, back: String },

    #[error("cannot add cards to a study file without bucket 0 and a retired bucket")]
    NoOpenBucket,

    #[error(transparent)]
    Progress(#[from] leitner_core::ProgressError),
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// A card due for practice.
#[derive(Debug, Clone, PartialEq)]
pub struct DueCard {
    pub bucket: usize,
    pub front: String,
    pub back: String,
    pub hint: Option<String>,
}

/// Outcome of answering a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

/// File a new card in bucket 0.
pub fn add(study: &mut StudyFile, flashcard: Flashcard) -> Result<()> {
    if study.find_card(&flashcard.front, &flashcard.back).is_some() {
        return Err(CommandError::DuplicateCard {
            front: flashcard.front,
            back: flashcard.back,
        });
    }
    // A lone bucket 0 would turn into the retired bucket.
    if study.buckets.retired_bucket().map_or(true, |retired| retired == 0) {
        return Err(CommandError::NoOpenBucket);
    }
    tracing::info!(front = %flashcard.front, "adding card");
    study.buckets.insert(0, Card::new(flashcard));
    Ok(())
}

/// Cards due on `day`, with hints when `with_hints` is set.
pub fn practice(study: &StudyFile, day: u64, with_hints: bool) -> Vec<DueCard> {
    let due = select_for_day(&to_sequence(&study.buckets), day);
    due.iter()
        .map(|card| DueCard {
            bucket: study.buckets.bucket_of(card).unwrap_or_default(),
            front: card.front.clone(),
            back: card.back.clone(),
            hint: with_hints.then(|| hint_with(card, &study.settings)),
        })
        .collect()
}

/// Record an answer for the card with this text and move it.
pub fn answer(
    study: &mut StudyFile,
    front: &str,
    back: &str,
    difficulty: AnswerDifficulty,
) -> Result<Move> {
    let (from, card) =
        study
            .find_card(front, back)
            .ok_or_else(|| CommandError::CardNotFound {
                front: front.to_string(),
                back: back.to_string(),
            })?;

    study.buckets = apply(&study.buckets, &card, difficulty);
    study
        .history
        .push(PracticeRecord::for_card(&card, difficulty));

    let to = study.buckets.bucket_of(&card).unwrap_or(from);
    tracing::info!(front, %difficulty, from, to, "recorded answer");
    Ok(Move { from, to })
}

pub fn hint(study: &StudyFile, front: &str) -> Result<String> {
    study
        .find_by_front(front)
        .map(|card| hint_with(&card, &study.settings))
        .ok_or_else(|| CommandError::FrontNotFound(front.to_string()))
}

pub fn range(study: &StudyFile) -> Option<BucketRange> {
    get_range(&to_sequence(&study.buckets))
}

pub fn progress(study: &StudyFile) -> Result<ProgressStats> {
    Ok(compute_progress_with(
        &study.buckets,
        &study.history,
        &study.settings,
    )?)
}

/// Move to the next day, returning it.
pub fn advance(study: &mut StudyFile) -> u64 {
    study.day += 1;
    study.day
}

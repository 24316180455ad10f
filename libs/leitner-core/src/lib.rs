//! Modified-Leitner spaced repetition core.
//!
//! Provides:
//! - Bucket representations (sparse map, dense sequence) and conversions
//! - Day-based practice selection
//! - Bucket reassignment after a practice trial
//! - Prompt hints
//! - Progress statistics over practice history
//!
//! Every function is pure: callers own the bucket mapping and the practice
//! log, and persist whatever is returned.

pub mod buckets;
pub mod error;
pub mod hint;
pub mod progress;
pub mod scheduler;
pub mod types;
pub mod updater;

pub use buckets::{get_range, to_sequence, BucketMap, BucketSequence, MAX_BUCKET};
pub use error::{ParseDifficultyError, ProgressError, Result};
pub use hint::{hint, hint_with};
pub use progress::{compute_progress, compute_progress_with};
pub use scheduler::select_for_day;
pub use types::{
    AnswerDifficulty, BucketRange, Card, CardSet, Flashcard, LeitnerSettings, PracticeRecord,
    ProgressStats,
};
pub use updater::apply;

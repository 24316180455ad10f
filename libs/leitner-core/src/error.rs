//! Error types for leitner-core.

use thiserror::Error;

/// Result type alias using ProgressError.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// A bucket mapping that cannot be summarized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("expected bucket 0 and a retired bucket, found {found} bucket(s)")]
    TooFewBuckets { found: usize },

    #[error("bucket 0 is missing")]
    MissingStartBucket,

    #[error("retired bucket {retired} is above the highest supported bucket {max}")]
    RetiredBucketTooLarge { retired: usize, max: usize },
}

/// Text that does not name an answer difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid answer difficulty: {value:?} (expected wrong, hard or easy)")]
pub struct ParseDifficultyError {
    pub value: String,
}

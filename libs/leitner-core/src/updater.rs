//! Bucket reassignment after a practice trial.

use crate::buckets::BucketMap;
use crate::types::{AnswerDifficulty, Card};

/// Where a card in bucket `current` moves after an answer of `difficulty`.
///
/// `retired` is the highest bucket of the mapping the card was filed in.
pub fn next_bucket(current: usize, retired: usize, difficulty: AnswerDifficulty) -> usize {
    match difficulty {
        AnswerDifficulty::Easy if current >= retired => retired,
        AnswerDifficulty::Easy => current + 1,
        AnswerDifficulty::Hard => current.saturating_sub(1),
        AnswerDifficulty::Wrong => 0,
    }
}

/// Move `card` according to `difficulty`, returning the new mapping.
///
/// `map` is left untouched. A card that is not filed anywhere leaves the
/// returned mapping equal to `map`.
///
/// A bucket emptied by the move is dropped unless it is bucket 0 or the
/// retired bucket. The retired bucket is taken from `map` before the move.
pub fn apply(map: &BucketMap, card: &Card, difficulty: AnswerDifficulty) -> BucketMap {
    let mut updated = map.clone();

    let (Some(current), Some(retired)) = (updated.bucket_of(card), updated.retired_bucket())
    else {
        tracing::debug!(front = %card.front, "card not filed in any bucket, nothing to update");
        return updated;
    };

    updated.remove(current, card);
    if current != 0 && current != retired && updated.get(current).is_some_and(|c| c.is_empty()) {
        updated.remove_bucket(current);
    }

    let destination = next_bucket(current, retired, difficulty);
    updated.insert(destination, card.clone());

    tracing::debug!(
        front = %card.front,
        %difficulty,
        from = current,
        to = destination,
        "moved card"
    );
    updated
}

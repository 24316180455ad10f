//! Modified-Leitner practice selection.
//!
//! Bucket `i` comes up every `2^i` days. The last bucket of a sequence is
//! retired and never comes up.

use crate::buckets::BucketSequence;
use crate::types::CardSet;

/// Whether bucket `bucket` is due on `day`.
///
/// Buckets whose cadence does not fit in a `u64` are only due on day 0.
pub fn is_due(bucket: usize, day: u64) -> bool {
    match u32::try_from(bucket)
        .ok()
        .and_then(|shift| 1u64.checked_shl(shift))
    {
        Some(cadence) => day % cadence == 0,
        None => day == 0,
    }
}

/// The cards to practice on `day`, counted from 0.
pub fn select_for_day(sequence: &BucketSequence<'_>, day: u64) -> CardSet {
    let mut due = CardSet::new();
    let Some(retired) = sequence.last_index() else {
        return due;
    };

    // Gaps are empty, so only buckets backed by the map need a look.
    for (index, cards) in sequence.occupied() {
        if index < retired && is_due(index, day) {
            tracing::trace!(bucket = index, cards = cards.len(), day, "bucket due");
            due.extend(cards.iter().cloned());
        }
    }
    due
}

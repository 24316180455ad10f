//! Progress statistics over bucket distribution and practice history.
//!
//! History entries identify cards by (front, back) text, so two distinct cards
//! with the same text are counted together here.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::buckets::{BucketMap, MAX_BUCKET};
use crate::error::{ProgressError, Result};
use crate::types::{AnswerDifficulty, Flashcard, LeitnerSettings, PracticeRecord, ProgressStats};

/// Summarize progress, listing the three hardest cards.
pub fn compute_progress(map: &BucketMap, history: &[PracticeRecord]) -> Result<ProgressStats> {
    compute_progress_with(map, history, &LeitnerSettings::default())
}

/// Like [`compute_progress`], listing `settings.hardest_cards_limit` hardest cards.
///
/// Fails if `map` lacks bucket 0 or a retired bucket above it, or if the
/// retired bucket is above [`MAX_BUCKET`].
pub fn compute_progress_with(
    map: &BucketMap,
    history: &[PracticeRecord],
    settings: &LeitnerSettings,
) -> Result<ProgressStats> {
    let retired = validate(map)?;

    let cards_by_bucket: BTreeMap<usize, usize> = (0..=retired)
        .map(|index| (index, map.get(index).map_or(0, |cards| cards.len())))
        .collect();
    let total_cards = cards_by_bucket.values().sum();

    let total_practice_events = history.len();
    let correct = history
        .iter()
        .filter(|record| record.difficulty.is_correct())
        .count();
    let success_rate = if total_practice_events > 0 {
        correct as f64 / total_practice_events as f64 * 100.0
    } else {
        0.0
    };

    let mut events_per_card: IndexMap<(&str, &str), usize> = IndexMap::new();
    let mut wrong_per_card: IndexMap<(&str, &str), usize> = IndexMap::new();
    for record in history {
        let key = (record.card_front.as_str(), record.card_back.as_str());
        *events_per_card.entry(key).or_default() += 1;
        if record.difficulty == AnswerDifficulty::Wrong {
            *wrong_per_card.entry(key).or_default() += 1;
        }
    }

    // Stable sort: ties stay in order of each card's first wrong answer.
    let mut hardest: Vec<((&str, &str), usize)> = wrong_per_card.into_iter().collect();
    hardest.sort_by(|a, b| b.1.cmp(&a.1));
    let hardest_cards = hardest
        .into_iter()
        .take(settings.hardest_cards_limit)
        .map(|((front, back), _)| Flashcard::new(front, back))
        .collect();

    let average_moves_per_card = if events_per_card.is_empty() {
        0.0
    } else {
        total_practice_events as f64 / events_per_card.len() as f64
    };

    Ok(ProgressStats {
        total_cards,
        cards_by_bucket,
        retired_cards: map.get(retired).map_or(0, |cards| cards.len()),
        success_rate,
        hardest_cards,
        average_moves_per_card,
        total_practice_events,
    })
}

/// Check the mapping has bucket 0 and a distinct retired bucket, returning the latter.
fn validate(map: &BucketMap) -> Result<usize> {
    if map.len() < 2 {
        tracing::warn!(buckets = map.len(), "cannot compute progress without a retired bucket");
        return Err(ProgressError::TooFewBuckets { found: map.len() });
    }
    if !map.contains_bucket(0) {
        tracing::warn!("cannot compute progress without bucket 0");
        return Err(ProgressError::MissingStartBucket);
    }
    // Two distinct unsigned keys, one of them 0, put the maximum above 0.
    let retired = map
        .retired_bucket()
        .ok_or(ProgressError::TooFewBuckets { found: 0 })?;
    if retired > MAX_BUCKET {
        tracing::warn!(retired, "retired bucket too large to report on");
        return Err(ProgressError::RetiredBucketTooLarge {
            retired,
            max: MAX_BUCKET,
        });
    }
    Ok(retired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, CardSet};
    use pretty_assertions::assert_eq;

    fn record(front: &str, back: &str, difficulty: AnswerDifficulty) -> PracticeRecord {
        PracticeRecord {
            card_front: front.to_string(),
            card_back: back.to_string(),
            difficulty,
        }
    }

    fn filed(map: &mut BucketMap, index: usize, front: &str) {
        map.insert(index, Card::new(Flashcard::new(front, "back")));
    }

    #[test]
    fn rejects_single_bucket() {
        let map: BucketMap = [(0, CardSet::new())].into_iter().collect();
        assert_eq!(
            compute_progress(&map, &[]),
            Err(ProgressError::TooFewBuckets { found: 1 })
        );
    }

    #[test]
    fn rejects_empty_mapping() {
        assert_eq!(
            compute_progress(&BucketMap::new(), &[]),
            Err(ProgressError::TooFewBuckets { found: 0 })
        );
    }

    #[test]
    fn rejects_missing_bucket_zero() {
        let map: BucketMap = [(1, CardSet::new()), (4, CardSet::new())]
            .into_iter()
            .collect();
        assert_eq!(
            compute_progress(&map, &[]),
            Err(ProgressError::MissingStartBucket)
        );
    }

    #[test]
    fn rejects_retired_bucket_past_cadence_range() {
        let map = BucketMap::with_retired(usize::MAX);
        assert_eq!(
            compute_progress(&map, &[]),
            Err(ProgressError::RetiredBucketTooLarge {
                retired: usize::MAX,
                max: MAX_BUCKET,
            })
        );

        let stats = compute_progress(&BucketMap::with_retired(MAX_BUCKET), &[]).unwrap();
        assert_eq!(stats.cards_by_bucket.len(), MAX_BUCKET + 1);
    }

    #[test]
    fn empty_study_set_has_zero_totals() {
        let stats = compute_progress(&BucketMap::with_retired(1), &[]).unwrap();
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.cards_by_bucket, BTreeMap::from([(0, 0), (1, 0)]));
        assert_eq!(stats.retired_cards, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert!(stats.hardest_cards.is_empty());
        assert_eq!(stats.average_moves_per_card, 0.0);
        assert_eq!(stats.total_practice_events, 0);
    }

    #[test]
    fn counts_cards_per_bucket_including_gaps() {
        let mut map = BucketMap::with_retired(4);
        filed(&mut map, 0, "a");
        filed(&mut map, 0, "b");
        filed(&mut map, 2, "c");
        filed(&mut map, 4, "d");

        let stats = compute_progress(&map, &[]).unwrap();
        assert_eq!(stats.total_cards, 4);
        assert_eq!(
            stats.cards_by_bucket,
            BTreeMap::from([(0, 2), (1, 0), (2, 1), (3, 0), (4, 1)])
        );
        assert_eq!(stats.retired_cards, 1);
    }

    #[test]
    fn success_rate_counts_hard_as_correct() {
        let map = BucketMap::with_retired(3);
        let history = [
            record("a", "1", AnswerDifficulty::Easy),
            record("a", "1", AnswerDifficulty::Hard),
            record("b", "2", AnswerDifficulty::Wrong),
            record("b", "2", AnswerDifficulty::Easy),
        ];
        let stats = compute_progress(&map, &history).unwrap();
        assert_eq!(stats.success_rate, 75.0);
        assert_eq!(stats.total_practice_events, 4);
        assert_eq!(stats.average_moves_per_card, 2.0);
    }

    #[test]
    fn perfect_history_is_one_hundred_percent() {
        let map = BucketMap::with_retired(3);
        let history = [
            record("a", "1", AnswerDifficulty::Easy),
            record("b", "2", AnswerDifficulty::Hard),
        ];
        let stats = compute_progress(&map, &history).unwrap();
        assert_eq!(stats.success_rate, 100.0);
        assert!(stats.hardest_cards.is_empty());
    }

    #[test]
    fn hardest_cards_rank_by_wrong_count() {
        let map = BucketMap::with_retired(3);
        let history = [
            record("a", "1", AnswerDifficulty::Wrong),
            record("b", "2", AnswerDifficulty::Wrong),
            record("b", "2", AnswerDifficulty::Wrong),
            record("c", "3", AnswerDifficulty::Wrong),
            record("d", "4", AnswerDifficulty::Wrong),
            record("d", "4", AnswerDifficulty::Wrong),
            record("d", "4", AnswerDifficulty::Wrong),
            record("e", "5", AnswerDifficulty::Easy),
        ];
        let stats = compute_progress(&map, &history).unwrap();
        assert_eq!(
            stats.hardest_cards,
            vec![
                Flashcard::new("d", "4"),
                Flashcard::new("b", "2"),
                Flashcard::new("a", "1"),
            ]
        );
    }

    #[test]
    fn hardest_ties_keep_first_wrong_order() {
        let map = BucketMap::with_retired(3);
        let history = [
            record("a", "1", AnswerDifficulty::Easy),
            record("b", "2", AnswerDifficulty::Wrong),
            record("a", "1", AnswerDifficulty::Wrong),
        ];
        let stats = compute_progress(&map, &history).unwrap();
        assert_eq!(
            stats.hardest_cards,
            vec![Flashcard::new("b", "2"), Flashcard::new("a", "1")]
        );
    }

    #[test]
    fn groups_by_front_and_back_together() {
        let map = BucketMap::with_retired(3);
        let history = [
            record("bank", "river side", AnswerDifficulty::Wrong),
            record("bank", "money store", AnswerDifficulty::Easy),
            record("bank", "river side", AnswerDifficulty::Easy),
        ];
        let stats = compute_progress(&map, &history).unwrap();
        assert_eq!(stats.average_moves_per_card, 1.5);
        assert_eq!(stats.hardest_cards, vec![Flashcard::new("bank", "river side")]);
    }

    #[test]
    fn hardest_limit_follows_settings() {
        let map = BucketMap::with_retired(3);
        let history: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|front| record(front, "x", AnswerDifficulty::Wrong))
            .collect();
        let settings = LeitnerSettings {
            hardest_cards_limit: 1,
            ..Default::default()
        };
        let stats = compute_progress_with(&map, &history, &settings).unwrap();
        assert_eq!(stats.hardest_cards, vec![Flashcard::new("a", "x")]);
    }
}

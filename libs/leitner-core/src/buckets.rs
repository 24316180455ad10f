//! Bucket representations and conversions between them.
//!
//! [`BucketMap`] is the canonical, sparse form: bucket index to the cards in
//! it. [`BucketSequence`] is a dense, read-only view of a map used for
//! scheduling scans. The highest index present in a map is its retired bucket.
//!
//! Bucket `i` is practiced every `2^i` days, so indices above [`MAX_BUCKET`]
//! never come up after day 0. Reports over every index refuse maps past it.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{BucketRange, Card, CardSet};

/// Highest bucket index whose cadence `2^i` fits in a `u64` day count.
pub const MAX_BUCKET: usize = 63;

/// Bucket index to the set of cards in that bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketMap {
    buckets: BTreeMap<usize, CardSet>,
}

impl BucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty study set: bucket 0 and the retired bucket, both empty.
    pub fn with_retired(retired: usize) -> Self {
        let mut map = Self::new();
        map.buckets.insert(0, CardSet::new());
        map.buckets.insert(retired, CardSet::new());
        map
    }

    /// File `card` in bucket `index`, creating the bucket if needed.
    ///
    /// Returns false if the card was already in that bucket. Callers filing a
    /// card that lives in another bucket break the one-bucket-per-card rule.
    pub fn insert(&mut self, index: usize, card: Card) -> bool {
        self.buckets.entry(index).or_default().insert(card)
    }

    /// Remove `card` from bucket `index`. Returns whether it was there.
    pub(crate) fn remove(&mut self, index: usize, card: &Card) -> bool {
        self.buckets
            .get_mut(&index)
            .is_some_and(|cards| cards.shift_remove(card))
    }

    pub(crate) fn remove_bucket(&mut self, index: usize) -> Option<CardSet> {
        self.buckets.remove(&index)
    }

    pub fn get(&self, index: usize) -> Option<&CardSet> {
        self.buckets.get(&index)
    }

    pub fn contains_bucket(&self, index: usize) -> bool {
        self.buckets.contains_key(&index)
    }

    /// The bucket holding `card`, scanning indices in ascending order.
    pub fn bucket_of(&self, card: &Card) -> Option<usize> {
        self.buckets
            .iter()
            .find(|(_, cards)| cards.contains(card))
            .map(|(&index, _)| index)
    }

    /// The highest bucket index present, whether or not it holds cards.
    pub fn retired_bucket(&self) -> Option<usize> {
        self.buckets.keys().next_back().copied()
    }

    /// Number of buckets present, including empty ones.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of cards across all buckets.
    pub fn card_count(&self) -> usize {
        self.buckets.values().map(CardSet::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &CardSet)> {
        self.buckets.iter().map(|(&index, cards)| (index, cards))
    }

    /// Every card with the bucket it is filed in.
    pub fn cards(&self) -> impl Iterator<Item = (usize, &Card)> {
        self.iter()
            .flat_map(|(index, cards)| cards.iter().map(move |card| (index, card)))
    }
}

impl FromIterator<(usize, CardSet)> for BucketMap {
    fn from_iter<I: IntoIterator<Item = (usize, CardSet)>>(iter: I) -> Self {
        Self {
            buckets: iter.into_iter().collect(),
        }
    }
}

/// Dense view of a [`BucketMap`], indexed `0..=max`.
///
/// Indices present in the map borrow the map's set; absent indices read as an
/// empty set. The last index is the retired bucket. Only present buckets are
/// stored, so a far-off retired index costs nothing.
#[derive(Debug, Clone, Default)]
pub struct BucketSequence<'a> {
    buckets: BTreeMap<usize, Cow<'a, CardSet>>,
    last: Option<usize>,
    empty: CardSet,
}

impl<'a> BucketSequence<'a> {
    /// Number of indices, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        self.last.map_or(0, |last| last.saturating_add(1))
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// The retired index, if the sequence is not empty.
    pub fn last_index(&self) -> Option<usize> {
        self.last
    }

    pub fn get(&self, index: usize) -> Option<&CardSet> {
        if index > self.last? {
            return None;
        }
        Some(self.buckets.get(&index).map_or(&self.empty, |cards| &**cards))
    }

    /// Every index in order, gaps included.
    pub fn iter(&self) -> impl Iterator<Item = &CardSet> {
        let indices = self.last.map(|last| 0..=last).into_iter().flatten();
        indices.filter_map(move |index| self.get(index))
    }

    /// Indices backed by a bucket of the map, in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &CardSet)> {
        self.buckets.iter().map(|(&index, cards)| (index, &**cards))
    }
}

impl From<Vec<CardSet>> for BucketSequence<'static> {
    fn from(buckets: Vec<CardSet>) -> Self {
        Self {
            last: buckets.len().checked_sub(1),
            buckets: buckets.into_iter().map(Cow::Owned).enumerate().collect(),
            empty: CardSet::new(),
        }
    }
}

/// Build the dense sequence view of `map`.
pub fn to_sequence(map: &BucketMap) -> BucketSequence<'_> {
    BucketSequence {
        buckets: map
            .iter()
            .map(|(index, cards)| (index, Cow::Borrowed(cards)))
            .collect(),
        last: map.retired_bucket(),
        empty: CardSet::new(),
    }
}

/// Lowest and highest non-empty bucket, or `None` if every bucket is empty.
pub fn get_range(sequence: &BucketSequence<'_>) -> Option<BucketRange> {
    let mut occupied = sequence
        .occupied()
        .filter(|(_, cards)| !cards.is_empty())
        .map(|(index, _)| index);

    let min = occupied.next()?;
    let max = occupied.last().unwrap_or(min);
    Some(BucketRange { min, max })
}

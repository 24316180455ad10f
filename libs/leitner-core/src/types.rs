//! Core types for the Leitner scheduler.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::ParseDifficultyError;

/// A flashcard's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Flashcard {
    /// Create a card with no hint and no tags.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            hint: None,
            tags: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Shared handle to a flashcard.
///
/// Equality and hashing go by allocation, not by content: two handles are the
/// same card only when one was cloned from the other. Two cards with identical
/// text filed separately are distinct cards.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(Arc<Flashcard>);

impl Card {
    pub fn new(flashcard: Flashcard) -> Self {
        Self(Arc::new(flashcard))
    }

    /// The card's content.
    pub fn flashcard(&self) -> &Flashcard {
        &self.0
    }
}

impl Deref for Card {
    type Target = Flashcard;

    fn deref(&self) -> &Flashcard {
        &self.0
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Card").field(&self.0.front).finish()
    }
}

/// The cards filed in one bucket, in insertion order.
pub type CardSet = IndexSet<Card>;

/// The learner's self-reported recall quality for one practice trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerDifficulty {
    Wrong,
    Hard,
    Easy,
}

impl AnswerDifficulty {
    /// Convert to numeric value (0-2).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Wrong => 0,
            Self::Hard => 1,
            Self::Easy => 2,
        }
    }

    /// Create from numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Wrong),
            1 => Some(Self::Hard),
            2 => Some(Self::Easy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrong => "wrong",
            Self::Hard => "hard",
            Self::Easy => "easy",
        }
    }

    /// Whether the answer counts as recalled. Hard answers count.
    pub fn is_correct(self) -> bool {
        self != Self::Wrong
    }
}

impl fmt::Display for AnswerDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerDifficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrong" | "0" => Ok(Self::Wrong),
            "hard" | "1" => Ok(Self::Hard),
            "easy" | "2" => Ok(Self::Easy),
            _ => Err(ParseDifficultyError {
                value: s.to_string(),
            }),
        }
    }
}

/// One entry of a learner's practice log.
///
/// Cards are identified by text here, not by handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub card_front: String,
    pub card_back: String,
    pub difficulty: AnswerDifficulty,
}

impl PracticeRecord {
    pub fn for_card(card: &Flashcard, difficulty: AnswerDifficulty) -> Self {
        Self {
            card_front: card.front.clone(),
            card_back: card.back.clone(),
            difficulty,
        }
    }
}

/// Lowest and highest occupied bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRange {
    pub min: usize,
    pub max: usize,
}

/// Summary of a learner's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_cards: usize,
    pub cards_by_bucket: BTreeMap<usize, usize>,
    pub retired_cards: usize,
    /// Percentage of non-Wrong answers, 0-100.
    pub success_rate: f64,
    pub hardest_cards: Vec<Flashcard>,
    pub average_moves_per_card: f64,
    pub total_practice_events: usize,
}

/// Tunables for hints and progress reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeitnerSettings {
    /// Character substituted for each hidden character of a hint.
    pub hint_mask: char,
    /// How many cards to list as hardest.
    pub hardest_cards_limit: usize,
}

impl Default for LeitnerSettings {
    fn default() -> Self {
        Self {
            hint_mask: '_',
            hardest_cards_limit: 3,
        }
    }
}

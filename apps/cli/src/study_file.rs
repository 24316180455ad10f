//! On-disk study state: buckets, practice log and the current day.

use std::fs;
use std::path::Path;

use anyhow::Context;
use leitner_core::{BucketMap, Card, LeitnerSettings, PracticeRecord};
use serde::{Deserialize, Serialize};

/// Retired bucket used by `init` when none is given.
pub const DEFAULT_RETIRED_BUCKET: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyFile {
    pub buckets: BucketMap,
    #[serde(default)]
    pub history: Vec<PracticeRecord>,
    #[serde(default)]
    pub day: u64,
    #[serde(default)]
    pub settings: LeitnerSettings,
}

impl StudyFile {
    /// A fresh study set with empty buckets 0 and `retired`.
    pub fn new(retired: usize) -> Self {
        Self {
            buckets: BucketMap::with_retired(retired),
            history: Vec::new(),
            day: 0,
            settings: LeitnerSettings::default(),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read study file {}", path.display()))?;
        let study: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse study file {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            cards = study.buckets.card_count(),
            records = study.history.len(),
            "loaded study file"
        );
        Ok(study)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write study file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "saved study file");
        Ok(())
    }

    /// The filed card with this front and back text, in ascending bucket order.
    pub fn find_card(&self, front: &str, back: &str) -> Option<(usize, Card)> {
        self.buckets
            .cards()
            .find(|(_, card)| card.front == front && card.back == back)
            .map(|(index, card)| (index, card.clone()))
    }

    /// The first filed card with this front text.
    pub fn find_by_front(&self, front: &str) -> Option<Card> {
        self.buckets
            .cards()
            .find(|(_, card)| card.front == front)
            .map(|(_, card)| card.clone())
    }
}

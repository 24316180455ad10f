//! Partial reveals of a card's prompt.

use crate::types::{Flashcard, LeitnerSettings};

/// Reveal the first half of the prompt, rounded up, and mask the rest with `_`.
///
/// The card's own `hint` field is not consulted.
pub fn hint(card: &Flashcard) -> String {
    hint_with(card, &LeitnerSettings::default())
}

/// Like [`hint`], masking with `settings.hint_mask`.
pub fn hint_with(card: &Flashcard, settings: &LeitnerSettings) -> String {
    let length = card.front.chars().count();
    let shown = length.div_ceil(2);

    card.front
        .chars()
        .take(shown)
        .chain(std::iter::repeat(settings.hint_mask).take(length - shown))
        .collect()
}

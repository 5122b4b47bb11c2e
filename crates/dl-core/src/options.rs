//! The ordered set of option labels a draw chooses from.

use serde::{Deserialize, Serialize};

use crate::error::{DrawError, DrawResult};
use crate::random::{RandomSource, shuffle};

/// Ordered collection of unique option labels.
///
/// Labels are trimmed on insert and compared by exact string match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    labels: Vec<String>,
}

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label. Returns `false` (and changes nothing) when the trimmed
    /// label is empty or already present.
    pub fn add(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    /// Remove and return the label at `index`.
    pub fn remove(&mut self, index: usize) -> DrawResult<String> {
        if index >= self.labels.len() {
            return Err(DrawError::OutOfRange {
                index,
                len: self.labels.len(),
            });
        }
        Ok(self.labels.remove(index))
    }

    /// Replace the contents with a shuffled permutation of `labels`.
    ///
    /// Labels go through the same trimming and de-duplication as [`add`](Self::add)
    /// before shuffling.
    pub fn replace_all<R, S>(&mut self, rng: &mut R, labels: &[S])
    where
        R: RandomSource + ?Sized,
        S: AsRef<str>,
    {
        let mut fresh = OptionSet::new();
        for label in labels {
            fresh.add(label.as_ref());
        }
        self.labels = shuffle(rng, &fresh.labels);
    }

    /// Re-order the existing labels into a fresh random permutation.
    pub fn reshuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.labels = shuffle(rng, &self.labels);
    }

    /// Remove every label.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Whether `label` is present (exact match).
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Label at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// All labels in order.
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the set holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Trim raw input and keep at most `max_chars` characters.
///
/// This is the input-boundary rule; [`OptionSet::add`] itself does not
/// truncate.
pub fn truncate_label(input: &str, max_chars: usize) -> String {
    input.trim().chars().take(max_chars).collect()
}

/// Shorten a label for display inside a wheel segment.
pub fn abbreviate(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let head: String = label.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}

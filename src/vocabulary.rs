//! Vocabulary source for quiz words.

use crate::games::quiz_four::Word;
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Supplies random quiz words.
#[async_trait]
pub trait Vocabulary: Send + Sync {
    /// Draws one word, or `None` when nothing can be drawn.
    async fn fetch_random_word(&self) -> Option<Word>;
}

/// Fixed in-memory word list with uniform random selection.
#[derive(Debug)]
pub struct WordList {
    words: Vec<Word>,
    rng: Mutex<StdRng>,
}

impl WordList {
    /// Creates a list drawing with OS entropy.
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a list whose draws are reproducible for `seed`.
    pub fn seeded(words: Vec<Word>, seed: u64) -> Self {
        Self {
            words,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Number of words available.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the list has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[async_trait]
impl Vocabulary for WordList {
    #[instrument(skip(self), fields(size = self.words.len()))]
    async fn fetch_random_word(&self) -> Option<Word> {
        let Ok(mut rng) = self.rng.lock() else {
            warn!("Word list rng poisoned");
            return None;
        };
        let word = self.words.choose(&mut *rng).cloned();
        debug!(word = ?word.as_ref().map(Word::original), "Word drawn");
        word
    }
}

/// Built-in Spanish/English pairs.
pub fn default_words() -> Vec<Word> {
    [
        ("perro", "dog"),
        ("gato", "cat"),
        ("casa", "house"),
        ("agua", "water"),
        ("libro", "book"),
        ("sol", "sun"),
        ("luna", "moon"),
        ("manzana", "apple"),
        ("rojo", "red"),
        ("verde", "green"),
        ("mesa", "table"),
        ("escuela", "school"),
    ]
    .into_iter()
    .map(|(original, translation)| Word::new(original, translation))
    .collect()
}

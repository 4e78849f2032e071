//! The loaded set of candidate review texts.

use rand::Rng;

/// An ordered collection of non-empty review texts, built once per load.
///
/// Insertion order carries no meaning beyond "some item exists"; duplicates
/// are allowed. An empty corpus is a valid degenerate state — sampling it
/// yields `None` and callers must surface that as a distinct condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    reviews: Vec<String>,
}

impl Corpus {
    pub fn new(reviews: Vec<String>) -> Self {
        Self { reviews }
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Pick one review uniformly at random, or `None` if the corpus is empty.
    ///
    /// The generator is injected so hosts can use `rand::rng()` while tests
    /// drive a seeded `StdRng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.reviews.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.reviews.len());
        Some(&self.reviews[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.reviews.iter().map(String::as_str)
    }
}

impl FromIterator<String> for Corpus {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Shannon entropy over character sequences

use hashbrown::HashMap;

/// Character frequencies of a (possibly virtual) character sequence
///
/// Strings can be added with a multiplicity, so the histogram of a string
/// repeated `n` times is built without materializing the repetition.
#[derive(Debug, Clone, Default)]
pub struct CharHistogram {
    counts: HashMap<char, usize, ahash::RandomState>,
    total: usize,
}

impl CharHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram of a single string
    pub fn of(text: &str) -> Self {
        let mut hist = Self::new();
        hist.observe(text, 1);
        hist
    }

    /// Add every character of `text`, `multiplicity` times
    pub fn observe(&mut self, text: &str, multiplicity: usize) {
        if multiplicity == 0 {
            return;
        }
        for c in text.chars() {
            *self.counts.entry(c).or_insert(0) += multiplicity;
            self.total += multiplicity;
        }
    }

    /// Total number of characters
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Check if no character was observed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate `(char, count)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// Shannon entropy in bits; 0.0 for an empty sequence
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        // Summation order must not depend on the hasher seed
        let mut counts: Vec<usize> = self.counts.values().copied().collect();
        counts.sort_unstable();

        let len = self.total as f64;
        let mut entropy = 0.0;
        for count in counts {
            let p = count as f64 / len;
            entropy -= p * p.log2();
        }

        // A single repeated character yields -0.0
        entropy.max(0.0)
    }
}

/// Shannon entropy (base 2) of the characters of `text`
pub fn shannon_entropy(text: &str) -> f64 {
    CharHistogram::of(text).entropy()
}

//! Length quantiles of name and value multisets

use super::table::OrderedTable;

/// Reported percentiles: 0, 5, ..., 95 and 100
pub const PERCENTILES: [usize; 21] = [
    0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80, 85, 90, 95, 100,
];

/// Length at each of [`PERCENTILES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LengthQuantiles {
    values: [usize; PERCENTILES.len()],
}

impl LengthQuantiles {
    /// Compute quantiles from unsorted lengths
    ///
    /// An empty input behaves like a single empty string, so every quantile
    /// is zero. Below 100 the index is `floor(p * n / 100)`; the 100th
    /// percentile is always the last element.
    pub fn from_lengths(mut lengths: Vec<usize>) -> Self {
        if lengths.is_empty() {
            return Self::default();
        }
        lengths.sort_unstable();

        let last = lengths.len() - 1;
        let mut values = [0; PERCENTILES.len()];
        for (slot, &p) in values.iter_mut().zip(PERCENTILES.iter()) {
            let index = if p == 100 {
                last
            } else {
                (p * lengths.len() / 100).min(last)
            };
            *slot = lengths[index];
        }
        Self { values }
    }

    /// Length at percentile `p`, if `p` is one of [`PERCENTILES`]
    pub fn get(&self, p: usize) -> Option<usize> {
        PERCENTILES
            .iter()
            .position(|&q| q == p)
            .map(|i| self.values[i])
    }

    /// Write `prefix + "quantile_" + p -> length` for every percentile
    pub fn write_into(&self, prefix: &str, out: &mut OrderedTable<String, f64>) {
        for (&p, &len) in PERCENTILES.iter().zip(self.values.iter()) {
            out.insert(format!("{}quantile_{}", prefix, p), len as f64);
        }
    }
}

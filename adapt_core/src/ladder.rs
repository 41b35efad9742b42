//! Sorted boundary tables for bucketing a numeric reading into a category.
//!
//! A ladder is scanned top to bottom and the first rung whose limit the
//! value satisfies wins. Anything that satisfies no rung (including NaN)
//! lands on the fallback, so every input maps to exactly one category.

/// Direction in which a ladder's limits are compared
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    /// `value >= limit`; rungs sorted by descending limit
    AtLeast,
    /// `value <= limit`; rungs sorted by ascending limit
    AtMost,
}

/// An ordered threshold table with a catch-all category
#[derive(Clone, Copy, Debug)]
pub struct ThresholdLadder<T: Copy + 'static> {
    bound: Bound,
    rungs: &'static [(f64, T)],
    fallback: T,
}

impl<T: Copy + 'static> ThresholdLadder<T> {
    /// Ladder where higher readings are better (`>=` comparisons)
    pub const fn at_least(rungs: &'static [(f64, T)], fallback: T) -> Self {
        Self {
            bound: Bound::AtLeast,
            rungs,
            fallback,
        }
    }

    /// Ladder where lower readings are better (`<=` comparisons)
    pub const fn at_most(rungs: &'static [(f64, T)], fallback: T) -> Self {
        Self {
            bound: Bound::AtMost,
            rungs,
            fallback,
        }
    }

    /// Map a reading onto its category
    pub fn classify(&self, value: f64) -> T {
        self.rungs
            .iter()
            .find(|(limit, _)| match self.bound {
                Bound::AtLeast => value >= *limit,
                Bound::AtMost => value <= *limit,
            })
            .map(|(_, category)| *category)
            .unwrap_or(self.fallback)
    }

    /// True when the rungs are ordered so that no rung shadows a later one
    pub fn is_sorted(&self) -> bool {
        self.rungs.windows(2).all(|pair| match self.bound {
            Bound::AtLeast => pair[0].0 > pair[1].0,
            Bound::AtMost => pair[0].0 < pair[1].0,
        })
    }
}

use super::{ScoringContext, ScoringStrategy};

const DEFAULT_TARGET_LEN: usize = 200;

/// Rewards responses whose length (in chars) is close to a target.
///
/// `score = 1 / (1 + |len - target|)`, so an exact match scores `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthStrategy {
    target_len: usize,
}

impl LengthStrategy {
    pub fn new(target_len: usize) -> Self {
        Self { target_len }
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }
}

impl Default for LengthStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_LEN)
    }
}

impl ScoringStrategy for LengthStrategy {
    fn score(&self, _question: &str, response: &str, _context: &ScoringContext) -> f64 {
        let len = response.chars().count();
        1.0 / (1.0 + len.abs_diff(self.target_len) as f64)
    }
}

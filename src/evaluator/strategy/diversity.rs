use std::collections::HashSet;

use super::{ScoringContext, ScoringStrategy};

const NEUTRAL_SCORE: f64 = 0.5;

/// Word-set Jaccard distance between the response and the context baseline.
///
/// Without a baseline the score is a neutral `0.5`. When both token sets are
/// empty (a whitespace-only baseline and response) the score is `1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiversityStrategy;

impl DiversityStrategy {
    pub fn new() -> Self {
        Self
    }
}

fn tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl ScoringStrategy for DiversityStrategy {
    fn score(&self, _question: &str, response: &str, context: &ScoringContext) -> f64 {
        let Some(baseline) = context.baseline() else {
            return NEUTRAL_SCORE;
        };

        let a = tokens(baseline);
        let b = tokens(response);
        let union = a.union(&b).count();
        if union == 0 {
            return 1.0;
        }
        let intersection = a.intersection(&b).count();
        1.0 - intersection as f64 / union as f64
    }
}

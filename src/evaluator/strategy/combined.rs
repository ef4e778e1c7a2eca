use crate::error::LLMError;

use super::{DiversityStrategy, KeywordStrategy, LengthStrategy, ScoringContext, ScoringStrategy};

/// Relative weights of the length, keyword and diversity criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub length: f64,
    pub keyword: f64,
    pub diversity: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            length: 0.3,
            keyword: 0.5,
            diversity: 0.2,
        }
    }
}

impl Weights {
    pub fn new(length: f64, keyword: f64, diversity: f64) -> Self {
        Self {
            length,
            keyword,
            diversity,
        }
    }

    /// Scales the weights so they sum to `1.0`.
    fn normalized(self) -> Result<Self, LLMError> {
        let parts = [self.length, self.keyword, self.diversity];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(LLMError::ConfigError(format!(
                "weights must be finite and non-negative, got {self:?}"
            )));
        }
        let total: f64 = parts.iter().sum();
        if total <= 0.0 {
            return Err(LLMError::ConfigError(
                "weights must not sum to zero".to_string(),
            ));
        }
        Ok(Self {
            length: self.length / total,
            keyword: self.keyword / total,
            diversity: self.diversity / total,
        })
    }
}

/// Weighted blend of [`LengthStrategy`], [`KeywordStrategy`] and
/// [`DiversityStrategy`].
///
/// Any response mentioning `[erro]` or `error` (case-insensitive) scores
/// `0.0` before the criteria are looked at.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedStrategy {
    length: LengthStrategy,
    keyword: KeywordStrategy,
    diversity: DiversityStrategy,
    weights: Weights,
}

impl CombinedStrategy {
    /// Creates a combined strategy with the default `0.3 / 0.5 / 0.2` weights.
    pub fn new<I, S>(target_len: usize, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            length: LengthStrategy::new(target_len),
            keyword: KeywordStrategy::new(keywords),
            diversity: DiversityStrategy::new(),
            // 0.3 + 0.5 + 0.2 already sums to one
            weights: Weights::default(),
        }
    }

    /// Creates a combined strategy with custom weights. The weights need not
    /// sum to one; they are normalized here.
    pub fn with_weights<I, S>(
        target_len: usize,
        keywords: I,
        weights: Weights,
    ) -> Result<Self, LLMError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            weights: weights.normalized()?,
            ..Self::new(target_len, keywords)
        })
    }

    /// The normalized weights in use.
    pub fn weights(&self) -> Weights {
        self.weights
    }

    fn is_penalized(response: &str) -> bool {
        let text = response.to_lowercase();
        text.contains(crate::evaluator::ERROR_MARKER) || text.contains("error")
    }
}

impl ScoringStrategy for CombinedStrategy {
    fn score(&self, question: &str, response: &str, context: &ScoringContext) -> f64 {
        if Self::is_penalized(response) {
            return 0.0;
        }

        let len = self.length.score(question, response, context);
        let kw = self.keyword.score(question, response, context);
        let div = self.diversity.score(question, response, context);

        self.weights.length * len + self.weights.keyword * kw + self.weights.diversity * div
    }
}

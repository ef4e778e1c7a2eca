/// Per-response data handed to a strategy alongside the text being scored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringContext {
    baseline: String,
}

impl ScoringContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with the reference response used by similarity scoring.
    pub fn with_baseline(baseline: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
        }
    }

    /// The baseline text, or `None` when it is empty.
    pub fn baseline(&self) -> Option<&str> {
        if self.baseline.is_empty() {
            None
        } else {
            Some(&self.baseline)
        }
    }
}

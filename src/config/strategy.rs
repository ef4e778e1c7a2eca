use crate::{
    error::LLMError,
    evaluator::{CombinedStrategy, KeywordStrategy, LengthStrategy, ScoringStrategy},
};

const DEFAULT_TARGET_LEN: usize = 180;

/// Scoring strategies selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyKind {
    Length,
    Keyword,
    #[default]
    Combined,
}

impl std::str::FromStr for StrategyKind {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "length" => Ok(StrategyKind::Length),
            "keyword" => Ok(StrategyKind::Keyword),
            "combined" => Ok(StrategyKind::Combined),
            _ => Err(LLMError::ConfigError(format!(
                "Unknown strategy: {s} (expected length, keyword or combined)"
            ))),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StrategyKind::Length => "length",
            StrategyKind::Keyword => "keyword",
            StrategyKind::Combined => "combined",
        })
    }
}

/// Strategy name plus the parameters it is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
    pub target_len: usize,
    pub keywords: Vec<String>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            kind: StrategyKind::default(),
            target_len: DEFAULT_TARGET_LEN,
            keywords: Vec::new(),
        }
    }
}

impl StrategyConfig {
    pub fn new(kind: StrategyKind, target_len: usize, keywords: Vec<String>) -> Self {
        Self {
            kind,
            target_len,
            keywords,
        }
    }

    pub fn build(&self) -> Box<dyn ScoringStrategy> {
        match self.kind {
            StrategyKind::Length => Box::new(LengthStrategy::new(self.target_len)),
            StrategyKind::Keyword => Box::new(KeywordStrategy::new(&self.keywords)),
            StrategyKind::Combined => {
                Box::new(CombinedStrategy::new(self.target_len, &self.keywords))
            }
        }
    }
}

/// Splits a comma-separated keyword list, trimming entries and dropping blanks.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

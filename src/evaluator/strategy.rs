#[path = "strategy/context.rs"]
mod context;

#[path = "strategy/length.rs"]
mod length;

#[path = "strategy/keyword.rs"]
mod keyword;

#[path = "strategy/diversity.rs"]
mod diversity;

#[path = "strategy/combined.rs"]
mod combined;

pub use combined::{CombinedStrategy, Weights};
pub use context::ScoringContext;
pub use diversity::DiversityStrategy;
pub use keyword::KeywordStrategy;
pub use length::LengthStrategy;

/// Maps a response to a score, usually in `[0, 1]`. Higher is better.
///
/// Implementations must be pure: the same inputs always produce the same
/// finite score and scoring never mutates the strategy. A NaN score never
/// wins against a number and ranks last.
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, question: &str, response: &str, context: &ScoringContext) -> f64;
}

/// Plain closures can be used wherever a strategy is expected.
impl<F> ScoringStrategy for F
where
    F: Fn(&str, &str, &ScoringContext) -> f64 + Send + Sync,
{
    fn score(&self, question: &str, response: &str, context: &ScoringContext) -> f64 {
        self(question, response, context)
    }
}

//! Response scoring and winner selection.
//!
//! A [`ScoringStrategy`] turns one response text into a comparable score and
//! a [`ResponseEvaluator`] runs it over a whole [`ResponseSet`], picks the
//! winner and optionally broadcasts the outcome on a
//! [`NotificationChannel`](crate::notify::NotificationChannel).

use indexmap::IndexMap;

mod selector;
mod strategy;

pub use selector::{by_score_desc, evaluate, ResponseEvaluator, SelectionResult, NO_RESPONSES, NO_WINNER};
pub use strategy::{
    CombinedStrategy, DiversityStrategy, KeywordStrategy, LengthStrategy, ScoringContext,
    ScoringStrategy, Weights,
};

/// Model identifier to response text, in the order the caller collected them.
pub type ResponseSet = IndexMap<String, String>;

/// Model identifier to score, in the same order as the originating [`ResponseSet`].
pub type ScoreSet = IndexMap<String, f64>;

/// Marker a dispatcher embeds in a response that stands for a failed backend call.
pub const ERROR_MARKER: &str = "[erro]";

/// Case-insensitive check for [`ERROR_MARKER`].
pub fn is_error_response(text: &str) -> bool {
    text.to_lowercase().contains(ERROR_MARKER)
}

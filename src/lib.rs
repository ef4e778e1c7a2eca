//! Ask several LLM backends the same question and pick the best answer.
//!
//! Responses are gathered by a [`Dispatcher`](dispatch::Dispatcher), scored
//! with a [`ScoringStrategy`](evaluator::ScoringStrategy) and ranked by a
//! [`ResponseEvaluator`](evaluator::ResponseEvaluator), which can broadcast
//! the outcome on a [`NotificationChannel`](notify::NotificationChannel).
//!
//! ```
//! use llm_arbiter::evaluator::{evaluate, LengthStrategy, ResponseSet};
//!
//! let mut responses = ResponseSet::new();
//! responses.insert("a".to_string(), "short".to_string());
//! responses.insert("b".to_string(), "this is a longer response text".to_string());
//!
//! let result = evaluate("q", &responses, &LengthStrategy::new(10), None).unwrap();
//! assert_eq!(result.winner_model, "a");
//! ```

pub mod backends;
pub mod builder;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod notify;

pub use client::{GenerateParams, LLMClient};
pub use error::LLMError;

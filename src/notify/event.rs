use serde::Serialize;

use crate::evaluator::{ResponseSet, ScoreSet};

/// Event broadcast to listeners once a winner has been selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEvent {
    /// Question sent to every backend
    pub question: String,
    /// Identifier of the winning model
    pub winner_model: String,
    /// Explanation of the choice
    pub explanation: String,
    /// Score per model
    pub scores: ScoreSet,
    /// Every response that was evaluated
    pub responses: ResponseSet,
}

impl SelectionEvent {
    /// Text of the winning response, if the winner is part of the response set.
    pub fn winning_response(&self) -> Option<&str> {
        self.responses.get(&self.winner_model).map(String::as_str)
    }
}

use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    error::LLMError,
    notify::{NotificationChannel, SelectionEvent},
};

use super::{is_error_response, ResponseSet, ScoreSet, ScoringContext, ScoringStrategy};

/// Winner reported when there was nothing to evaluate.
pub const NO_WINNER: &str = "none";

/// Explanation reported when there was nothing to evaluate.
pub const NO_RESPONSES: &str = "No responses available to evaluate.";

/// Outcome of one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    /// Identifier of the best-scoring model, or [`NO_WINNER`].
    pub winner_model: String,
    /// Self-contained, human readable account of the choice.
    pub explanation: String,
    /// One score per evaluated response, in response-set order.
    pub scores: ScoreSet,
}

impl SelectionResult {
    fn empty() -> Self {
        Self {
            winner_model: NO_WINNER.to_string(),
            explanation: NO_RESPONSES.to_string(),
            scores: ScoreSet::new(),
        }
    }

    /// Scores sorted best first. Equal scores keep response-set order.
    pub fn ranking(&self) -> Vec<(&str, f64)> {
        rank(&self.scores)
    }

    /// True when the result is the empty-input sentinel.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Scores a response set with a fixed strategy and picks the best response.
pub struct ResponseEvaluator {
    strategy: Box<dyn ScoringStrategy>,
}

impl ResponseEvaluator {
    pub fn new(strategy: Box<dyn ScoringStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &dyn ScoringStrategy {
        self.strategy.as_ref()
    }

    /// Evaluates `responses` and, when a channel is given, broadcasts the
    /// outcome to its listeners before returning.
    pub fn evaluate(
        &self,
        question: &str,
        responses: &ResponseSet,
        notifier: Option<&NotificationChannel>,
    ) -> Result<SelectionResult, LLMError> {
        evaluate(question, responses, self.strategy.as_ref(), notifier)
    }
}

/// Scores every response with `strategy`, selects the winner and optionally
/// notifies `notifier`.
///
/// The only error is a listener fault, returned as-is. An empty response set
/// yields the [`NO_WINNER`] sentinel without scoring or notifying.
pub fn evaluate(
    question: &str,
    responses: &ResponseSet,
    strategy: &dyn ScoringStrategy,
    notifier: Option<&NotificationChannel>,
) -> Result<SelectionResult, LLMError> {
    if responses.is_empty() {
        return Ok(SelectionResult::empty());
    }

    let baseline = baseline_of(responses);
    let scores: ScoreSet = responses
        .iter()
        .map(|(model, text)| {
            let context = ScoringContext::with_baseline(baseline);
            let score = strategy.score(question, text, &context);
            log::debug!("score {model} = {score:.3}");
            (model.clone(), score)
        })
        .collect();

    let winner = pick_winner(&scores);
    let explanation = build_explanation(question, &winner, &scores);

    if let Some(channel) = notifier {
        let event = SelectionEvent {
            question: question.to_string(),
            winner_model: winner.clone(),
            explanation: explanation.clone(),
            scores: scores.clone(),
            responses: responses.clone(),
        };
        channel.notify(&event)?;
    }

    Ok(SelectionResult {
        winner_model: winner,
        explanation,
        scores,
    })
}

/// First response that is not an error placeholder, or `""`.
fn baseline_of(responses: &ResponseSet) -> &str {
    responses
        .values()
        .find(|text| !is_error_response(text))
        .map(String::as_str)
        .unwrap_or("")
}

/// Orders scores best first. NaN sorts after every number and equals itself.
pub fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// First model holding the maximal score. A later score must be strictly
/// better to take the lead.
fn pick_winner(scores: &ScoreSet) -> String {
    let mut best: Option<(&String, f64)> = None;
    for (model, &score) in scores {
        let leads = match best {
            Some((_, top)) => by_score_desc(score, top).is_lt(),
            None => true,
        };
        if leads {
            best = Some((model, score));
        }
    }
    best.map(|(model, _)| model.clone())
        .unwrap_or_else(|| NO_WINNER.to_string())
}

fn rank(scores: &ScoreSet) -> Vec<(&str, f64)> {
    let mut ordered: Vec<(&str, f64)> = scores.iter().map(|(m, s)| (m.as_str(), *s)).collect();
    ordered.sort_by(|a, b| by_score_desc(a.1, b.1));
    ordered
}

fn build_explanation(question: &str, winner: &str, scores: &ScoreSet) -> String {
    let mut parts = vec![format!("Question: {question}"), format!("Winner: {winner}")];
    if !scores.is_empty() {
        let ranking = rank(scores)
            .into_iter()
            .map(|(model, score)| format!("{model}={score:.3}"))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Ranking: {ranking}"));
    }
    parts.join(" | ")
}

#[cfg(test)]
#[path = "selector/tests.rs"]
mod tests;

use std::sync::{Arc, Mutex};

use super::*;
use crate::evaluator::{CombinedStrategy, DiversityStrategy, KeywordStrategy, LengthStrategy};
use crate::notify::SelectionListener;

fn responses(pairs: &[(&str, &str)]) -> ResponseSet {
    pairs
        .iter()
        .map(|(model, text)| (model.to_string(), text.to_string()))
        .collect()
}

/// Records every score call so tests can inspect the baseline handed over.
#[derive(Default)]
struct Spy {
    seen: Mutex<Vec<(String, Option<String>)>>,
}

impl ScoringStrategy for Spy {
    fn score(&self, _question: &str, response: &str, context: &ScoringContext) -> f64 {
        self.seen.lock().unwrap().push((
            response.to_string(),
            context.baseline().map(str::to_string),
        ));
        response.len() as f64
    }
}

#[test]
fn empty_response_set_yields_sentinel() {
    let spy = Spy::default();
    let channel = NotificationChannel::new();
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    channel.attach(Arc::new(move |_e: &SelectionEvent| -> Result<(), LLMError> {
        *counter.lock().unwrap() += 1;
        Ok(())
    }));

    let result = evaluate("q", &ResponseSet::new(), &spy, Some(&channel)).unwrap();

    assert_eq!(result.winner_model, NO_WINNER);
    assert!(result.scores.is_empty());
    assert!(result.is_empty());
    assert!(!result.explanation.is_empty());
    assert_eq!(result.explanation, NO_RESPONSES);
    assert!(spy.seen.lock().unwrap().is_empty());
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn length_strategy_picks_closest_length() {
    let set = responses(&[("a", "short"), ("b", "this is a longer response text")]);
    let evaluator = ResponseEvaluator::new(Box::new(LengthStrategy::new(10)));

    let result = evaluator.evaluate("q", &set, None).unwrap();

    assert_eq!(result.winner_model, "a");
    assert!((result.scores["a"] - 1.0 / 6.0).abs() < 1e-9);
    assert!((result.scores["b"] - 1.0 / 21.0).abs() < 1e-9);
}

#[test]
fn combined_strategy_sinks_error_placeholders() {
    let set = responses(&[
        ("a", "[ERRO] timeout"),
        ("b", "a fine answer with cat and dog"),
    ]);
    let strategy = CombinedStrategy::new(20, ["cat", "dog"]);

    let result = evaluate("q", &set, &strategy, None).unwrap();

    assert_eq!(result.scores["a"], 0.0);
    assert!(result.scores["b"] > 0.0);
    assert_eq!(result.winner_model, "b");
}

#[test]
fn one_score_per_response_in_input_order() {
    let set = responses(&[("z", "one"), ("m", "two two"), ("a", "")]);
    let result = evaluate("q", &set, &KeywordStrategy::new(["two"]), None).unwrap();

    let keys: Vec<&str> = result.scores.keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "m", "a"]);
    assert_eq!(result.winner_model, "m");
}

#[test]
fn ties_go_to_first_seen() {
    let set = responses(&[("late", "xx"), ("early", "yy"), ("other", "z")]);
    let result = evaluate("q", &set, &LengthStrategy::new(2), None).unwrap();
    assert_eq!(result.winner_model, "late");

    let reordered = responses(&[("early", "yy"), ("late", "xx"), ("other", "z")]);
    let result = evaluate("q", &reordered, &LengthStrategy::new(2), None).unwrap();
    assert_eq!(result.winner_model, "early");
}

#[test]
fn baseline_is_first_non_error_response() {
    let set = responses(&[
        ("a", "[Erro] HttpError: boom"),
        ("b", "the real answer"),
        ("c", "another answer"),
    ]);
    let spy = Spy::default();
    evaluate("q", &set, &spy, None).unwrap();

    let seen = spy.seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen
        .iter()
        .all(|(_, baseline)| baseline.as_deref() == Some("the real answer")));
}

#[test]
fn baseline_is_empty_when_every_response_failed() {
    let set = responses(&[("a", "[ERRO] one"), ("b", "[erro] two")]);
    let spy = Spy::default();
    evaluate("q", &set, &spy, None).unwrap();
    assert!(spy.seen.lock().unwrap().iter().all(|(_, b)| b.is_none()));

    let result = evaluate("q", &set, &DiversityStrategy::new(), None).unwrap();
    assert!(result.scores.values().all(|s| *s == 0.5));
}

#[test]
fn explanation_lists_ranking_with_three_decimals() {
    let set = responses(&[("a", "short"), ("b", "this is a longer response text")]);
    let result = evaluate("What now?", &set, &LengthStrategy::new(10), None).unwrap();

    assert_eq!(
        result.explanation,
        "Question: What now? | Winner: a | Ranking: a=0.167, b=0.048"
    );
    assert_eq!(result.ranking(), vec![("a", result.scores["a"]), ("b", result.scores["b"])]);
}

#[test]
fn ranking_sorts_descending_and_keeps_ties_stable() {
    let set = responses(&[("low", "x"), ("hi1", "xxx"), ("hi2", "yyy")]);
    let result = evaluate("q", &set, &LengthStrategy::new(3), None).unwrap();
    let order: Vec<&str> = result.ranking().into_iter().map(|(m, _)| m).collect();
    assert_eq!(order, ["hi1", "hi2", "low"]);
}

#[test]
fn nan_scores_never_take_the_lead() {
    let set = responses(&[("good", "ok"), ("broken", "nan"), ("worse", "meh")]);
    let strategy = |_: &str, response: &str, _: &ScoringContext| match response {
        "ok" => 0.8,
        "meh" => 0.2,
        _ => f64::NAN,
    };
    let result = evaluate("q", &set, &strategy, None).unwrap();
    assert_eq!(result.winner_model, "good");
    let order: Vec<&str> = result.ranking().into_iter().map(|(m, _)| m).collect();
    assert_eq!(order, ["good", "worse", "broken"]);

    let leading_nan = responses(&[("broken", "nan"), ("worse", "meh")]);
    let result = evaluate("q", &leading_nan, &strategy, None).unwrap();
    assert_eq!(result.winner_model, "worse");
}

struct Capture(Mutex<Vec<SelectionEvent>>);

impl SelectionListener for Capture {
    fn update(&self, event: &SelectionEvent) -> Result<(), LLMError> {
        self.0.lock().unwrap().push(event.clone());
        Ok(())
    }
}

#[test]
fn notifies_listeners_with_full_event() {
    let set = responses(&[("a", "short"), ("b", "this is a longer response text")]);
    let capture = Arc::new(Capture(Mutex::new(Vec::new())));
    let channel = NotificationChannel::new();
    channel.attach(capture.clone());
    channel.attach(capture.clone());

    let result = evaluate("q", &set, &LengthStrategy::new(10), Some(&channel)).unwrap();

    let events = capture.0.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], events[1]);
    let event = &events[0];
    assert_eq!(event.question, "q");
    assert_eq!(event.winner_model, result.winner_model);
    assert_eq!(event.explanation, result.explanation);
    assert_eq!(event.scores, result.scores);
    assert_eq!(event.responses, set);
}

#[test]
fn listener_failure_reaches_caller() {
    let set = responses(&[("a", "text")]);
    let channel = NotificationChannel::new();
    channel.attach(Arc::new(|_e: &SelectionEvent| -> Result<(), LLMError> {
        Err(LLMError::ListenerError("renderer gone".into()))
    }));

    let err = evaluate("q", &set, &LengthStrategy::new(4), Some(&channel)).unwrap_err();
    assert!(matches!(err, LLMError::ListenerError(_)));
}

#[test]
#[should_panic(expected = "strategy defect")]
fn strategy_panics_are_not_swallowed() {
    let broken = |_q: &str, _r: &str, _c: &ScoringContext| -> f64 { panic!("strategy defect") };
    let set = responses(&[("a", "text")]);
    let _ = evaluate("q", &set, &broken, None);
}

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{StyledContent, Stylize};
use llm_arbiter::error::LLMError;
use llm_arbiter::evaluator::by_score_desc;
use llm_arbiter::notify::{SelectionEvent, SelectionListener};

fn write_error(err: io::Error) -> LLMError {
    LLMError::ListenerError(format!("failed to write report: {err}"))
}

/// Human readable report: score table, explanation, every response, winner.
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
    color: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    fn paint(&self, text: &str, style: impl FnOnce(String) -> StyledContent<String>) -> String {
        if self.color {
            style(text.to_string()).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn render(&self, event: &SelectionEvent) -> String {
        let mut out = String::new();

        out.push_str(&self.paint("Scores by model", |s| s.bold()));
        out.push('\n');
        let mut ranking: Vec<(&String, &f64)> = event.scores.iter().collect();
        ranking.sort_by(|a, b| by_score_desc(*a.1, *b.1));
        let width = ranking
            .iter()
            .map(|(model, _)| model.chars().count())
            .max()
            .unwrap_or(0)
            .max("Model".len());
        out.push_str(&format!("  {:<width$}  {:>7}\n", "Model", "Score"));
        for (model, score) in ranking {
            out.push_str(&format!("  {model:<width$}  {score:>7.3}\n"));
        }

        out.push('\n');
        out.push_str(&self.paint("Why this choice", |s| s.green().bold()));
        out.push('\n');
        out.push_str(&format!("  {}\n", event.explanation));

        for (model, text) in &event.responses {
            out.push('\n');
            let title = format!("Response from {model}");
            if *model == event.winner_model {
                out.push_str(&self.paint(&title, |s| s.cyan().bold()));
            } else {
                out.push_str(&self.paint(&title, |s| s.blue()));
            }
            out.push('\n');
            for line in text.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }

        out.push('\n');
        out.push_str(&self.paint("Winner:", |s| s.magenta()));
        out.push(' ');
        out.push_str(&self.paint(&event.winner_model, |s| s.bold()));
        out.push('\n');
        out
    }
}

impl<W: Write + Send> SelectionListener for ConsoleReporter<W> {
    fn update(&self, event: &SelectionEvent) -> Result<(), LLMError> {
        let report = self.render(event);
        let mut out = self
            .out
            .lock()
            .map_err(|_| LLMError::ListenerError("report writer poisoned".to_string()))?;
        out.write_all(report.as_bytes()).map_err(write_error)?;
        out.flush().map_err(write_error)
    }
}

/// Writes each event as one pretty-printed JSON document.
pub struct JsonReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write + Send> SelectionListener for JsonReporter<W> {
    fn update(&self, event: &SelectionEvent) -> Result<(), LLMError> {
        let json = serde_json::to_string_pretty(event)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| LLMError::ListenerError("report writer poisoned".to_string()))?;
        writeln!(out, "{json}").map_err(write_error)
    }
}

use std::path::PathBuf;

use clap::Parser;
use llm_arbiter::config::{parse_keywords, StrategyConfig, StrategyKind};
use llm_arbiter::GenerateParams;

#[derive(Parser, Debug)]
#[command(
    name = "llm-arbiter",
    about = "Ask several LLM backends the same question and pick the best answer"
)]
pub struct CliArgs {
    /// Question sent to every model
    #[arg(index = 1)]
    pub question: String,
    /// Comma-separated model list (chatgpt, gemini, hf, mock)
    #[arg(long, default_value = "chatgpt,hf")]
    pub models: String,
    /// Scoring strategy: length, keyword or combined
    #[arg(long, default_value = "combined")]
    pub strategy: StrategyKind,
    /// Target response length for the length criterion
    #[arg(long, default_value_t = 180)]
    pub target_len: usize,
    /// Comma-separated keywords for the keyword criterion
    #[arg(long, default_value = "")]
    pub keywords: String,
    /// Sampling temperature sent to every model
    #[arg(long, default_value_t = 0.6)]
    pub temperature: f32,
    /// Maximum tokens each model may generate
    #[arg(long, default_value_t = 512)]
    pub max_tokens: u32,
    /// Optional TOML settings file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Print the selection as JSON instead of the console report
    #[arg(long)]
    pub json: bool,
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    pub fn model_names(&self) -> Vec<String> {
        parse_keywords(&self.models)
    }

    pub fn strategy_config(&self) -> StrategyConfig {
        StrategyConfig::new(self.strategy, self.target_len, parse_keywords(&self.keywords))
    }

    pub fn params(&self) -> GenerateParams {
        GenerateParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[path = "config/settings.rs"]
mod settings;

#[path = "config/strategy.rs"]
mod strategy;

pub use settings::Settings;
pub use strategy::{parse_keywords, StrategyConfig, StrategyKind};

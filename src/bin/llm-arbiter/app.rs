use std::sync::Arc;

use clap::Parser;
use llm_arbiter::builder::ClientFactory;
use llm_arbiter::config::Settings;
use llm_arbiter::dispatch::Dispatcher;
use llm_arbiter::evaluator::ResponseEvaluator;
use llm_arbiter::notify::{NotificationChannel, SelectionListener};

use crate::args::CliArgs;
use crate::logging::init_logging;
use crate::report::{ConsoleReporter, JsonReporter};

pub async fn run() -> anyhow::Result<()> {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_logging(args.debug)?;

    let settings = Settings::load(args.config.as_deref())?;
    let strategy = args.strategy_config();
    log::debug!(
        "strategy {} (target_len={}, keywords={:?}), mock_mode={}",
        strategy.kind,
        strategy.target_len,
        strategy.keywords,
        settings.mock_mode
    );

    let clients = ClientFactory::create_all(args.model_names(), &settings)?;
    if clients.is_empty() {
        log::warn!("no models requested");
    }
    let responses = Dispatcher::new(args.params())
        .collect(&clients, &args.question)
        .await;

    let channel = NotificationChannel::new();
    let reporter: Arc<dyn SelectionListener> = if args.json {
        Arc::new(JsonReporter::stdout())
    } else {
        Arc::new(ConsoleReporter::stdout())
    };
    channel.attach(reporter);

    let evaluator = ResponseEvaluator::new(strategy.build());
    let result = evaluator.evaluate(&args.question, &responses, Some(&channel))?;
    if result.is_empty() {
        println!("{}", result.explanation);
    }
    log::info!("winner: {}", result.winner_model);
    Ok(())
}

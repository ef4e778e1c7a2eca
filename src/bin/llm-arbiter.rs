#[path = "llm-arbiter/app.rs"]
mod app;
#[path = "llm-arbiter/args.rs"]
mod args;
#[path = "llm-arbiter/logging.rs"]
mod logging;
#[path = "llm-arbiter/report.rs"]
mod report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}

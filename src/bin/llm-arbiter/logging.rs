use env_logger::{Builder, Env};

/// Logs to stderr. `RUST_LOG` wins over the `--debug` default.
pub fn init_logging(debug: bool) -> anyhow::Result<()> {
    let level = if debug { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .try_init()?;
    Ok(())
}

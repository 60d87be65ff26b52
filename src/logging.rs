use tracing_subscriber::filter::{EnvFilter, LevelFilter};

// Stdout carries the report or the fix commands, so logs go to stderr.
fn filter(debug: bool) -> EnvFilter {
    let level = if debug { LevelFilter::DEBUG } else { LevelFilter::WARN };
    EnvFilter::from_default_env().add_directive(level.into())
}

pub fn init(debug: bool) {
    tracing_subscriber::fmt().with_env_filter(filter(debug)).with_writer(std::io::stderr).with_target(false).init();
    tracing::debug!("logging initialized");
}

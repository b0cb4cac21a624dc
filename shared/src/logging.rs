use tracing_subscriber::EnvFilter;

/// Maps a `LOG_LEVEL` value onto a tracing filter directive. Accepts the
/// Python-style names used by the rest of the project's tooling.
pub fn level_filter(log_level: &str) -> String {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        "off" | "none" => "off",
        _ => "info",
    }
    .to_string()
}

/// Installs the global fmt subscriber. `RUST_LOG` takes precedence over
/// `log_level`. A second call is a no-op.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter(log_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

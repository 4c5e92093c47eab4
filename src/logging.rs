use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only command output. `RUST_LOG`
/// takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        format!("warn,{}=debug", env!("CARGO_CRATE_NAME"))
    } else {
        "warn".to_string()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

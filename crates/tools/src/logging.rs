use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Installs a compact stderr subscriber. `RUST_LOG` overrides `default_filter`;
/// only the first call has any effect.
pub fn init_tracing(default_filter: &str) {
    let default_filter = default_filter.to_owned();
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(true)
            .compact();
        let _ = subscriber.try_init();
    });
}

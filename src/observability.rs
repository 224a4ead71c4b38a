//! Logging sink selection per deployment environment.

use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Initializes the global tracing subscriber.
///
/// Local runs get pretty debug output; dev and prod emit JSON, at debug and
/// info level respectively. `RUST_LOG` overrides the default filter.
pub fn init_logging(env: Environment) {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    match env {
        Environment::Local => tracing_subscriber::fmt()
            .with_env_filter(filter("debug"))
            .pretty()
            .init(),
        Environment::Dev => tracing_subscriber::fmt()
            .with_env_filter(filter("debug"))
            .json()
            .init(),
        Environment::Prod => tracing_subscriber::fmt()
            .with_env_filter(filter("info"))
            .json()
            .init(),
    }
}

//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default filter.
///
/// `filter` uses the `env_logger` directive syntax (`"info"`,
/// `"ui_engine=debug,warn"`). A `RUST_LOG` variable in the environment
/// takes precedence. Calling this twice is harmless; the second call is
/// ignored.
pub fn init(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    if builder.try_init().is_err() {
        debug!("Logger already initialized, keeping existing configuration");
    }
}

//! Logging setup over `env_logger`

/// Initialize the logging system with an explicit filter (e.g. `"ui_layout=trace"`)
///
/// `RUST_LOG` still wins when it is set. Calling this twice is harmless: the
/// second call keeps the logger installed by the first.
pub fn init_with_filter(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    if let Err(err) = builder.try_init() {
        log::debug!("Logger already initialized: {}", err);
    }
}

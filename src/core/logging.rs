//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// Safe to call more than once: if a logger is already installed (by an
/// earlier call or by the embedding application) it is kept and this call
/// does nothing.
///
/// # Example
/// ```
/// wilderness::core::logging::init();
/// wilderness::core::logging::init();
/// log::info!("Composition engine started");
/// ```
pub fn init() {
    let installed = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp_millis()
    .try_init();

    if installed.is_err() {
        log::debug!("Logger already installed, keeping it");
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_twice() {
        super::init();
        super::init();
        log::info!("still logging");
    }
}

use log::LevelFilter;

/// Log to stderr. `RUST_LOG` still applies on top of the chosen level.
pub fn init_tool_logging(verbose: bool) {
    env_logger::builder()
        .filter_level(
            if verbose {
                LevelFilter::Trace
            } else if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            }
        )
        .parse_default_env()
        .init()
}

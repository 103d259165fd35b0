//! Logger setup for the demo binary and tests.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output for
/// this crate and info for everything else.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(format!("info,stalker={level}"));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    if builder.try_init().is_err() {
        log::trace!("logger already initialised");
    }
}

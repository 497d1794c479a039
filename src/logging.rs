//! Logger setup.
//!
//! Every crate logs through the `log` facade. The binary installs a `fern`
//! dispatcher writing timestamped lines to stderr.

use log::LevelFilter;

/// Picks the level: `RUST_LOG` if it names a level, otherwise the configured one.
pub fn level(configured: &str, env: Option<&str>) -> LevelFilter {
    env.and_then(|s| s.trim().parse().ok())
        .or_else(|| configured.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Later calls keep the first logger.
pub fn init(level: LevelFilter) {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("sdl2", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply();

    if result.is_ok() {
        log::debug!("logging initialized at {level}");
    }
}

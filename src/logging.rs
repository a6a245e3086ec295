//! One-time log setup.
//!
//! Under `hydrate`, records go to the browser console through `console_log`
//! and panics are reported there by `console_error_panic_hook`. Native builds
//! leave the `log` facade alone so tests and host applications can install
//! their own logger.

/// Install the console logger at `level`. Safe to call more than once.
pub fn init(level: log::LevelFilter) {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        let Some(level) = level.to_level() else {
            log::set_max_level(log::LevelFilter::Off);
            return;
        };
        // A second init fails with SetLoggerError; the first logger stays.
        if console_log::init_with_level(level).is_err() {
            log::set_max_level(level.to_level_filter());
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = level;
    }
}

#[cfg(all(test, not(feature = "hydrate")))]
mod tests {
    use super::*;

    #[test]
    fn init_is_noop_but_callable_in_native_builds() {
        init(log::LevelFilter::Debug);
        init(log::LevelFilter::Off);
    }
}

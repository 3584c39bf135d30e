// src/log.rs
//! Logging front door.
//!
//! The crate logs through the `logf!` / `logd!` / `logw!` / `loge!` macros,
//! which emit `tracing` events. Binaries call [`init`] once; library users can
//! install their own subscriber instead.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[doc(hidden)]
pub use tracing as __tracing;

/// Install a stderr subscriber. `RUST_LOG` wins over `verbose` when set.
/// Calling this twice is harmless.
pub fn init(verbose: bool) {
    let fallback = if verbose { "info,movie_trends=debug" } else { "warn,movie_trends=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_timer(fmt::time::uptime()),
        )
        .try_init()
        .ok();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}

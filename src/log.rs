// src/log.rs
//
// Logging front door. The short macros stay the call-site surface; events go
// through `tracing` and land in `.store/debug.log` (and stderr when asked).

use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::consts::{LOG_FILE, STORE_DIR};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
///
/// `RUST_LOG` overrides the default `holdings_tracker=info` filter.
pub fn init(to_stderr: bool) {
    if FILE_GUARD.get().is_some() {
        return;
    }

    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,holdings_tracker=info"))
    };

    let dir = Path::new(STORE_DIR);
    let _ = std::fs::create_dir_all(dir);
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::Layer::new()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter());

    let stderr_layer = to_stderr.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .with_filter(filter())
    });

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        let _ = FILE_GUARD.set(guard);
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!("{}", format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!("{}", format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!("{}", format!($($arg)*))
    };
}

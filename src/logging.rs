use std::{any::Any, backtrace::Backtrace};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber and the panic hook. `RUST_LOG` overrides
/// the configured directive.
pub fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(fmt::layer().with_target(false))
        .try_init()
        .context("failed to install tracing subscriber")?;
    set_panic_hook();
    Ok(())
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Text carried by a panic payload, for the two payload types `panic!` produces.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn set_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        let location = info
            .location()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        let thread = std::thread::current();

        tracing::error!(
            panic = %message,
            location = %location,
            thread = thread.name().unwrap_or("unnamed"),
            backtrace = %Backtrace::capture(),
            "panic"
        );
    }));
}

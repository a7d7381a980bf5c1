//! Logging setup utilities.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the calling crate, the binary and the shared crate. It can be
/// overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The library crate emitting most events (e.g., "roomcast_server")
/// * `binary_name` - The name of the binary (e.g., "roomcast-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use roomcast_shared::logger::setup_logger;
///
/// setup_logger("roomcast_server", "roomcast-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter(crate_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the directive string used when `RUST_LOG` is not set.
fn default_filter(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={level},{}={level},{}={level},tower_http={level}",
        crate_name.replace('-', "_"),
        binary_name.replace('-', "_"),
        env!("CARGO_PKG_NAME").replace('-', "_"),
        level = default_log_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_normalizes_crate_names() {
        // テスト項目: クレート名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let crate_name = "roomcast-server";

        // when (操作):
        let filter = default_filter(crate_name, "roomcast-server", "info");

        // then (期待する結果):
        assert!(filter.starts_with("roomcast_server=info"));
        assert!(filter.contains("roomcast_shared=info"));
        assert!(filter.contains("tower_http=info"));
        assert!(!filter.contains('-'));
    }
}

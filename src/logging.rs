//! Tracing setup shared by both bots.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Parse a level name given on the command line, falling back to INFO
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" | "warning" => LevelFilter::WARN,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

/// Install the global subscriber: formatted output with target and level
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true),
        )
        .with(parse_level(level))
        .init();
}

/// Best-effort extraction of the application id from a bot token.
///
/// The first segment of a Discord token is the base64-encoded bot user id.
pub fn bot_id_from_token(token: &str) -> Option<String> {
    use base64::Engine;

    let segment = token.split('.').next()?;
    let decoded = base64::engine::general_purpose::STANDARD_NO_PAD
        .decode(segment)
        .or_else(|_| base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(segment))
        .ok()?;
    let id = String::from_utf8(decoded).ok()?;

    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        Some(id)
    } else {
        None
    }
}

//! Logging configuration backed by compile-time limits and runtime preferences

use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
use crate::config::runtime::{runtime_config, LoggingPreferences};

type EventsLogLevel = crate::logging::events::LogLevel;

fn preferences() -> &'static LoggingPreferences {
    &runtime_config().logging
}

/// Minimum level an event needs to be emitted
pub fn get_min_log_level() -> EventsLogLevel {
    preferences().min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

/// Check if console logging is enabled
pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

/// Maximum log message length (compile-time constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = preferences();

    format!(
        "Logging Configuration:\n\
         - Max message length: {}\n\
         - Min log level: {}\n\
         - Structured logging: {}\n\
         - Console logging: {}",
        MAX_LOG_MESSAGE_LENGTH,
        preferences.min_log_level.as_str(),
        preferences.use_structured_logging,
        preferences.enable_console_logging,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_preferences() {
        let summary = get_config_summary();
        assert!(summary.contains("Min log level"));
        assert!(summary.contains(&get_max_log_message_length().to_string()));
    }
}

//! Logging service and logger backends

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service with configuration-aware settings
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if !config::use_console_logging() {
            Arc::new(NullLogger)
        } else if config::use_structured_logging() {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    pub fn log_warning(&self, message: &str) {
        self.log_event(LogEvent::warning(message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }
}

/// Create the service described by the runtime logging preferences
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

/// Logger that discards everything
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Human readable logger writing to stderr
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            // stdout carries command output
            eprintln!("{}", event.format());
        }
    }
}

/// Structured logger for JSON output and tooling integration
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.format_json() {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", event.format()),
            }
        }
    }
}

/// Forwards events into the `log` facade so an application-chosen backend renders them
#[cfg(feature = "log-facade")]
pub struct FacadeLogger;

#[cfg(feature = "log-facade")]
impl Logger for FacadeLogger {
    fn log(&self, event: &LogEvent) {
        let level = match event.level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        };
        log::log!(target: event.category(), level, "{}", event.format());
    }
}

/// Memory logger for testing
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_events<R>(&self, f: impl FnOnce(&mut Vec<LogEvent>) -> R) -> R {
        let mut guard = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.with_events(|events| events.clone())
    }

    pub fn clear(&self) {
        self.with_events(|events| events.clear());
    }

    pub fn event_count(&self) -> usize {
        self.with_events(|events| events.len())
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.with_events(|events| events.iter().filter(|e| e.is_error()).cloned().collect())
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.with_events(|events| events.iter().filter(|e| e.code == code).cloned().collect())
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.with_events(|events| events.iter().any(|e| e.is_error() && e.code == code))
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.with_events(|events| events.iter().any(|e| e.is_info() && e.code == code))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        self.with_events(|events| events.push(event.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_service_filters_by_level() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log_error(codes::syntax::TRAILING_INPUT, "Trailing input");
        service.log_warning("Careful");
        service.log_info("Chatty");
        service.log_event(LogEvent::debug("Noise"));

        assert_eq!(memory.event_count(), 2);
        assert!(memory.has_error_with_code(codes::syntax::TRAILING_INPUT));
    }

    #[test]
    fn test_memory_logger_queries() {
        let memory = MemoryLogger::new();
        memory.log(&LogEvent::success(codes::success::SCHEME_CONSTRUCTED, "Built"));
        memory.log(&LogEvent::error(codes::scheme::MISSING_FORMULA, "Missing"));

        assert!(memory.has_success_with_code(codes::success::SCHEME_CONSTRUCTED));
        assert_eq!(memory.get_errors().len(), 1);
        assert_eq!(
            memory
                .get_events_with_code(codes::scheme::MISSING_FORMULA)
                .len(),
            1
        );

        memory.clear();
        assert_eq!(memory.event_count(), 0);
    }
}

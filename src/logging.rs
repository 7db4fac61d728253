//! Injected logging capability
//!
//! The acquisition component reports through an [`EventLog`] supplied at
//! construction instead of a global logger. Only two severities exist:
//! informational conditions worth surfacing (e.g. a rejected but not
//! erroneous position read) and failed operations.

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    /// Non-error condition worth surfacing
    Info,
    /// Operation failed
    Error,
}

/// Leveled text log sink
pub trait EventLog {
    /// Record one message at the given level
    fn log(&mut self, level: LogLevel, message: &str);

    /// Record an informational message
    fn info(&mut self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Record an error message
    fn error(&mut self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Sink that discards every message
#[derive(Debug, Default)]
pub struct NullEventLog;

impl EventLog for NullEventLog {
    fn log(&mut self, _level: LogLevel, _message: &str) {}
}

/// Message capacity of one recorded entry
#[cfg(any(test, feature = "mock"))]
const ENTRY_SIZE: usize = 160;

/// Entries retained by [`MockLog`]
#[cfg(any(test, feature = "mock"))]
const LOG_CAPACITY: usize = 16;

/// Recording sink for test verification
///
/// Stores every message (truncated to the entry capacity) together with its
/// level so tests can assert on emission counts and contents.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MockLog {
    entries: heapless::Vec<(LogLevel, heapless::String<ENTRY_SIZE>), LOG_CAPACITY>,
}

#[cfg(any(test, feature = "mock"))]
impl MockLog {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded entries, in emission order
    pub fn entries(&self) -> &[(LogLevel, heapless::String<ENTRY_SIZE>)] {
        &self.entries
    }

    /// Number of messages recorded at `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|(l, _)| *l == level).count()
    }

    /// Number of messages at `level` containing `needle`
    pub fn count_containing(&self, level: LogLevel, needle: &str) -> usize {
        self.entries
            .iter()
            .filter(|(l, m)| *l == level && m.contains(needle))
            .count()
    }

    /// Drop all recorded entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(any(test, feature = "mock"))]
impl EventLog for MockLog {
    fn log(&mut self, level: LogLevel, message: &str) {
        let mut owned: heapless::String<ENTRY_SIZE> = heapless::String::new();
        let take = core::cmp::min(message.len(), ENTRY_SIZE);
        let _ = owned.push_str(&message[..take]);
        let _ = self.entries.push((level, owned));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_log_records_levels_and_text() {
        let mut log = MockLog::new();
        log.info("position rejected");
        log.error("bus fault");
        log.info("position rejected again");

        assert_eq!(log.count(LogLevel::Info), 2);
        assert_eq!(log.count(LogLevel::Error), 1);
        assert_eq!(log.count_containing(LogLevel::Info, "rejected"), 2);
        assert_eq!(log.count_containing(LogLevel::Error, "rejected"), 0);
    }

    #[test]
    fn test_mock_log_clear() {
        let mut log = MockLog::new();
        log.info("one");
        log.clear();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_null_log_discards() {
        let mut log = NullEventLog;
        log.info("nothing happens");
        log.error("still nothing");
    }
}

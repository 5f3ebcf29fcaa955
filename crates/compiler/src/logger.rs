use codemap::SpanLoc;
use std::fmt::Debug;

/// Receives the messages produced while compiling: `@debug` and `@warn`
/// output as well as warnings about input that was ignored.
pub trait Logger: Debug {
    /// Called for each `@debug` rule.
    fn debug(&self, location: SpanLoc, message: &str);

    /// Called for each `@warn` rule and for ignored input.
    fn warning(&self, location: SpanLoc, message: &str);
}

/// Writes every message to stderr. This is the default logger.
#[derive(Debug)]
pub struct StdLogger;

impl Logger for StdLogger {
    #[inline]
    fn debug(&self, location: SpanLoc, message: &str) {
        eprintln!(
            "{}:{} DEBUG: {}",
            location.file.name(),
            location.begin.line + 1,
            message
        );
    }

    #[inline]
    fn warning(&self, location: SpanLoc, message: &str) {
        eprintln!(
            "WARNING: {}\n    {}:{}:{}",
            message,
            location.file.name(),
            location.begin.line + 1,
            location.begin.column + 1
        );
    }
}

/// Discards every message.
#[derive(Debug)]
pub struct NullLogger;

impl Logger for NullLogger {
    #[inline]
    fn debug(&self, _location: SpanLoc, _message: &str) {}

    #[inline]
    fn warning(&self, _location: SpanLoc, _message: &str) {}
}

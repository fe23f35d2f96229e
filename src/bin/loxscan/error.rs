use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("Unsupported character: {0:?}")]
    UnsupportedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Malformed number literal: {0}")]
    MalformedNumber(String),
}

#[derive(Error, Debug)]
pub enum LoxError {
    #[error("Could not read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
    #[error("Scanning reported {count} error(s).")]
    ScanFailed { count: usize },
}

/// Receives lexical errors as the scanner finds them. Reporting never stops the scan.
pub trait ErrorSink {
    fn report(&mut self, line: u32, error: ScanError);
}

/// Prints errors to stderr and remembers that something went wrong.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.count > 0
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl ErrorSink for ErrorReporter {
    fn report(&mut self, line: u32, error: ScanError) {
        eprintln!("[line {}] Error: {}", line, error);
        self.count += 1;
    }
}

/// Keeps every reported error, in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectErrors {
    pub errors: Vec<(u32, ScanError)>,
}

#[cfg(test)]
impl ErrorSink for CollectErrors {
    fn report(&mut self, line: u32, error: ScanError) {
        self.errors.push((line, error));
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ScanError::UnsupportedCharacter('@').to_string(),
            "Unsupported character: '@'"
        );
        assert_eq!(ScanError::UnterminatedString.to_string(), "Unterminated string.");
        assert_eq!(
            LoxError::ScanFailed { count: 2 }.to_string(),
            "Scanning reported 2 error(s)."
        );
    }

    #[test]
    fn test_reporter_flag_resets() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.had_error());

        reporter.report(3, ScanError::UnterminatedString);
        reporter.report(4, ScanError::UnsupportedCharacter('#'));
        assert!(reporter.had_error());
        assert_eq!(reporter.count(), 2);

        reporter.reset();
        assert!(!reporter.had_error());
        assert_eq!(reporter.count(), 0);
    }

    #[test]
    fn test_collect_keeps_order() {
        let mut sink = CollectErrors::default();
        sink.report(1, ScanError::UnsupportedCharacter('@'));
        sink.report(2, ScanError::UnterminatedString);
        assert_eq!(
            sink.errors,
            vec![
                (1, ScanError::UnsupportedCharacter('@')),
                (2, ScanError::UnterminatedString)
            ]
        );
    }
}

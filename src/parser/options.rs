//! Parsing options and configuration.

/// Options for parsing a document into posts.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How strictly metadata headers are validated
    pub error_mode: ErrorMode,

    /// Whether to resolve post views in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip malformed header lines).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

/// How malformed metadata header lines are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// A header line without a colon voids the whole header
    #[default]
    Strict,
    /// Skip lines without a colon and keep the rest of the header
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().lenient().sequential();

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.parallel);
    }
}

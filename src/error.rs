use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("pattern compile error: {0}")]
    PatternCompile(#[from] PatternCompileError),
    #[error("matcher runtime error: {0}")]
    Matcher(#[from] MatcherError),
    #[error("invalid flags: {0}")]
    FlagParse(#[from] FlagParseError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Malformed pattern syntax, as diagnosed by the pattern library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCompileError {
    pattern: String,
    message: String,
}

impl PatternCompileError {
    pub(crate) fn new(pattern: &str, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PatternCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PatternCompileError {}

/// Failure while scanning text with an already compiled matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherError {
    message: String,
}

impl MatcherError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for MatcherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for MatcherError {}

impl From<fancy_regex::Error> for MatcherError {
    fn from(value: fancy_regex::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagParseError {
    #[error("unknown flag letter '{letter}' in \"{input}\"")]
    UnknownLetter { input: String, letter: char },
    #[error("flag letter '{letter}' repeated in \"{input}\"")]
    Repeated { input: String, letter: char },
}

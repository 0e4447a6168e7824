
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigilogicError {
    #[error("No input provided")]
    EmptyInput,
    #[error("Invalid digit '{digit}' at position {position} for base {radix}")]
    InvalidDigit { digit: char, position: usize, radix: u32 },
    #[error("Parse error: {message}")]
    Parse { message: String, command: Option<String> },
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, DigilogicError>;

impl DigilogicError {
    pub fn parse(message: impl Into<String>, command: &str) -> Self {
        Self::Parse { message: message.into(), command: Some(command.to_string()) }
    }
    /// True for errors caused by what the caller typed, as opposed to the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InvalidDigit { .. } | Self::Parse { .. })
    }
}

// Helper conversions
impl From<config::ConfigError> for DigilogicError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for DigilogicError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}

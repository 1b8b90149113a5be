//! Domain error types.

/// A parse error with position information for price spec parsing.
#[derive(Debug, Clone, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    /// Format the error with a caret pointing at the error position in the input.
    pub fn display_with_context(&self, input: &str) -> String {
        let caret = " ".repeat(self.position) + "^";
        format!(
            "{input}\n{caret}\n{err}",
            input = input,
            caret = caret,
            err = self
        )
    }
}

/// Top-level error type for edgemap.
#[derive(Debug, thiserror::Error)]
pub enum EdgemapError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("orders file error in {file}: {reason}")]
    OrdersFile { file: String, reason: String },

    #[error("no valid orders to analyze")]
    NoValidOrders,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&EdgemapError> for std::process::ExitCode {
    fn from(err: &EdgemapError) -> Self {
        let code: u8 = match err {
            EdgemapError::Io(_) => 1,
            EdgemapError::ConfigParse { .. }
            | EdgemapError::ConfigMissing { .. }
            | EdgemapError::ConfigInvalid { .. } => 2,
            EdgemapError::OrdersFile { .. } => 3,
            EdgemapError::Parse(_) => 4,
            EdgemapError::NoValidOrders => 5,
        };
        std::process::ExitCode::from(code)
    }
}

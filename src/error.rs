use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuadError>;

#[derive(Debug, Error)]
pub enum QuadError {
    #[error("parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("division by zero at x = {x}")]
    DivisionByZero { x: f64 },
    #[error("{function} is undefined for {argument} (at x = {x})")]
    Domain {
        function: &'static str,
        argument: f64,
        x: f64,
    },
    #[error("result overflowed at x = {x}")]
    Overflow { x: f64 },
    #[error("unknown quadrature rule '{0}'")]
    UnknownRule(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid job file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`QuadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The formula text is malformed.
    Parse,
    /// A rule rejected its parameters before any evaluation took place.
    Configuration,
    /// The formula could not be evaluated at a required point.
    Evaluation,
    /// A job description or rule name could not be read.
    Input,
}

impl QuadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuadError::Parse { .. } => ErrorKind::Parse,
            QuadError::Configuration(_) => ErrorKind::Configuration,
            QuadError::DivisionByZero { .. }
            | QuadError::Domain { .. }
            | QuadError::Overflow { .. } => ErrorKind::Evaluation,
            QuadError::UnknownRule(_) | QuadError::Io(_) | QuadError::Json(_) => ErrorKind::Input,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        QuadError::Configuration(message.into())
    }
}

//! Process-wide error type with stable exit codes.
//!
//! Exit code conventions:
//!
//! - `2`: input validation failure (malformed, out-of-range or suspicious
//!   deal input; see `validate`)
//! - `3`: feature range failure (a feature value reached the scorer outside
//!   the safe numeric envelope; see `model`)
//! - `4`: numeric/internal failure (e.g. calibration did not converge)
//! - `5`: I/O failure (missing files, bad JSON/CSV)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// A validation failure: the input violated a domain/security constraint.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// A feature range failure: a feature value was non-finite or outside the
    /// safe envelope when it reached the scorer.
    pub fn feature_range(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

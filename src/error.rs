//! Error types with actionable diagnostics.
//!
//! The engine has exactly one failure mode: a caller input violates a
//! precondition. That is [`DomainError`]. Everything layered on top of the
//! engine (config loading, the CLI) wraps it in [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// An input violates a precondition of the scaling-law engine.
///
/// Never transient, never retryable: the caller must fix the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Compute budget is zero, negative or not finite.
    #[error("Invalid compute budget: {0} FLOPs\n  → The budget must be a positive, finite number of FLOPs (e.g. 1e23)")]
    NonPositiveBudget(f64),

    /// Parameter count N is zero, negative or not finite.
    #[error("Invalid parameter count N = {0}\n  → N must be positive; the loss term A / N^alpha is undefined otherwise")]
    NonPositiveParams(f64),

    /// Token count D is zero, negative or not finite.
    #[error("Invalid token count D = {0}\n  → D must be positive; the loss term B / D^beta is undefined otherwise")]
    NonPositiveTokens(f64),

    /// A tokens-per-parameter ratio is zero, negative or not finite.
    #[error("Invalid allocation ratio D/N = {0}\n  → The ratio must be positive")]
    NonPositiveRatio(f64),

    /// Slider position outside `[0, 100]`.
    #[error("Slider position {0} is out of range\n  → Use a value between 0 (data-heavy) and 100 (parameter-heavy)")]
    SliderOutOfRange(f64),

    /// A slider ratio bound is zero, negative or not finite.
    #[error("Invalid slider bound {bound} = {value}\n  → Slider ratio bounds must be positive (defaults: min_ratio 1, max_ratio 400)")]
    InvalidRatioBound { bound: &'static str, value: f64 },

    /// A loss-model constant violates its domain.
    #[error("Invalid loss model parameter {name} = {value}\n  → {requirement}")]
    InvalidModelParameter { name: &'static str, value: f64, requirement: &'static str },

    /// The compute constant `k` in `C = k·N·D` is not positive.
    #[error("Invalid compute constant {0}\n  → The FLOPs-per-parameter-per-token constant must be positive (default 6)")]
    InvalidComputeConstant(f64),

    /// Score sensitivity is negative or not finite.
    #[error("Invalid score sensitivity {0}\n  → Sensitivity must be a non-negative number (default 40)")]
    InvalidSensitivity(f64),

    /// Compute-optimal score threshold outside `[0, 100]`.
    #[error("Invalid optimal score threshold {0}\n  → Use a score between 0 and 100 (default 90)")]
    InvalidScoreThreshold(f64),

    /// An efficiency score outside `[0, 100]`.
    #[error("Efficiency score {0} is out of range\n  → Scores lie between 0 and 100")]
    ScoreOutOfRange(f64),

    /// Zone thresholds do not bracket 1.
    #[error("Invalid zone thresholds: low_factor {low}, high_factor {high}\n  → Require 0 < low_factor < 1 < high_factor (defaults 0.6 / 1.5)")]
    InvalidZoneThresholds { low: f64, high: f64 },

    /// Search configuration is unusable.
    #[error("Invalid search configuration: {message}\n  → {suggestion}")]
    InvalidSearch { message: String, suggestion: &'static str },
}

impl DomainError {
    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonPositiveBudget(_) => "D001",
            Self::NonPositiveParams(_) => "D002",
            Self::NonPositiveTokens(_) => "D003",
            Self::NonPositiveRatio(_) => "D004",
            Self::SliderOutOfRange(_) => "D010",
            Self::InvalidRatioBound { .. } => "D011",
            Self::InvalidModelParameter { .. } => "D020",
            Self::InvalidComputeConstant(_) => "D021",
            Self::InvalidSensitivity(_) => "D022",
            Self::InvalidScoreThreshold(_) => "D023",
            Self::ScoreOutOfRange(_) => "D024",
            Self::InvalidZoneThresholds { .. } => "D030",
            Self::InvalidSearch { .. } => "D040",
        }
    }

    /// Domain errors are always caused by caller input.
    pub fn is_user_error(&self) -> bool {
        true
    }
}

/// Errors raised above the engine: configuration files, I/O, rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// An engine precondition was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found at the given path.
    #[error("Configuration file not found: {path}\n  → Create a config file or use --config to specify a different path")]
    ConfigNotFound { path: PathBuf },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization of a report failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Config(_) => "E002",
            Self::ConfigNotFound { .. } => "E001",
            Self::Io { .. } => "E050",
            Self::Serialization(_) => "E051",
        }
    }

    /// Check if this error is user-recoverable.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_user_error(),
            Self::Config(_) | Self::ConfigNotFound { .. } => true,
            Self::Io { .. } | Self::Serialization(_) => false,
        }
    }
}

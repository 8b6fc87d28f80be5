//! Error kinds surfaced by the statistical model and the speed-field sweep.
//!
//! Two kinds exist: configuration errors (shapes that do not agree) and
//! numerical errors (a covariance that cannot be factorized, or a value that
//! is not finite). Neither is retried; both abort the current sweep.

/// Errors raised while configuring or evaluating a speed field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeedError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("numerical error: {0}")]
    Numerical(String),
}

impl SpeedError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn numerical(msg: impl Into<String>) -> Self {
        Self::Numerical(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::Numerical(_))
    }
}

pub type Result<T> = std::result::Result<T, SpeedError>;

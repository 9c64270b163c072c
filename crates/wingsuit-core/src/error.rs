use thiserror::Error;

/// Rejected configuration. Raised when a `WorldConfig` is built or loaded,
/// never from inside a simulation step.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field}: empty or inverted range [{min}, {max})")]
    InvalidRange { field: &'static str, min: f32, max: f32 },

    #[error("{field}: {value} outside [{min}, {max}]")]
    OutOfRange { field: &'static str, value: f32, min: f32, max: f32 },

    #[error("{field}: must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field}: must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field}: vector must be finite and non-zero")]
    DegenerateVector { field: &'static str },

    #[error("failed to parse world config: {0}")]
    Parse(#[from] serde_json::Error),
}

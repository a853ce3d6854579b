use thiserror::Error;

/// Errors raised while configuring a bar. Pointer input and value
/// assignments never fail; they saturate instead.
#[derive(Debug, Error)]
pub enum AirBarError {
    #[error("invalid value range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("range bound is not a finite number: {0}")]
    NonFiniteBound(f64),

    #[error("invalid color '{0}', expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("failed to parse AirBar config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = AirBarError> = std::result::Result<T, E>;

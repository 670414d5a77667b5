use thiserror::Error;

/// Rejected input at the scene boundary. Generation, sampling and physics are
/// total and never produce this.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("speed multiplier must be finite and positive, got {0}")]
    InvalidSpeed(f64),

    #[error("could not parse seed from {0:?}")]
    InvalidSeed(String),
}

/// Parse a seed written as decimal or `0x`-prefixed hex.
pub fn parse_seed(text: &str) -> Result<u32, SceneError> {
    let trimmed = text.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse::<u32>(),
    };
    parsed.map_err(|_| SceneError::InvalidSeed(text.to_string()))
}

/// Errors raised while looking up the name of a color.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The color service answered with a non-success status.
    #[error("color service responded with status {0}")]
    Status(u16),
    /// The response body was not the expected JSON document.
    #[error("failed to decode color service response: {0}")]
    Decode(#[from] serde_json::Error),
    /// A hex color string was not in the `#RRGGBB` form.
    #[error("invalid hex color {0:?}, expected #RRGGBB")]
    InvalidHex(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl LookupError {
    /// Whether this error only means "the service has nothing for us", which is not worth a warning.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}

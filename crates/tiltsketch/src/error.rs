/// Why a session ended up on static fallback gravity.
///
/// None of these reach the render loop; the permission negotiator records the
/// reason and the game keeps running with downward gravity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrientationError {
    #[error("device orientation is not supported on this platform")]
    Unsupported,
    #[error("device orientation permission was denied")]
    PermissionDenied,
    #[error("device orientation permission request failed: {0}")]
    RequestFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Convenience result type used across triplog.
pub type TriplogResult<T> = Result<T, TriplogError>;

/// User-facing message shown when a route cannot be produced because the directions service
/// rejected the path length, or could not be reached at all.
pub const ROUTE_LIMIT_MESSAGE: &str = "The distance has surpassed 6000000.0 meters, which exceeds the configuration limits set by the ORS server.";

/// Top-level error taxonomy used by both pipelines.
#[derive(thiserror::Error, Debug)]
pub enum TriplogError {
    /// Invalid user-provided or trip data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A template or font asset could not be read or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// The trip (or one of its stops) lacks coordinates a pipeline needs to run.
    #[error("missing coordinate: {0}")]
    MissingCoordinate(String),

    /// The directions service answered with a non-success status.
    #[error("route service error (status {status}): {message}")]
    RouteService {
        /// HTTP status returned by the service.
        status: u16,
        /// Service-specific error code, when the body carried one.
        code: Option<i64>,
        /// Error message reported by the service (or the raw body).
        message: String,
    },

    /// Transport-level failure reaching an HTTP collaborator.
    #[error("network error: {0}")]
    Network(String),

    /// A response payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Rasterization or image encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TriplogError {
    /// Build a [`TriplogError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TriplogError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`TriplogError::MissingCoordinate`] value.
    pub fn missing_coordinate(msg: impl Into<String>) -> Self {
        Self::MissingCoordinate(msg.into())
    }

    /// Build a [`TriplogError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Build a [`TriplogError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`TriplogError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TriplogError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` when the directions service refused the route because its total distance
    /// exceeds the configured ceiling.
    pub fn is_distance_limit(&self) -> bool {
        match self {
            Self::RouteService {
                status,
                code,
                message,
            } => {
                *code == Some(2004)
                    || (*status == 400 && message.to_ascii_lowercase().contains("distance"))
            }
            _ => false,
        }
    }

    /// Return `true` for errors that keep a pipeline in its not-ready state instead of failing it.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::MissingCoordinate(_))
    }

    /// Message suitable for showing to an end user.
    ///
    /// Distance-limit rejections and transport failures share one message; other service
    /// rejections surface the service's own message verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => ROUTE_LIMIT_MESSAGE.to_string(),
            Self::RouteService { message, .. } => {
                if self.is_distance_limit() {
                    ROUTE_LIMIT_MESSAGE.to_string()
                } else {
                    message.clone()
                }
            }
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for TriplogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

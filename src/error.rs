use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// The polyline text is truncated or contains a byte outside the
    /// encoding alphabet. Everything after `position` is unusable because the
    /// running coordinates can no longer be reconstructed.
    #[error("malformed polyline at byte {position}: {reason}")]
    MalformedInput {
        position: usize,
        reason: &'static str,
    },
    #[error("{0} requires at least one vertex")]
    EmptyInput(&'static str),
    #[error("invalid forecast timestamp: {0:?}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, RouteError>;

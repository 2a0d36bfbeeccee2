use publicize_format::PostId;
use thiserror::Error;

/// Error code reported when the actor may not touch a post's connections.
pub const PERMISSION_ERROR_CODE: &str = "invalid_user_permission_publicize";

/// Errors from reading, reconciling or persisting connection state.
#[derive(Debug, Error)]
pub enum Error {
    /// The permission gate refused access to the post.
    #[error("{code}: not allowed to access connections of post {post_id} (status {status})")]
    PermissionDenied {
        /// Post the request targeted.
        post_id: PostId,
        /// Machine-readable error code.
        code: &'static str,
        /// HTTP status to report.
        status: u16,
    },

    /// The connection reader or state writer failed.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error from the publicize-format crate.
    #[error("format error: {0}")]
    Format(#[from] publicize_format::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a storage backend error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Storage(Box::new(err))
    }

    /// Authorization failure for the given post.
    pub fn permission_denied(post_id: PostId, authenticated: bool) -> Self {
        Error::PermissionDenied {
            post_id,
            code: PERMISSION_ERROR_CODE,
            status: if authenticated { 403 } else { 401 },
        }
    }

    /// HTTP status to report for this error.
    pub fn status(&self) -> u16 {
        match self {
            Error::PermissionDenied { status, .. } => *status,
            Error::Format(_) | Error::Json(_) => 400,
            Error::Storage(_) => 500,
        }
    }
}

/// Result type for publicize-runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

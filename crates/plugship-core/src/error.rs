//! Core error types.

use thiserror::Error;

/// Errors from the marketplace collaborator.
///
/// Owned by this crate so that [`StoreClient`](crate::StoreClient)
/// implementations report failures in one shape regardless of transport.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a usable response.
    #[error("store request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The store answered with a non-success status.
    #[error("store rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// Credentials were not accepted.
    #[error("authentication failed for {username}")]
    Auth { username: String },

    /// The response did not carry the data the workflow relies on.
    #[error("malformed store response: {reason}")]
    Malformed { reason: String },
}

/// Release workflow errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store lookup returned nothing for the plugin name.
    #[error("plugin not found in the store: {name}")]
    PluginNotFound { name: String },

    /// A binary with the same version already exists and force was not set.
    #[error("{name} {version} already exists in the store; pass --force to replace it")]
    VersionConflict { name: String, version: String },

    /// The review of the submitted binary did not end in approval.
    #[error("review of {name} {version} ended with status \"{status}\": {comment}")]
    ReviewRejected {
        name: String,
        version: String,
        status: String,
        comment: String,
    },

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for release workflow operations.
pub type CoreResult<T> = Result<T, CoreError>;

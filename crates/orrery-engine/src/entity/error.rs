use std::fmt;

/// Errors raised by the entity core.
///
/// Every variant is a precondition or programmer error, not a transient
/// runtime condition, so none of them has a retry path. Nothing here is
/// swallowed: constructors and draw calls propagate these to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityError {
    /// A precondition was violated (non-positive mass, density, size, or
    /// divisions; malformed vertex data). Policy: fail fast at
    /// construction, never clamp into degenerate geometry.
    InvalidArgument(String),

    /// A GPU buffer could not be created within device limits. Fatal for
    /// this entity; there is no transient condition to retry against.
    ResourceCreationFailed(String),

    /// Draw was requested before any vertex data was uploaded.
    NotInitialized,
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            EntityError::ResourceCreationFailed(msg) => {
                write!(f, "GPU resource creation failed: {msg}")
            }
            EntityError::NotInitialized => {
                write!(f, "entity drawn before any vertex data was uploaded")
            }
        }
    }
}

impl std::error::Error for EntityError {}

//! Errors raised by primary link actions.
//!
//! Background listing never produces one of these; it degrades to an
//! unavailable [`crate::link::LinkListing`] instead.

use thiserror::Error;

use ats_core::error::{AppError, ErrorKind};
use ats_entity::link::LinkScope;

/// Failure of a user-initiated link action.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The backend rejected the create request or could not be reached.
    #[error("Failed to create shareable link: {0}")]
    LinkCreationFailed(#[source] AppError),
    /// The backend rejected the permission change or could not be reached.
    #[error("Failed to update link permission: {0}")]
    PermissionUpdateFailed(#[source] AppError),
    /// Another create or update is still outstanding for this session.
    #[error("A link request is already in progress")]
    RequestInFlight,
    /// The action needs a link but none is known for the scope.
    #[error("No active link for scope {0}")]
    NoActiveLink(LinkScope),
}

impl LinkError {
    /// The backend failure behind this error, if any.
    pub fn cause(&self) -> Option<&AppError> {
        match self {
            Self::LinkCreationFailed(cause) | Self::PermissionUpdateFailed(cause) => Some(cause),
            Self::RequestInFlight | Self::NoActiveLink(_) => None,
        }
    }
}

impl From<LinkError> for AppError {
    fn from(err: LinkError) -> Self {
        let kind = match &err {
            LinkError::LinkCreationFailed(cause) | LinkError::PermissionUpdateFailed(cause) => {
                cause.kind
            }
            LinkError::RequestInFlight => ErrorKind::Conflict,
            LinkError::NoActiveLink(_) => ErrorKind::NotFound,
        };
        AppError::new(kind, err.to_string())
    }
}

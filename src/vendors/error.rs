use thiserror::Error;

use crate::hours::HoursError;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("name must not be empty")]
    InvalidName,

    #[error("contact number must be in international form, like +919876543210")]
    InvalidContactNumber,

    #[error("contact number is already registered to another vendor")]
    ContactNumberTaken,

    #[error("could not find coordinates in the map link")]
    InvalidMapLink,

    #[error("invalid operating hours: {0}")]
    InvalidHours(#[from] HoursError),

    #[error("vendor not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ProfileError {
    /// True for rejections caused by the submitted data rather than the system.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ProfileError::Internal(_))
    }
}

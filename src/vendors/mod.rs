mod dto;
mod error;
pub mod repo;
mod repo_types;
pub mod services;

pub use dto::{Pagination, ProfileUpdate, UpdateProfileRequest, VendorSummary, MAX_LIMIT};
pub use error::ProfileError;
pub use repo::{ContactNumberTaken, MemoryProfileStore, PgProfileStore, ProfileStore};
pub use repo_types::{Vendor, VendorRow};

//! Application layer - the profile repository.
//!
//! The repository orchestrates request validation, service identity,
//! the profile codec and storage. It holds no mutable state and is safe to
//! share across tasks behind an `Arc`.

mod errors;
mod repository;
mod requests;

pub use errors::RepositoryError;
pub use repository::Repository;
pub use requests::{
    CreateProfileRequest, CreateServiceRequest, GetProfilesRequest, GetServicesRequest,
};

//! HTTP adapter for service registration, profile ingestion and export.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateProfileQuery, CreateServiceBody, CreateServiceResponse, ErrorResponse, ProfilesQuery,
    ServiceResponse, ServicesQuery,
};
pub use handlers::ProfilesAppState;
pub use routes::profiles_router;

//! Profile domain - identity and record types.
//!
//! - `ProfileType` - kind of a profile sample (cpu, heap, ...)
//! - `Token` - opaque service identifier
//! - `Labels` - key/value facets with union merge
//! - `Service` / `Profile` - records persisted by storage
//! - `GetServicesFilter` / `GetProfileFilter` - storage selections

mod filters;
mod labels;
mod profile_type;
mod service;
mod token;

pub use filters::{GetProfileFilter, GetServicesFilter};
pub use labels::{Label, Labels};
pub use profile_type::ProfileType;
pub use service::{Profile, Service, ServiceRef};
pub use token::Token;

//! Domain model for directory users and their roles.

mod actor;
mod error;
mod ids;
mod role;
mod user;

pub use actor::Actor;
pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::UserId;
pub use role::Role;
pub use user::{User, UserProfile};

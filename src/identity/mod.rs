//! Users, roles and the acting identity.
//!
//! Identity is supplied by an external provider: this module only models the
//! directory of users, the user-to-role assignment relation and the acting
//! user ([`domain::Actor`]) that services authorise against. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Bearer-token authentication for the API.
//!
//! Tokens are issued by the external account service; this module only
//! validates them and resolves the calling owner.

pub mod jwt;
pub mod middleware;
pub mod model;

pub use middleware::authenticate;
pub use model::Claims;

//! Authentication and authorization
//!
//! - [`JwtService`] - token issue / validation
//! - [`authenticate`] - middleware resolving the bearer token
//! - [`CurrentUser`] / [`Identity`] - extractors for handlers
//! - [`roles`] - role predicates, [`RoleView`] dispatch and guards

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod roles;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::authenticate;
pub use roles::{CurrentUser, Identity, Role, RoleView};

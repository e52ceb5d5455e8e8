//! The multi-principal authentication subsystem.
//!
//! Three collections can authenticate independently (users, doctors,
//! organisations), each with its own session cookie. Resolution maps a
//! request to at most one [`medway_core::Caller`]; the rehydration
//! middleware attaches the backing record so downstream policy checks
//! behave uniformly no matter which path produced the identity.

pub mod cookie;
pub mod middleware;
pub mod password;
pub mod rehydrate;
pub mod resolver;
pub mod token;

pub use middleware::{Identity, IdentityLayer, RequestIdentity};
pub use token::{Claims, TokenCodec};

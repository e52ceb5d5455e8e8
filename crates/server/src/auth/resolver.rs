//! Caller resolution: map a request's cookies to at most one [`Caller`].
//!
//! A browser may hold session cookies for several principal types at once
//! (an organisation cookie plus a leftover user cookie, say). Resolution
//! is deterministic: auth collections are checked in fixed priority order
//! users > doctors > organisations, and the first cookie whose token
//! verifies wins. Resolution is a pure function of the request headers
//! and the restriction mode, never of prior request history.

use axum::http::HeaderMap;

use medway_core::{Caller, Collection, DocumentId};

use super::cookie::cookie_value;
use super::token::TokenCodec;

/// Resolve the caller from any recognized session cookie, in priority
/// order. Returns `None` when no cookie yields a verified token
/// (anonymous request).
pub fn resolve(headers: &HeaderMap, codec: &TokenCodec) -> Option<Caller> {
    Collection::AUTH_PRIORITY
        .iter()
        .find_map(|&collection| resolve_only(headers, codec, collection))
}

/// Resolve the caller from a single collection's own cookie, ignoring all
/// other session cookies.
///
/// Collection-scoped paths (an organisation's `me`, logout, or hooks) use
/// this so that a stray cookie from another principal type can never be
/// adopted as the identity.
pub fn resolve_only(
    headers: &HeaderMap,
    codec: &TokenCodec,
    collection: Collection,
) -> Option<Caller> {
    let name = collection.cookie_name()?;
    let token = cookie_value(headers, name)?;
    let claims = codec.decode(&token)?;

    // A verified token carried in the wrong collection's cookie is not an
    // identity for that collection.
    if claims.collection != collection {
        tracing::debug!(
            cookie = name,
            token_collection = %claims.collection,
            "session token found in another collection's cookie, ignoring"
        );
        return None;
    }

    let id = DocumentId::new(claims.id);
    Some(match collection {
        Collection::Users => Caller::User {
            id,
            role: claims.role.unwrap_or_default(),
            email: claims.email,
        },
        Collection::Doctors => Caller::Doctor {
            id,
            email: claims.email,
        },
        Collection::Organisations => Caller::Organisation {
            id,
            email: claims.email,
        },
        Collection::DoctorCategories | Collection::Media => return None,
    })
}

//! Identity rehydration: turn resolved cookie claims into an attached
//! identity backed by a live store record.

use std::sync::Arc;

use axum::http::HeaderMap;

use medway_store::DocumentStore;

use super::middleware::{Identity, RequestIdentity};
use super::resolver;
use super::token::TokenCodec;

/// Derive the request identity from cookies and the document store.
///
/// The caller is resolved from the session cookies, then its backing
/// record is loaded with access checks bypassed (this is an internal trust
/// boundary; the policy layer runs later, against the attached identity).
///
/// Every failure degrades to anonymous: a missing record and an
/// unavailable store both leave the request without an identity. The
/// degradation is deliberate and is reported as a structured debug event
/// rather than an error the client could observe.
pub async fn rehydrate(
    headers: &HeaderMap,
    codec: &TokenCodec,
    store: &Arc<dyn DocumentStore>,
) -> RequestIdentity {
    let Some(caller) = resolver::resolve(headers, codec) else {
        return RequestIdentity(None);
    };

    let collection = caller.collection();
    match store.find_by_id(collection, caller.id()).await {
        Ok(Some(record)) => RequestIdentity(Some(Identity { caller, record })),
        Ok(None) => {
            tracing::debug!(
                %collection,
                id = %caller.id(),
                "rehydration found no backing record, proceeding as anonymous"
            );
            RequestIdentity(None)
        }
        Err(e) => {
            tracing::debug!(
                %collection,
                id = %caller.id(),
                error = %e,
                "rehydration lookup failed, proceeding as anonymous"
            );
            RequestIdentity(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{COOKIE, HeaderValue};
    use medway_core::Collection;
    use medway_store::testing::FailingStore;
    use medway_store_memory::MemoryDocumentStore;

    fn codec() -> TokenCodec {
        TokenCodec::new("rehydrate-secret", 3600)
    }

    fn headers_for(codec: &TokenCodec, collection: Collection, id: &str) -> HeaderMap {
        let (token, _) = codec.issue(id, collection, None, None).unwrap();
        let cookie = format!("{}={token}", collection.cookie_name().unwrap());
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&cookie).unwrap());
        headers
    }

    #[tokio::test]
    async fn attaches_identity_when_record_exists() {
        let codec = codec();
        let store = MemoryDocumentStore::new();
        let doc = store
            .create(
                Collection::Organisations,
                serde_json::json!({"email": "org@example.com", "name": "Clinic"}),
            )
            .await
            .unwrap();
        let id = doc["id"].as_str().unwrap();
        let store: Arc<dyn DocumentStore> = Arc::new(store);

        let identity = rehydrate(
            &headers_for(&codec, Collection::Organisations, id),
            &codec,
            &store,
        )
        .await;

        let identity = identity.0.expect("identity should attach");
        assert_eq!(identity.caller.id().as_str(), id);
        assert_eq!(identity.record["name"], "Clinic");
    }

    #[tokio::test]
    async fn missing_record_degrades_to_anonymous() {
        let codec = codec();
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());

        let identity = rehydrate(
            &headers_for(&codec, Collection::Doctors, "ghost"),
            &codec,
            &store,
        )
        .await;
        assert!(identity.0.is_none());
    }

    #[tokio::test]
    async fn store_failure_degrades_to_anonymous() {
        let codec = codec();
        let store: Arc<dyn DocumentStore> = Arc::new(FailingStore);

        let identity = rehydrate(
            &headers_for(&codec, Collection::Users, "3"),
            &codec,
            &store,
        )
        .await;
        assert!(identity.0.is_none(), "failures must never escape");
    }
}

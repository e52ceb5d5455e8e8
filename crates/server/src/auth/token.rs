use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use medway_core::{Collection, Role};

/// Session token claims embedded in issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject document id within its collection.
    pub id: String,
    /// The auth collection this token was minted for.
    pub collection: Collection,
    /// Stored role, present only for `users`-collection tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Subject email, echoed for convenience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiry (seconds since epoch).
    pub exp: usize,
}

/// Signs and verifies session tokens with the shared secret.
///
/// This server is also the issuing process, so the true signing key is
/// available and `decode` verifies the HS256 signature and expiry end to
/// end; a token that cannot be verified is treated as absent, never as an
/// error.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: u64,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issue a token for a principal. Returns the token and its expiry
    /// as seconds since epoch.
    pub fn issue(
        &self,
        id: &str,
        collection: Collection,
        role: Option<Role>,
        email: Option<String>,
    ) -> Result<(String, usize), jsonwebtoken::errors::Error> {
        #[allow(clippy::cast_possible_truncation)]
        let exp = jsonwebtoken::get_current_timestamp() as usize + self.ttl_seconds as usize;

        let claims = Claims {
            id: id.to_owned(),
            collection,
            role,
            email,
            exp,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok((token, exp))
    }

    /// Decode and verify a token. Returns `None` for anything that is not
    /// a live, well-formed token signed by this server: bad signature,
    /// expired, garbage input, or an empty subject id.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).ok()?;
        if data.claims.id.is_empty() {
            return None;
        }
        Some(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret", 60)
    }

    #[test]
    fn issue_then_decode_roundtrips_claims() {
        let codec = codec();
        let (token, exp) = codec
            .issue(
                "3",
                Collection::Users,
                Some(Role::Admin),
                Some("admin@example.com".to_owned()),
            )
            .unwrap();

        let claims = codec.decode(&token).expect("fresh token should decode");
        assert_eq!(claims.id, "3");
        assert_eq!(claims.collection, Collection::Users);
        assert_eq!(claims.role, Some(Role::Admin));
        assert_eq!(claims.email.as_deref(), Some("admin@example.com"));
        assert_eq!(claims.exp, exp);
    }

    #[test]
    fn malformed_token_decodes_to_none() {
        assert!(codec().decode("not-a-token").is_none());
        assert!(codec().decode("").is_none());
        assert!(codec().decode("a.b.c").is_none());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let (token, _) = TokenCodec::new("other-secret", 60)
            .issue("3", Collection::Users, None, None)
            .unwrap();
        assert!(codec().decode(&token).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        // jsonwebtoken's default validation applies 60s of leeway.
        let expired = TokenCodec {
            encoding_key: EncodingKey::from_secret(b"test-secret"),
            decoding_key: DecodingKey::from_secret(b"test-secret"),
            ttl_seconds: 0,
        };
        let exp = jsonwebtoken::get_current_timestamp() as usize - 120;
        let claims = Claims {
            id: "3".to_owned(),
            collection: Collection::Doctors,
            role: None,
            email: None,
            exp,
        };
        let token = encode(&Header::default(), &claims, &expired.encoding_key).unwrap();
        assert!(expired.decode(&token).is_none());
    }
}

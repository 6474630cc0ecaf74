//! Core logic for access-token handling.
//!
//! Tokens are HS256 JWTs signed with the secret shared with the account
//! subsystem. `verify` guards every protected request; `issue` exists so
//! operators and tests can mint tokens with the same secret.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use super::{AuthError, Claims, ClaimsUser};

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn issue(&self, user_id: &str, ttl: Duration) -> Result<String, AuthError> {
        let claims = Claims {
            user: ClaimsUser {
                id: user_id.to_string(),
            },
            exp: unix_now().saturating_add(ttl.as_secs()),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                debug!(%err, "rejected access token");
                AuthError::InvalidToken
            })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn issued_token_verifies() {
        let tokens = TokenService::new("secret");
        let token = tokens.issue("5d7a514b5d2c12c7449be045", HOUR).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user.id, "5d7a514b5d2c12c7449be045");
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let token = TokenService::new("other").issue("abc", HOUR).unwrap();

        assert!(matches!(
            TokenService::new("secret").verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new("secret");
        let claims = Claims {
            user: ClaimsUser { id: "abc".into() },
            exp: 1_000,
        };
        let token = encode(&Header::default(), &claims, &tokens.encoding).unwrap();

        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            TokenService::new("secret").verify("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }
}

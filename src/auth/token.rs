// JWT issuing and validation service

use crate::auth::error::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub exp: i64,    // expiration timestamp
    pub iat: i64,    // issued at timestamp
}

/// Token service for JWT operations.
///
/// Stateless: a token is trusted purely on signature and expiry, so a leaked
/// token stays usable until it expires. There is no revocation list.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a TokenService with the signing secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for `subject` expiring `ttl` from now
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify signature and expiry, returning the subject
    pub fn parse(&self, token: &str) -> Result<String, AuthError> {
        self.claims(token).map(|claims| claims.sub)
    }

    /// Verify signature and expiry, returning every claim
    pub fn claims(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken,
                _ => AuthError::InvalidToken,
            })?;

        // jsonwebtoken still accepts exp == now; the token is only valid before exp
        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::ExpiredToken);
        }
        Ok(claims)
    }

    /// Parse `token` and issue a fresh one for the same subject.
    ///
    /// The subject is not looked up again; a deleted user can keep refreshing
    /// for as long as each token is refreshed before it expires.
    pub fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let subject = self.parse(token)?;
        self.issue(&subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "test_secret_key_for_testing_purposes";

    fn test_token_service() -> TokenService {
        TokenService::new(SECRET, Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }

    #[test]
    fn test_issued_token_parses_to_subject() {
        let service = test_token_service();
        let token = service.issue("alice").unwrap();
        assert_eq!(service.parse(&token).unwrap(), "alice");
    }

    #[test]
    fn test_token_expiration_matches_ttl() {
        let service = test_token_service();
        let token = service.issue("alice").unwrap();
        let claims = service.claims(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_token_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: now - 1000,
            exp: now - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.parse(&token), Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn test_negative_ttl_issues_expired_tokens() {
        let service = TokenService::new(SECRET, Duration::seconds(-10));
        let token = service.issue("alice").unwrap();
        assert!(matches!(service.parse(&token), Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn test_token_expiring_this_second_is_rejected() {
        let service = TokenService::new(SECRET, Duration::seconds(0));
        let token = service.issue("alice").unwrap();
        assert!(matches!(service.parse(&token), Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn test_token_signed_with_other_key_is_invalid() {
        let issuer = TokenService::new("secret1", Duration::seconds(60));
        let verifier = TokenService::new("secret2", Duration::seconds(60));

        let token = issuer.issue("alice").unwrap();
        assert!(issuer.parse(&token).is_ok());
        assert!(matches!(verifier.parse(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(matches!(service.parse(""), Err(AuthError::MalformedToken)));
        assert!(matches!(
            service.parse("invalid_token_format"),
            Err(AuthError::MalformedToken)
        ));
        assert!(service.parse("not.a.token").is_err());
        assert!(service
            .parse("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_refresh_keeps_subject_and_does_not_shorten_expiry() {
        let service = test_token_service();
        let token = service.issue("alice").unwrap();
        let refreshed = service.refresh(&token).unwrap();

        let old_claims = service.claims(&token).unwrap();
        let new_claims = service.claims(&refreshed).unwrap();
        assert_eq!(new_claims.sub, "alice");
        assert!(new_claims.exp >= old_claims.exp);
    }

    #[test]
    fn test_refresh_rejects_expired_token() {
        let expired = TokenService::new(SECRET, Duration::seconds(-10))
            .issue("alice")
            .unwrap();
        let service = test_token_service();
        assert!(matches!(
            service.refresh(&expired),
            Err(AuthError::ExpiredToken)
        ));
    }

    proptest! {
        #[test]
        fn prop_issue_then_parse_returns_subject(subject in "[a-zA-Z0-9_]{1,32}") {
            let service = test_token_service();
            let token = service.issue(&subject)?;
            prop_assert_eq!(service.parse(&token)?, subject);
        }

        #[test]
        fn prop_token_lifetime_is_ttl(subject in "[a-z]{1,16}", ttl in 60i64..100_000) {
            let service = TokenService::new(SECRET, Duration::seconds(ttl));
            let claims = service.claims(&service.issue(&subject)?)?;
            prop_assert_eq!(claims.exp - claims.iat, ttl);
        }

        #[test]
        fn prop_random_strings_are_malformed(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(matches!(service.parse(&malformed), Err(AuthError::MalformedToken)));
        }
    }
}

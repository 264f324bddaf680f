//! Bearer credential verification (HS256 JWT signed with the shared secret).
//!
//! Order of checks:
//! - structure + signature (`jsonwebtoken` rejects garbage before looking at claims)
//! - standard time claims (`exp` required, `nbf` if present)
//! - custom claims: fixed issuer, then a usable `profile.login`
//!
//! Only the first failing check is reported.

use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::auth::identity::Identity;

/// The issuer every accepted credential must carry.
pub const SERVICE_ISSUER: &str = "OctoGallery";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("missing bearer credential")]
    MissingCredential,
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired or not yet valid")]
    ExpiredOrNotYetValid,
    #[error("wrong issuer: {found:?}")]
    WrongIssuer { found: String },
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            // A token signed with another algorithm cannot verify against our key either.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::InvalidSignature,
            ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
                Self::ExpiredOrNotYetValid
            }
            _ => Self::MalformedToken(e.to_string()),
        }
    }
}

/// Wire format of the credential payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialClaims {
    // Missing issuer decodes as "" and is reported as a wrong issuer.
    #[serde(default)]
    pub iss: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    pub profile: Identity,
}

/// Debug omits the key.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenValidator {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp"]);
        // issuer is checked by hand so it can be reported separately from standard claims
        validation.iss = None;
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Extract the credential from `Authorization: Bearer <token>` and validate it.
    pub fn validate_headers(&self, headers: &HeaderMap) -> Result<Identity, TokenError> {
        let token = bearer_token(headers)?;
        self.validate(token)
    }

    pub fn validate(&self, token: &str) -> Result<Identity, TokenError> {
        let data =
            jsonwebtoken::decode::<CredentialClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.iss != SERVICE_ISSUER {
            return Err(TokenError::WrongIssuer { found: claims.iss });
        }
        if claims.profile.login.trim().is_empty() {
            return Err(TokenError::MalformedToken("empty profile.login".to_string()));
        }

        Ok(claims.profile)
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenError> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(TokenError::MissingCredential)?;

    let token = auth
        .strip_prefix("Bearer ")
        .ok_or(TokenError::MissingCredential)?;

    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &str = "unit-test-secret";

    fn now() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }

    fn alice() -> Identity {
        Identity {
            login: "alice".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
        }
    }

    fn claims(iss: &str, exp: u64) -> CredentialClaims {
        CredentialClaims {
            iss: iss.to_string(),
            exp,
            nbf: None,
            iat: Some(now()),
            sub: None,
            profile: alice(),
        }
    }

    fn sign(claims: &CredentialClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("sign")
    }

    fn validator() -> TokenValidator {
        TokenValidator::new(SECRET, 0)
    }

    #[test]
    fn valid_token_yields_embedded_identity() {
        let token = sign(&claims(SERVICE_ISSUER, now() + 600), SECRET);
        assert_eq!(validator().validate(&token).unwrap(), alice());
    }

    #[test]
    fn other_issuer_is_wrong_issuer() {
        for iss in ["", "octogallery", "SomebodyElse"] {
            let token = sign(&claims(iss, now() + 600), SECRET);
            let err = validator().validate(&token).unwrap_err();
            assert!(
                matches!(err, TokenError::WrongIssuer { ref found } if found == iss),
                "{iss}: {err:?}"
            );
        }
    }

    #[test]
    fn other_secret_is_invalid_signature() {
        let token = sign(&claims(SERVICE_ISSUER, now() + 600), "not-the-secret");
        assert!(matches!(
            validator().validate(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn other_algorithm_is_invalid_signature() {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims(SERVICE_ISSUER, now() + 600),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            validator().validate(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn expired_and_not_yet_valid() {
        let expired = sign(&claims(SERVICE_ISSUER, now() - 3600), SECRET);
        assert!(matches!(
            validator().validate(&expired),
            Err(TokenError::ExpiredOrNotYetValid)
        ));

        let mut early = claims(SERVICE_ISSUER, now() + 7200);
        early.nbf = Some(now() + 3600);
        let early = sign(&early, SECRET);
        assert!(matches!(
            validator().validate(&early),
            Err(TokenError::ExpiredOrNotYetValid)
        ));
    }

    #[test]
    fn leeway_widens_the_window_up_to_its_value() {
        let lenient = TokenValidator::new(SECRET, 60);

        let just_expired = sign(&claims(SERVICE_ISSUER, now() - 30), SECRET);
        assert_eq!(lenient.validate(&just_expired).unwrap(), alice());

        let long_expired = sign(&claims(SERVICE_ISSUER, now() - 120), SECRET);
        assert!(matches!(
            lenient.validate(&long_expired),
            Err(TokenError::ExpiredOrNotYetValid)
        ));

        let mut almost = claims(SERVICE_ISSUER, now() + 600);
        almost.nbf = Some(now() + 30);
        let almost = sign(&almost, SECRET);
        assert_eq!(lenient.validate(&almost).unwrap(), alice());

        let mut too_early = claims(SERVICE_ISSUER, now() + 600);
        too_early.nbf = Some(now() + 120);
        let too_early = sign(&too_early, SECRET);
        assert!(matches!(
            lenient.validate(&too_early),
            Err(TokenError::ExpiredOrNotYetValid)
        ));
    }

    #[test]
    fn standard_claims_are_checked_before_issuer() {
        let token = sign(&claims("SomebodyElse", now() - 3600), SECRET);
        assert!(matches!(
            validator().validate(&token),
            Err(TokenError::ExpiredOrNotYetValid)
        ));
    }

    #[test]
    fn signature_is_checked_before_time_claims() {
        let token = sign(&claims(SERVICE_ISSUER, now() - 3600), "not-the-secret");
        assert!(matches!(
            validator().validate(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_and_missing_profile_are_malformed() {
        assert!(matches!(
            validator().validate("not.a.jwt"),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(
            validator().validate(""),
            Err(TokenError::MalformedToken(_))
        ));

        #[derive(Serialize)]
        struct NoProfile {
            iss: &'static str,
            exp: u64,
        }
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &NoProfile {
                iss: SERVICE_ISSUER,
                exp: now() + 600,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            validator().validate(&token),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn blank_login_is_malformed() {
        let mut c = claims(SERVICE_ISSUER, now() + 600);
        c.profile.login = "  ".into();
        let token = sign(&c, SECRET);
        assert!(matches!(
            validator().validate(&token),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(TokenError::MissingCredential)
        ));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(
            bearer_token(&headers),
            Err(TokenError::MissingCredential)
        ));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer  abc.def "));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def");
    }

    #[test]
    fn validate_headers_round_trip() {
        let token = sign(&claims(SERVICE_ISSUER, now() + 600), SECRET);
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        assert_eq!(validator().validate_headers(&headers).unwrap().login, "alice");
    }
}

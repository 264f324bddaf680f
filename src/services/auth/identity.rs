/*
 * Responsibility
 * - The trusted identity of the caller, decoded from a verified bearer credential
 * - Lives only for one request (request extensions); never persisted as its own row
 */
use axum::http::{HeaderMap, HeaderName};
use serde::{Deserialize, Serialize};

/// Header names of the legacy identity channel.
///
/// Clients must never be able to set these; the guard strips them from every inbound request.
pub const LOGIN_HEADER: HeaderName = HeaderName::from_static("x-github-login");
pub const NAME_HEADER: HeaderName = HeaderName::from_static("x-github-name");
pub const EMAIL_HEADER: HeaderName = HeaderName::from_static("x-github-email");

pub const IDENTITY_HEADERS: [HeaderName; 3] = [LOGIN_HEADER, NAME_HEADER, EMAIL_HEADER];

/// Embedded `profile` object of the credential.
///
/// - `login` is the tenant key (one gallery per login)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub login: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Remove every identity-bearing header a client may have forged.
pub fn strip_identity_headers(headers: &mut HeaderMap) {
    for name in IDENTITY_HEADERS {
        // drops every value stored under the name, not just the first
        headers.remove(&name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn strips_all_forged_values() {
        let mut headers = HeaderMap::new();
        headers.append("X-GitHub-Login", HeaderValue::from_static("mallory"));
        headers.append("x-github-login", HeaderValue::from_static("mallory-again"));
        headers.insert("X-GitHub-Name", HeaderValue::from_static("Mallory"));
        headers.insert("X-GitHub-Email", HeaderValue::from_static("m@evil.example"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        strip_identity_headers(&mut headers);

        for name in IDENTITY_HEADERS {
            assert!(headers.get(&name).is_none(), "{name} survived");
        }
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn name_and_email_are_optional_in_profile() {
        let identity: Identity = serde_json::from_str(r#"{"login": "alice"}"#).unwrap();
        assert_eq!(identity.login, "alice");
        assert!(identity.name.is_empty());
        assert!(identity.email.is_empty());
    }
}

//! # Admin Credential Verification
//!
//! The admin surface sits behind a [`CredentialVerifier`]. The shipped
//! implementation checks one email/password pair taken from configuration.
//! This is a convenience gate for a single operator, not an identity system.
//!
//! Comparisons go through `subtle` so a mismatch takes the same time
//! wherever the first differing byte is.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::env;
use std::fmt;
use subtle::ConstantTimeEq;
use tracing::warn;

/// Environment variable holding the admin email.
pub const ADMIN_EMAIL_VAR: &str = "BACSPARK_ADMIN_EMAIL";

/// Environment variable holding the admin password.
pub const ADMIN_PASSWORD_VAR: &str = "BACSPARK_ADMIN_PASSWORD";

/// Decides whether an email/password pair grants admin access.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> bool;
}

// =============================================================================
// STATIC CREDENTIALS
// =============================================================================

/// A single configured admin credential.
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Read the credential from `BACSPARK_ADMIN_EMAIL` / `BACSPARK_ADMIN_PASSWORD`.
    ///
    /// Returns `None` (and warns) when either is missing or empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let email = env::var(ADMIN_EMAIL_VAR).ok().filter(|v| !v.trim().is_empty());
        let password = env::var(ADMIN_PASSWORD_VAR).ok().filter(|v| !v.is_empty());

        match (email, password) {
            (Some(email), Some(password)) => Some(Self::new(email.trim(), password)),
            _ => {
                warn!(
                    "{ADMIN_EMAIL_VAR}/{ADMIN_PASSWORD_VAR} not set, admin routes will reject every request"
                );
                None
            }
        }
    }

    /// The configured admin email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialVerifier for AdminCredentials {
    fn verify(&self, email: &str, password: &str) -> bool {
        let email_ok = self.email.as_bytes().ct_eq(email.as_bytes());
        let password_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (email_ok & password_ok).into()
    }
}

/// Verifier used when no admin credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl CredentialVerifier for DenyAll {
    fn verify(&self, _email: &str, _password: &str) -> bool {
        false
    }
}

// =============================================================================
// BASIC AUTH
// =============================================================================

/// Parse an `Authorization: Basic <base64(email:password)>` header value.
#[must_use]
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

/// Build a Basic auth header value. Used by clients and tests.
#[must_use]
pub fn basic_header(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_exact_pair_only() {
        let creds = AdminCredentials::new("admin@example.com", "s3cret");
        assert!(creds.verify("admin@example.com", "s3cret"));
        assert!(!creds.verify("admin@example.com", "s3cre"));
        assert!(!creds.verify("other@example.com", "s3cret"));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn deny_all_rejects_everything() {
        assert!(!DenyAll.verify("admin@example.com", "s3cret"));
    }

    #[test]
    fn basic_header_roundtrips_through_parser() {
        let header = basic_header("admin@example.com", "pa:ss");
        let parsed = parse_basic(&header);
        assert_eq!(
            parsed,
            Some(("admin@example.com".to_string(), "pa:ss".to_string()))
        );
    }

    #[test]
    fn parse_rejects_other_schemes_and_garbage() {
        assert_eq!(parse_basic("Bearer abc"), None);
        assert_eq!(parse_basic("Basic !!!"), None);
        assert_eq!(parse_basic("Basic"), None);
        // "nocolon" base64-encoded
        assert_eq!(parse_basic("Basic bm9jb2xvbg=="), None);
    }

    #[test]
    fn debug_redacts_password() {
        let creds = AdminCredentials::new("admin@example.com", "s3cret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("admin@example.com"));
    }
}

//! HMAC-SHA256 verification for WooCommerce webhook deliveries.
//!
//! WooCommerce signs every delivery with the webhook secret and sends the
//! result in `X-WC-Webhook-Signature` as base64(HMAC-SHA256(secret, body)).
//! Verification recomputes the MAC over the raw body bytes and compares in
//! constant time.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, error, warn};

type HmacSha256 = Hmac<Sha256>;

/// Outcome category of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Signature matches the body under the configured secret
    Verified,
    /// No (or an empty) signature token was supplied
    MissingSignature,
    /// Secret is empty: fail closed, this is a configuration problem
    MissingSecret,
    /// Token is not valid base64 or does not match
    Mismatch,
}

impl VerifyOutcome {
    pub fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::MissingSignature => "missing-header",
            Self::MissingSecret => "missing-secret",
            Self::Mismatch => "mismatch",
        }
    }
}

/// Verifier bound to one shared secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify `body` against `signature` and log the outcome category.
    pub fn verify(&self, body: &[u8], signature: Option<&str>) -> VerifyOutcome {
        let outcome = check(body, signature, &self.secret);
        let category = outcome.as_str();
        match outcome {
            VerifyOutcome::Verified => {
                debug!(outcome = category, "[SIGNATURE] webhook signature verified")
            }
            VerifyOutcome::MissingSignature => {
                warn!(outcome = category, "[SIGNATURE] no signature header received")
            }
            VerifyOutcome::MissingSecret => error!(
                outcome = category,
                "[SIGNATURE] webhook secret is not configured, rejecting delivery"
            ),
            VerifyOutcome::Mismatch => warn!(
                outcome = category,
                body_len = body.len(),
                "[SIGNATURE] webhook signature mismatch"
            ),
        }
        outcome
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Compute the WooCommerce signature of `body`: base64(HMAC-SHA256(secret, body)).
pub fn sign(body: &[u8], secret: &str) -> String {
    let mut mac = new_mac(secret);
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// `true` only when `token` is exactly the signature of `body` under `secret`.
///
/// An empty secret or an empty token never verifies.
pub fn verify(body: &[u8], token: &str, secret: &str) -> bool {
    check(body, Some(token), secret).is_verified()
}

fn check(body: &[u8], signature: Option<&str>, secret: &str) -> VerifyOutcome {
    let token = match signature {
        Some(t) if !t.is_empty() => t,
        _ => return VerifyOutcome::MissingSignature,
    };
    if secret.is_empty() {
        return VerifyOutcome::MissingSecret;
    }

    // Strict standard alphabet with padding: any other spelling of the same
    // bytes is not the token WooCommerce sends.
    let expected = match STANDARD.decode(token) {
        Ok(bytes) => bytes,
        Err(_) => return VerifyOutcome::Mismatch,
    };

    let mut mac = new_mac(secret);
    mac.update(body);
    // verify_slice compares in constant time
    match mac.verify_slice(&expected) {
        Ok(()) => VerifyOutcome::Verified,
        Err(_) => VerifyOutcome::Mismatch,
    }
}

fn new_mac(secret: &str) -> HmacSha256 {
    // HMAC accepts keys of any length, so this never fails
    match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 accepts keys of any size"),
    }
}

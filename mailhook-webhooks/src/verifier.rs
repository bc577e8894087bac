//! Webhook signature verification
//!
//! Verification is a pure function of the payload, the signing headers,
//! the secret and the current time. It performs no I/O and keeps no state,
//! so a single [`WebhookVerifier`] can be shared freely across threads.

use crate::signature::compute_signature;
use crate::{Result, VerificationRequest, WebhookError, WebhookHeaders};
use subtle::ConstantTimeEq;

/// Default tolerance between signing time and verification time
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Verify a webhook delivery against the current wall-clock time.
pub fn verify(request: &VerificationRequest) -> Result<()> {
    WebhookVerifier::default().verify(request)
}

/// Verifies Svix-compatible webhook signatures
#[derive(Debug, Clone, Copy)]
pub struct WebhookVerifier {
    tolerance_secs: u64,
}

impl Default for WebhookVerifier {
    fn default() -> Self {
        Self {
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }
}

impl WebhookVerifier {
    /// Create a verifier with the default 5 minute tolerance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a verifier with a custom tolerance in seconds
    pub fn with_tolerance(tolerance_secs: u64) -> Self {
        Self { tolerance_secs }
    }

    /// Tolerance in seconds
    pub fn tolerance(&self) -> u64 {
        self.tolerance_secs
    }

    /// Verify against the current wall-clock time
    pub fn verify(&self, request: &VerificationRequest) -> Result<()> {
        self.verify_at(request, chrono::Utc::now().timestamp())
    }

    /// Verify against an explicit `now` in Unix seconds
    pub fn verify_at(&self, request: &VerificationRequest, now_secs: i64) -> Result<()> {
        let headers = check_preconditions(request)?;

        let timestamp = parse_timestamp(&headers.timestamp)?;
        self.check_tolerance(timestamp, now_secs)?;

        let key = request.webhook_secret.decode_key()?;
        let expected = compute_signature(&key, &headers.id, &headers.timestamp, &request.payload);

        if matches_any(&headers.signature, &expected) {
            Ok(())
        } else {
            Err(WebhookError::NoMatchingSignature)
        }
    }

    fn check_tolerance(&self, timestamp: i64, now_secs: i64) -> Result<()> {
        let diff = now_secs.saturating_sub(timestamp);
        if diff.unsigned_abs() > self.tolerance_secs {
            return Err(WebhookError::TimestampOutOfTolerance {
                diff,
                tolerance: self.tolerance_secs,
            });
        }
        Ok(())
    }
}

fn check_preconditions(request: &VerificationRequest) -> Result<&WebhookHeaders> {
    if request.payload.is_empty() {
        return Err(WebhookError::MissingPayload);
    }
    if request.webhook_secret.is_empty() {
        return Err(WebhookError::MissingSecret);
    }
    let headers = request
        .headers
        .as_ref()
        .ok_or(WebhookError::MissingHeaders)?;
    if headers.id.is_empty() {
        return Err(WebhookError::MissingId);
    }
    if headers.timestamp.is_empty() {
        return Err(WebhookError::MissingTimestamp);
    }
    if headers.signature.is_empty() {
        return Err(WebhookError::MissingSignature);
    }
    Ok(headers)
}

fn parse_timestamp(timestamp: &str) -> Result<i64> {
    timestamp
        .parse::<i64>()
        .map_err(|_| WebhookError::InvalidTimestamp(timestamp.to_string()))
}

/// Scan `<version>,<signature>` entries for one equal to `expected`.
///
/// Entries without exactly one comma are skipped.
fn matches_any(signature_header: &str, expected: &str) -> bool {
    signature_header
        .split(' ')
        .filter_map(|entry| {
            let (_version, value) = entry.split_once(',')?;
            (!value.contains(',')).then_some(value)
        })
        .any(|value| constant_time_eq(value, expected))
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WebhookSigner;

    const SECRET: &str = "whsec_dGVzdF9zZWNyZXRfa2V5";
    const NOW: i64 = 1_700_000_000;

    fn signed_request(payload: &[u8], timestamp: i64) -> VerificationRequest {
        let signer = WebhookSigner::new(SECRET).unwrap();
        let headers = signer.sign_headers_at("msg_123", timestamp, payload);
        VerificationRequest::new(payload, Some(headers), SECRET)
    }

    #[test]
    fn test_valid_signature() {
        let request = signed_request(b"{\"type\":\"email.sent\"}", NOW);
        assert!(WebhookVerifier::new().verify_at(&request, NOW).is_ok());
    }

    #[test]
    fn test_tampered_payload() {
        let mut request = signed_request(b"{\"email_id\":\"123\"}", NOW);
        request.payload = b"{\"email_id\":\"456\"}".to_vec();

        let result = WebhookVerifier::new().verify_at(&request, NOW);
        assert!(matches!(result, Err(WebhookError::NoMatchingSignature)));
    }

    #[test]
    fn test_tolerance_boundary() {
        let verifier = WebhookVerifier::new();

        let request = signed_request(b"x", NOW - 300);
        assert!(verifier.verify_at(&request, NOW).is_ok());

        let request = signed_request(b"x", NOW + 300);
        assert!(verifier.verify_at(&request, NOW).is_ok());
    }

    #[test]
    fn test_timestamp_too_old() {
        let request = signed_request(b"x", NOW - 301);
        let result = WebhookVerifier::new().verify_at(&request, NOW);
        assert!(matches!(
            result,
            Err(WebhookError::TimestampOutOfTolerance {
                diff: 301,
                tolerance: 300
            })
        ));
    }

    #[test]
    fn test_timestamp_in_future() {
        let request = signed_request(b"x", NOW + 301);
        let result = WebhookVerifier::new().verify_at(&request, NOW);
        assert!(matches!(
            result,
            Err(WebhookError::TimestampOutOfTolerance { diff: -301, .. })
        ));
    }

    #[test]
    fn test_custom_tolerance() {
        let request = signed_request(b"x", NOW - 100);
        let verifier = WebhookVerifier::with_tolerance(60);
        assert_eq!(verifier.tolerance(), 60);
        assert!(verifier.verify_at(&request, NOW).is_err());
    }

    #[test]
    fn test_extreme_timestamp_does_not_overflow() {
        let mut request = signed_request(b"x", NOW);
        if let Some(headers) = request.headers.as_mut() {
            headers.timestamp = i64::MIN.to_string();
        }
        let result = WebhookVerifier::new().verify_at(&request, NOW);
        assert!(matches!(
            result,
            Err(WebhookError::TimestampOutOfTolerance { .. })
        ));
    }

    #[test]
    fn test_invalid_timestamp() {
        let mut request = signed_request(b"x", NOW);
        if let Some(headers) = request.headers.as_mut() {
            headers.timestamp = "not_a_number".to_string();
        }
        let result = WebhookVerifier::new().verify_at(&request, NOW);
        assert!(matches!(result, Err(WebhookError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_precondition_order() {
        let verifier = WebhookVerifier::new();
        let headers = WebhookHeaders::new("msg_1", NOW.to_string(), "v1,abc");

        let request = VerificationRequest::new(Vec::new(), None, "");
        assert!(matches!(
            verifier.verify_at(&request, NOW),
            Err(WebhookError::MissingPayload)
        ));

        let request = VerificationRequest::new(b"x".to_vec(), None, "");
        assert!(matches!(
            verifier.verify_at(&request, NOW),
            Err(WebhookError::MissingSecret)
        ));

        let request = VerificationRequest::new(b"x".to_vec(), None, SECRET);
        assert!(matches!(
            verifier.verify_at(&request, NOW),
            Err(WebhookError::MissingHeaders)
        ));

        let mut h = headers.clone();
        h.id.clear();
        let request = VerificationRequest::new(b"x".to_vec(), Some(h), SECRET);
        assert!(matches!(
            verifier.verify_at(&request, NOW),
            Err(WebhookError::MissingId)
        ));

        let mut h = headers.clone();
        h.timestamp.clear();
        let request = VerificationRequest::new(b"x".to_vec(), Some(h), SECRET);
        assert!(matches!(
            verifier.verify_at(&request, NOW),
            Err(WebhookError::MissingTimestamp)
        ));

        let mut h = headers;
        h.signature.clear();
        let request = VerificationRequest::new(b"x".to_vec(), Some(h), SECRET);
        assert!(matches!(
            verifier.verify_at(&request, NOW),
            Err(WebhookError::MissingSignature)
        ));
    }

    #[test]
    fn test_preconditions_checked_before_secret_decoding() {
        let request = VerificationRequest::new(b"x".to_vec(), None, "whsec_%%%");
        assert!(matches!(
            WebhookVerifier::new().verify_at(&request, NOW),
            Err(WebhookError::MissingHeaders)
        ));
    }

    #[test]
    fn test_secret_decode_failure() {
        let headers = WebhookHeaders::new("msg_1", NOW.to_string(), "v1,abc");
        let request = VerificationRequest::new(b"x".to_vec(), Some(headers), "whsec_%%%");
        assert!(matches!(
            WebhookVerifier::new().verify_at(&request, NOW),
            Err(WebhookError::SecretDecode(_))
        ));
    }

    #[test]
    fn test_multiple_signatures_one_matches() {
        let mut request = signed_request(b"payload", NOW);
        if let Some(headers) = request.headers.as_mut() {
            headers.signature = format!(
                "v1,Zm9vYmFy v1a,bogus,extra nocomma {} v2,YmF6",
                headers.signature
            );
        }
        assert!(WebhookVerifier::new().verify_at(&request, NOW).is_ok());
    }

    #[test]
    fn test_no_matching_among_many() {
        let mut request = signed_request(b"payload", NOW);
        if let Some(headers) = request.headers.as_mut() {
            headers.signature = "v1,Zm9vYmFy garbage v1,a,b , v1,".to_string();
        }
        assert!(matches!(
            WebhookVerifier::new().verify_at(&request, NOW),
            Err(WebhookError::NoMatchingSignature)
        ));
    }

    #[test]
    fn test_entry_with_extra_comma_is_skipped() {
        let mut request = signed_request(b"payload", NOW);
        if let Some(headers) = request.headers.as_mut() {
            let valid = headers.signature.clone();
            // Same signature value, but the entry has two commas
            headers.signature = format!("{},v1", valid);
        }
        assert!(matches!(
            WebhookVerifier::new().verify_at(&request, NOW),
            Err(WebhookError::NoMatchingSignature)
        ));
    }

    #[test]
    fn test_version_tag_not_interpreted() {
        let mut request = signed_request(b"payload", NOW);
        if let Some(headers) = request.headers.as_mut() {
            headers.signature = headers.signature.replacen("v1,", "v9,", 1);
        }
        assert!(WebhookVerifier::new().verify_at(&request, NOW).is_ok());
    }

    #[test]
    fn test_wrong_secret() {
        let mut request = signed_request(b"payload", NOW);
        request.webhook_secret = crate::WebhookSecret::from_key_bytes(b"other_key");
        assert!(matches!(
            WebhookVerifier::new().verify_at(&request, NOW),
            Err(WebhookError::NoMatchingSignature)
        ));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "ab"));
        assert!(!constant_time_eq("", "a"));
    }

    #[test]
    fn test_verify_uses_wall_clock() {
        let signer = WebhookSigner::new(SECRET).unwrap();
        let headers = signer.sign_headers(b"payload");
        let request = VerificationRequest::new(b"payload".to_vec(), Some(headers), SECRET);
        assert!(verify(&request).is_ok());
    }
}

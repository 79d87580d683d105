//! Billing webhook signature verification.
//!
//! Verifies inbound event deliveries with HMAC-SHA256 over the signed
//! payload, with timestamp validation to reject replays.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::BillingError;
use super::event::BillingEvent;

/// Maximum allowed age for event deliveries (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future timestamps (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the signature header.
///
/// Format: `t=<timestamp>,v1=<hex signature>`. Unknown fields are
/// ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// v1 signature (HMAC-SHA256).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a signature header string.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::ParseError` if the header is malformed or
    /// the timestamp or v1 signature is missing.
    pub fn parse(header: &str) -> Result<Self, BillingError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| BillingError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(
                        value
                            .parse()
                            .map_err(|_| BillingError::ParseError("invalid timestamp".to_string()))?,
                    );
                }
                "v1" => {
                    v1_signature = Some(hex::decode(value).map_err(|_| {
                        BillingError::ParseError("invalid v1 signature hex".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| BillingError::ParseError("missing timestamp".to_string()))?;
        let v1_signature = v1_signature
            .ok_or_else(|| BillingError::ParseError("missing v1 signature".to_string()))?;

        Ok(SignatureHeader {
            timestamp,
            v1_signature,
        })
    }
}

/// Verifier for billing webhook signatures.
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    /// Creates a verifier with the endpoint's signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature and parses the event payload.
    ///
    /// Steps: parse the header, validate the timestamp window, compute
    /// the expected HMAC, compare in constant time, then deserialize.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` if the HMAC does not match
    /// - `TimestampOutOfRange` if the delivery is older than 5 minutes
    /// - `InvalidTimestamp` if the timestamp is in the future
    /// - `ParseError` for a malformed header or payload
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<BillingEvent, BillingError> {
        let header = SignatureHeader::parse(signature_header)?;

        validate_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        if !constant_time_compare(&expected, &header.v1_signature) {
            return Err(BillingError::InvalidSignature);
        }

        let event: BillingEvent = serde_json::from_slice(payload)
            .map_err(|e| BillingError::ParseError(e.to_string()))?;

        Ok(event)
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));

        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Validates that the timestamp is within the acceptable window.
fn validate_timestamp(timestamp: i64) -> Result<(), BillingError> {
    let now = chrono::Utc::now().timestamp();
    let age = now - timestamp;

    if age > MAX_EVENT_AGE_SECS {
        return Err(BillingError::TimestampOutOfRange);
    }
    if age < -MAX_CLOCK_SKEW_SECS {
        return Err(BillingError::InvalidTimestamp);
    }

    Ok(())
}

/// Constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a hex HMAC-SHA256 signature for use in test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, timestamp: i64, payload: &str) -> String {
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(signed_payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";

    // ══════════════════════════════════════════════════════════════
    // SignatureHeader Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_v1() {
        let signature = "a".repeat(64);
        let header_str = format!("t=1234567890,v1={}", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signature.len(), 32);
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let signature = "a".repeat(64);
        let header_str = format!("t=1234567890,v1={},v2=future,scheme=hmac", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signature.len(), 32);
    }

    #[test]
    fn parse_header_missing_timestamp_fails() {
        let header_str = format!("v1={}", "a".repeat(64));
        let result = SignatureHeader::parse(&header_str);
        assert!(matches!(result, Err(BillingError::ParseError(_))));
    }

    #[test]
    fn parse_header_missing_v1_fails() {
        let result = SignatureHeader::parse("t=1234567890");
        assert!(matches!(result, Err(BillingError::ParseError(_))));
    }

    #[test]
    fn parse_header_invalid_timestamp_fails() {
        let header_str = format!("t=not_a_number,v1={}", "a".repeat(64));
        let result = SignatureHeader::parse(&header_str);
        assert!(matches!(result, Err(BillingError::ParseError(_))));
    }

    #[test]
    fn parse_header_invalid_hex_fails() {
        let result = SignatureHeader::parse("t=1234567890,v1=not_valid_hex");
        assert!(matches!(result, Err(BillingError::ParseError(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    fn valid_payload() -> String {
        serde_json::json!({
            "id": "evt_test123",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": {} },
            "livemode": false
        })
        .to_string()
    }

    #[test]
    fn verify_valid_signature() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let payload = valid_payload();
        let timestamp = chrono::Utc::now().timestamp();
        let signature = compute_test_signature(TEST_SECRET, timestamp, &payload);
        let header = format!("t={},v1={}", timestamp, signature);

        let event = verifier.verify_and_parse(payload.as_bytes(), &header).unwrap();

        assert_eq!(event.id.as_str(), "evt_test123");
    }

    #[test]
    fn verify_invalid_signature_fails() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let payload = valid_payload();
        let timestamp = chrono::Utc::now().timestamp();
        let header = format!("t={},v1={}", timestamp, "a".repeat(64));

        let result = verifier.verify_and_parse(payload.as_bytes(), &header);

        assert!(matches!(result, Err(BillingError::InvalidSignature)));
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let verifier = SignatureVerifier::new("wrong_secret");
        let payload = valid_payload();
        let timestamp = chrono::Utc::now().timestamp();
        let signature = compute_test_signature(TEST_SECRET, timestamp, &payload);
        let header = format!("t={},v1={}", timestamp, signature);

        let result = verifier.verify_and_parse(payload.as_bytes(), &header);

        assert!(matches!(result, Err(BillingError::InvalidSignature)));
    }

    #[test]
    fn verify_tampered_payload_fails() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let original = valid_payload();
        let tampered = original.replace("evt_test123", "evt_hacked");
        let timestamp = chrono::Utc::now().timestamp();
        let signature = compute_test_signature(TEST_SECRET, timestamp, &original);
        let header = format!("t={},v1={}", timestamp, signature);

        let result = verifier.verify_and_parse(tampered.as_bytes(), &header);

        assert!(matches!(result, Err(BillingError::InvalidSignature)));
    }

    // ══════════════════════════════════════════════════════════════
    // Timestamp Validation Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn timestamp_within_range_succeeds() {
        let timestamp = chrono::Utc::now().timestamp() - 120;
        assert!(validate_timestamp(timestamp).is_ok());
    }

    #[test]
    fn timestamp_too_old_fails() {
        let timestamp = chrono::Utc::now().timestamp() - 600;
        assert!(matches!(
            validate_timestamp(timestamp),
            Err(BillingError::TimestampOutOfRange)
        ));
    }

    #[test]
    fn timestamp_at_boundary_succeeds() {
        let timestamp = chrono::Utc::now().timestamp() - 300;
        assert!(validate_timestamp(timestamp).is_ok());
    }

    #[test]
    fn timestamp_just_past_boundary_fails() {
        let timestamp = chrono::Utc::now().timestamp() - 301;
        assert!(matches!(
            validate_timestamp(timestamp),
            Err(BillingError::TimestampOutOfRange)
        ));
    }

    #[test]
    fn timestamp_from_future_within_skew_succeeds() {
        let timestamp = chrono::Utc::now().timestamp() + 30;
        assert!(validate_timestamp(timestamp).is_ok());
    }

    #[test]
    fn timestamp_from_future_beyond_skew_fails() {
        let timestamp = chrono::Utc::now().timestamp() + 120;
        assert!(matches!(
            validate_timestamp(timestamp),
            Err(BillingError::InvalidTimestamp)
        ));
    }

    // ══════════════════════════════════════════════════════════════
    // Payload Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_invalid_json_fails() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let payload = "not valid json";
        let timestamp = chrono::Utc::now().timestamp();
        let signature = compute_test_signature(TEST_SECRET, timestamp, payload);
        let header = format!("t={},v1={}", timestamp, signature);

        let result = verifier.verify_and_parse(payload.as_bytes(), &header);

        assert!(matches!(result, Err(BillingError::ParseError(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
    }

    #[test]
    fn constant_time_compare_different_values() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 4]));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
    }
}

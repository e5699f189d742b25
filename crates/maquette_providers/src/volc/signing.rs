//! Canonical-request HMAC signing for the visual API.
//!
//! The scheme hashes a canonical rendering of the request, derives a scoped
//! signing key by nesting HMAC over date, region, service, and the literal
//! `request`, and signs a string-to-sign binding the timestamp and scope to
//! the canonical hash.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use maquette_error::{MaquetteResult, ProviderError, ProviderErrorKind};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Signature algorithm label used in the authorization header.
pub const ALGORITHM: &str = "HMAC-SHA256";

/// Headers covered by the signature, in canonical order.
pub const SIGNED_HEADERS: &str = "content-type;host;x-content-sha256;x-date";

/// Everything the signer needs to know about one request.
#[derive(Debug, Clone)]
pub struct SigningRequest<'a> {
    /// HTTP method
    pub method: &'a str,
    /// URL path
    pub path: &'a str,
    /// Raw query string, already in canonical key order
    pub query: &'a str,
    /// Target host
    pub host: &'a str,
    /// Content type of the payload
    pub content_type: &'a str,
    /// Credential scope region
    pub region: &'a str,
    /// Credential scope service
    pub service: &'a str,
    /// Request body bytes
    pub payload: &'a [u8],
    /// Signing time; also sent as the `X-Date` header
    pub timestamp: DateTime<Utc>,
}

/// The three headers the caller must attach to the signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
    /// `X-Date` value in basic ISO-8601 form
    pub x_date: String,
    /// `X-Content-Sha256` hex digest of the payload
    pub x_content_sha256: String,
    /// Complete `Authorization` header value
    pub authorization: String,
}

/// Sign a request with the given key pair.
///
/// # Errors
///
/// Returns a signing error if HMAC key initialization fails.
pub fn sign_request(
    request: &SigningRequest<'_>,
    access_key: &str,
    secret_key: &str,
) -> MaquetteResult<SignatureHeaders> {
    let x_date = request.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let short_date = &x_date[..8];
    let payload_hash = sha256_hex(request.payload);

    let canonical_headers = format!(
        "content-type:{}\nhost:{}\nx-content-sha256:{}\nx-date:{}\n",
        request.content_type, request.host, payload_hash, x_date
    );
    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method, request.path, request.query, canonical_headers, SIGNED_HEADERS,
        payload_hash
    );

    let scope = format!("{}/{}/{}/request", short_date, request.region, request.service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        x_date,
        scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let date_key = hmac_sha256(secret_key.as_bytes(), short_date.as_bytes())?;
    let region_key = hmac_sha256(&date_key, request.region.as_bytes())?;
    let service_key = hmac_sha256(&region_key, request.service.as_bytes())?;
    let signing_key = hmac_sha256(&service_key, b"request")?;
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, access_key, scope, SIGNED_HEADERS, signature
    );

    Ok(SignatureHeaders {
        x_date,
        x_content_sha256: payload_hash,
        authorization,
    })
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> MaquetteResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ProviderError::new(ProviderErrorKind::Signing(e.to_string())))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_request(payload: &[u8]) -> SigningRequest<'_> {
        SigningRequest {
            method: "POST",
            path: "/",
            query: "Action=CVProcess&Version=2022-08-31",
            host: "visual.volcengineapi.com",
            content_type: "application/json",
            region: "cn-north-1",
            service: "cv",
            payload,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    #[test]
    fn signing_is_deterministic() {
        let request = fixed_request(b"{\"prompt\":\"a red cube\"}");
        let a = sign_request(&request, "AK", "SK").unwrap();
        let b = sign_request(&request, "AK", "SK").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signature_binds_the_payload() {
        let a = sign_request(&fixed_request(b"{\"prompt\":\"a\"}"), "AK", "SK").unwrap();
        let b = sign_request(&fixed_request(b"{\"prompt\":\"b\"}"), "AK", "SK").unwrap();
        assert_ne!(a.authorization, b.authorization);
        assert_ne!(a.x_content_sha256, b.x_content_sha256);
    }

    #[test]
    fn authorization_carries_the_credential_scope() {
        let headers = sign_request(&fixed_request(b"{}"), "AK", "SK").unwrap();
        assert!(
            headers
                .authorization
                .starts_with("HMAC-SHA256 Credential=AK/20260314/cn-north-1/cv/request,")
        );
        assert!(headers.authorization.contains(SIGNED_HEADERS));
    }

    #[test]
    fn x_date_uses_basic_iso_form() {
        let headers = sign_request(&fixed_request(b"{}"), "AK", "SK").unwrap();
        assert_eq!(headers.x_date, "20260314T092653Z");
    }

    #[test]
    fn secret_changes_the_signature_only() {
        let request = fixed_request(b"{}");
        let a = sign_request(&request, "AK", "SK1").unwrap();
        let b = sign_request(&request, "AK", "SK2").unwrap();
        assert_eq!(a.x_date, b.x_date);
        assert_eq!(a.x_content_sha256, b.x_content_sha256);
        assert_ne!(a.authorization, b.authorization);
    }
}

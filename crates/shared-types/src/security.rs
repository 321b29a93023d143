//! # Report Signing
//!
//! The single, authoritative implementation of supply-report signing and
//! verification. Every oracle signer and every verifier uses the same code
//! path, so signing policy changes propagate everywhere at once.
//!
//! ## Security Properties
//!
//! - **HMAC-SHA256 Signatures**: Reports are signed with per-signer shared
//!   secrets.
//! - **Constant-Time Verification**: Tag comparison cannot leak prefix
//!   length through timing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// A 32-byte HMAC-SHA256 tag over the canonical report bytes.
pub type ReportSignature = [u8; 32];

/// Sign canonical report bytes with a signer's shared secret.
pub fn sign_report(report_bytes: &[u8], shared_secret: &[u8]) -> ReportSignature {
    let mut mac =
        HmacSha256::new_from_slice(shared_secret).expect("HMAC can take key of any size");
    mac.update(report_bytes);

    let mut signature = [0u8; 32];
    signature.copy_from_slice(&mac.finalize().into_bytes());
    signature
}

/// Verify an HMAC-SHA256 signature over canonical report bytes.
///
/// Returns `true` only if the tag was produced with `shared_secret` over
/// exactly `report_bytes`. Comparison is constant-time.
pub fn verify_report(
    report_bytes: &[u8],
    signature: &ReportSignature,
    shared_secret: &[u8],
) -> bool {
    let mut mac = match HmacSha256::new_from_slice(shared_secret) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(report_bytes);

    // Constant-time comparison
    mac.verify_slice(signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signer-secret";

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let bytes = b"chain=ethereum total=1000 locked=100 nonce=7";
        let sig = sign_report(bytes, SECRET);
        assert!(verify_report(bytes, &sig, SECRET));
    }

    #[test]
    fn test_verify_rejects_tampered_bytes() {
        let sig = sign_report(b"total=1000", SECRET);
        assert!(!verify_report(b"total=9999", &sig, SECRET));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let sig = sign_report(b"total=1000", SECRET);
        assert!(!verify_report(b"total=1000", &sig, b"other-secret"));
    }

    #[test]
    fn test_verify_rejects_tampered_signature() {
        let mut sig = sign_report(b"total=1000", SECRET);
        sig[0] ^= 0xFF;
        assert!(!verify_report(b"total=1000", &sig, SECRET));
    }
}

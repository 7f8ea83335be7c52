//! Oracle Signature Verification
//!
//! Ed25519 verification of pricing-record signatures against the
//! PEM-encoded (SPKI) public key registered for a network. A fresh
//! verifier is built for every call, so nothing cryptographic is shared
//! between concurrent block-validation threads, and all resources are
//! plain values released on every exit path.

use crate::{Error, Result};
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{DecodePublicKey, EncodePublicKey};
use ed25519_dalek::{Signature as Ed25519Signature, Signer, SigningKey, Verifier, VerifyingKey};
use tracing::debug;

/// Byte length of an oracle signature.
pub const SIGNATURE_SIZE: usize = 64;

/// Parse a PEM-encoded (SPKI) Ed25519 public key.
///
/// An empty string is a deployment error: run this at config load so a
/// misconfigured node fails at startup, not per record.
pub fn public_key_from_pem(pem: &str) -> Result<VerifyingKey> {
    if pem.trim().is_empty() {
        return Err(Error::Config("empty oracle public key".into()));
    }
    VerifyingKey::from_public_key_pem(pem)
        .map_err(|e| Error::Config(format!("unparsable oracle public key: {}", e)))
}

/// Encode a public key back to its PEM (SPKI) form.
pub fn public_key_to_pem(key: &VerifyingKey) -> Result<String> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| Error::Crypto(format!("public key encoding failed: {}", e)))
}

/// Verify `signature` over `message` against a PEM-encoded public key.
///
/// Every failure mode — unusable key material, signature mismatch —
/// collapses to a single crypto error; the underlying detail is logged
/// for diagnostics only and never becomes consensus state.
pub fn verify_signature(
    public_key_pem: &str,
    message: &[u8],
    signature: &[u8; SIGNATURE_SIZE],
) -> Result<()> {
    let key = match public_key_from_pem(public_key_pem) {
        Ok(key) => key,
        Err(e) => {
            debug!("oracle public key unusable: {}", e);
            return Err(Error::Crypto("signature verification failed".into()));
        }
    };

    let sig = Ed25519Signature::from_bytes(signature);
    key.verify(message, &sig).map_err(|e| {
        debug!("oracle signature rejected: {}", e);
        Error::Crypto("signature verification failed".into())
    })
}

/// Sign `message`, returning the raw 64-byte signature.
///
/// The validator never signs; this exists for tests and offline oracle
/// tooling.
pub fn sign_message(signing_key: &SigningKey, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
    signing_key.sign(message).to_bytes()
}

//! Cryptographic Primitives

pub mod signatures;

pub use signatures::{public_key_from_pem, sign_message, verify_signature, SIGNATURE_SIZE};

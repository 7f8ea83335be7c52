//! Oracle Pricing Record - Core Library
//!
//! Validation and consensus serialization for the oracle-signed pricing
//! record embedded in each block of the chain. The record carries a spot
//! price and a moving average for the tracked asset; block validation
//! accepts or rejects it deterministically, so every byte-level decision
//! here is consensus-critical.
//!
//! ## Modules
//!
//! - `oracle`: the pricing record and the auxiliary supply/asset blobs
//! - `crypto`: Ed25519 verification of oracle signatures (PEM public keys)
//! - `consensus`: block-level acceptance rules for pricing records
//! - `config`: per-network oracle parameters
//! - `serialization`: length-prefixed wire blobs with exact sizes
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: validation depends only on the supplied block
//!   context, never on the wall clock
//! - **Stateless**: every call is independent and safe to issue from
//!   concurrent block-validation threads
//! - **Explicit layout**: wire bytes are written field-by-field in
//!   little-endian order, never by reinterpreting struct memory

pub mod config;
pub mod consensus;
pub mod crypto;
pub mod oracle;
pub mod serialization;

// Re-exports for convenience
pub use config::{get_config, Network, NetworkConfig};
pub use consensus::validator::{RecordValidator, ValidationResult};
pub use crypto::{public_key_from_pem, verify_signature};
pub use oracle::{AssetData, PricingRecord, SupplyData};
pub use serialization::{BlobReader, BlobWriter};

/// Protocol constants
pub mod constants {
    /// Hard fork that activates on-chain conversions. Blocks before it
    /// must carry an empty pricing record.
    pub const HF_VERSION_CONVERSION: u32 = 6;

    /// Seconds a pricing record timestamp may lead its block timestamp.
    pub const PRICING_RECORD_MAX_FUTURE_SKEW: u64 = 120;

    /// Wire size of a pricing record (four u64 fields + 64-byte signature).
    pub const PRICING_RECORD_SIZE: usize = 96;

    /// Wire size of the circulating-supply blob.
    pub const SUPPLY_DATA_SIZE: usize = 32;

    /// Wire size of the per-asset quote blob.
    pub const ASSET_DATA_SIZE: usize = 16;
}

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

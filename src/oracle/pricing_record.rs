//! Oracle Pricing Record
//!
//! The oracle-signed snapshot of the tracked asset's spot price and moving
//! average that every block carries once conversions are active. Two
//! encodings coexist and must not be confused:
//!
//! - the consensus wire form: a fixed 96-byte little-endian layout,
//!   transported as an opaque length-prefixed blob
//! - the key/value (API) form: a serde map with the signature rendered as
//!   a 128-character lowercase hex string

use crate::constants::PRICING_RECORD_SIZE;
use crate::crypto::signatures::SIGNATURE_SIZE;
use crate::serialization::{read_u64_le, BlobReader, BlobWriter};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Oracle-signed price snapshot embedded in a block.
///
/// The all-zero value is the "empty" sentinel meaning no quote was
/// attached this block. A zero `spot` or `moving_average` in a non-empty
/// record marks that rate as absent.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PricingRecord {
    /// Record schema/policy version (KV key `pr_version`).
    pub version: u64,
    /// Fixed-point spot price of the tracked asset. 0 = absent.
    pub spot: u64,
    /// Fixed-point smoothed price. 0 = absent.
    pub moving_average: u64,
    /// Unix time the oracle produced the quote.
    pub timestamp: u64,
    /// Raw Ed25519 signature over [`signing_message`](Self::signing_message).
    pub signature: [u8; SIGNATURE_SIZE],
}

impl Default for PricingRecord {
    fn default() -> Self {
        Self {
            version: 0,
            spot: 0,
            moving_average: 0,
            timestamp: 0,
            signature: [0u8; SIGNATURE_SIZE],
        }
    }
}

impl PricingRecord {
    /// Construct a record from its parts.
    pub fn new(
        version: u64,
        spot: u64,
        moving_average: u64,
        timestamp: u64,
        signature: [u8; SIGNATURE_SIZE],
    ) -> Self {
        Self {
            version,
            spot,
            moving_average,
            timestamp,
            signature,
        }
    }

    /// Exact comparison of all four numeric fields and every signature byte.
    pub fn equal(&self, other: &PricingRecord) -> bool {
        self.version == other.version
            && self.spot == other.spot
            && self.moving_average == other.moving_average
            && self.timestamp == other.timestamp
            && self.signature == other.signature
    }

    /// True for the all-zero sentinel ("no quote this block").
    pub fn empty(&self) -> bool {
        self.equal(&PricingRecord::default())
    }

    /// A non-empty record must quote both rates.
    pub fn has_missing_rates(&self) -> bool {
        self.spot == 0 || self.moving_average == 0
    }

    /// The exact byte sequence the oracle signature covers.
    ///
    /// Field order, names, and the absence of whitespace are
    /// consensus-critical; the string is built by hand so no formatting
    /// library can perturb it.
    pub fn signing_message(&self) -> String {
        format!(
            "{{\"pr_version\":{},\"spot\":{},\"moving_average\":{},\"timestamp\":{}}}",
            self.version, self.spot, self.moving_average, self.timestamp
        )
    }

    /// Signature as the 128-character lowercase hex used at API boundaries.
    pub fn signature_hex(&self) -> String {
        hex::encode(self.signature)
    }

    /// Replace the signature from its hex form.
    ///
    /// Rejects odd-length, non-hex, and wrong-length input outright rather
    /// than truncating.
    pub fn set_signature_hex(&mut self, sig_hex: &str) -> Result<()> {
        let bytes = hex::decode(sig_hex)
            .map_err(|e| Error::InvalidInput(format!("signature is not valid hex: {}", e)))?;
        if bytes.len() != SIGNATURE_SIZE {
            return Err(Error::InvalidInput(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_SIZE,
                bytes.len()
            )));
        }
        self.signature.copy_from_slice(&bytes);
        Ok(())
    }

    /// Fixed little-endian wire layout: version, spot, moving average,
    /// timestamp, then the raw signature bytes.
    pub fn to_bytes(&self) -> [u8; PRICING_RECORD_SIZE] {
        let mut buf = [0u8; PRICING_RECORD_SIZE];
        buf[..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..16].copy_from_slice(&self.spot.to_le_bytes());
        buf[16..24].copy_from_slice(&self.moving_average.to_le_bytes());
        buf[24..32].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[32..].copy_from_slice(&self.signature);
        buf
    }

    /// Rebuild a record from its wire layout.
    pub fn from_bytes(bytes: &[u8; PRICING_RECORD_SIZE]) -> Self {
        let mut signature = [0u8; SIGNATURE_SIZE];
        signature.copy_from_slice(&bytes[32..]);
        Self {
            version: read_u64_le(&bytes[..8]),
            spot: read_u64_le(&bytes[8..16]),
            moving_average: read_u64_le(&bytes[16..24]),
            timestamp: read_u64_le(&bytes[24..32]),
            signature,
        }
    }

    /// Write as an opaque length-prefixed wire blob.
    pub fn write_wire(&self, w: &mut BlobWriter) {
        w.write_blob(&self.to_bytes());
    }

    /// Decode from a wire blob. Fails cleanly when fewer than
    /// [`PRICING_RECORD_SIZE`] bytes remain.
    pub fn read_wire(r: &mut BlobReader<'_>) -> Result<Self> {
        let blob = r.read_blob(PRICING_RECORD_SIZE)?;
        let mut bytes = [0u8; PRICING_RECORD_SIZE];
        bytes.copy_from_slice(blob);
        Ok(Self::from_bytes(&bytes))
    }
}

impl fmt::Debug for PricingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingRecord")
            .field("version", &self.version)
            .field("spot", &self.spot)
            .field("moving_average", &self.moving_average)
            .field("timestamp", &self.timestamp)
            .field("signature", &hex::encode(&self.signature[..8]))
            .finish()
    }
}

/// Key/value form exchanged with external callers (RPC, status reports).
/// Field order here fixes the serialized key order.
#[derive(Serialize, Deserialize)]
struct PricingRecordForm {
    pr_version: u64,
    spot: u64,
    moving_average: u64,
    timestamp: u64,
    signature: String,
}

impl Serialize for PricingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PricingRecordForm {
            pr_version: self.version,
            spot: self.spot,
            moving_average: self.moving_average,
            timestamp: self.timestamp,
            signature: self.signature_hex(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PricingRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let form = PricingRecordForm::deserialize(deserializer)?;
        let mut record = PricingRecord {
            version: form.pr_version,
            spot: form.spot,
            moving_average: form.moving_average,
            timestamp: form.timestamp,
            signature: [0u8; SIGNATURE_SIZE],
        };
        record
            .set_signature_hex(&form.signature)
            .map_err(serde::de::Error::custom)?;
        Ok(record)
    }
}

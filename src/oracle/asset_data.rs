//! Auxiliary Oracle Blobs
//!
//! Fixed-layout supply and per-asset data attached alongside the pricing
//! record. This crate never interprets the counters; it only guarantees a
//! byte-identical round trip through the wire form.

use crate::constants::{ASSET_DATA_SIZE, SUPPLY_DATA_SIZE};
use crate::serialization::{read_u64_le, BlobReader, BlobWriter};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Circulating-supply counters for the block (opaque 32-byte layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupplyData {
    pub coin: u64,
    pub stable: u64,
    pub reserve: u64,
    pub yield_shares: u64,
}

impl SupplyData {
    /// Fixed little-endian wire layout.
    pub fn to_bytes(&self) -> [u8; SUPPLY_DATA_SIZE] {
        let mut buf = [0u8; SUPPLY_DATA_SIZE];
        buf[..8].copy_from_slice(&self.coin.to_le_bytes());
        buf[8..16].copy_from_slice(&self.stable.to_le_bytes());
        buf[16..24].copy_from_slice(&self.reserve.to_le_bytes());
        buf[24..].copy_from_slice(&self.yield_shares.to_le_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8; SUPPLY_DATA_SIZE]) -> Self {
        Self {
            coin: read_u64_le(&bytes[..8]),
            stable: read_u64_le(&bytes[8..16]),
            reserve: read_u64_le(&bytes[16..24]),
            yield_shares: read_u64_le(&bytes[24..]),
        }
    }

    /// Write as an opaque length-prefixed wire blob.
    pub fn write_wire(&self, w: &mut BlobWriter) {
        w.write_blob(&self.to_bytes());
    }

    /// Decode from a wire blob; fails cleanly on short input.
    pub fn read_wire(r: &mut BlobReader<'_>) -> Result<Self> {
        let blob = r.read_blob(SUPPLY_DATA_SIZE)?;
        let mut bytes = [0u8; SUPPLY_DATA_SIZE];
        bytes.copy_from_slice(blob);
        Ok(Self::from_bytes(&bytes))
    }
}

/// Spot and moving-average quote for one tracked asset (opaque 16-byte
/// layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetData {
    pub spot: u64,
    pub moving_average: u64,
}

impl AssetData {
    /// Fixed little-endian wire layout.
    pub fn to_bytes(&self) -> [u8; ASSET_DATA_SIZE] {
        let mut buf = [0u8; ASSET_DATA_SIZE];
        buf[..8].copy_from_slice(&self.spot.to_le_bytes());
        buf[8..].copy_from_slice(&self.moving_average.to_le_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8; ASSET_DATA_SIZE]) -> Self {
        Self {
            spot: read_u64_le(&bytes[..8]),
            moving_average: read_u64_le(&bytes[8..]),
        }
    }

    /// Write as an opaque length-prefixed wire blob.
    pub fn write_wire(&self, w: &mut BlobWriter) {
        w.write_blob(&self.to_bytes());
    }

    /// Decode from a wire blob; fails cleanly on short input.
    pub fn read_wire(r: &mut BlobReader<'_>) -> Result<Self> {
        let blob = r.read_blob(ASSET_DATA_SIZE)?;
        let mut bytes = [0u8; ASSET_DATA_SIZE];
        bytes.copy_from_slice(blob);
        Ok(Self::from_bytes(&bytes))
    }
}

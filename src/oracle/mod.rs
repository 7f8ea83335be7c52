//! Oracle Data Carried in Blocks

pub mod asset_data;
pub mod pricing_record;

pub use asset_data::{AssetData, SupplyData};
pub use pricing_record::PricingRecord;

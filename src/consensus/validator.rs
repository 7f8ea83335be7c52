//! Pricing Record Validation
//!
//! Block-level acceptance rules for the oracle pricing record. The
//! decision sequence short-circuits on the first failure:
//!
//! 1. Before the conversion hard fork the record must be empty
//! 2. An empty record is always acceptable once the fork is active
//! 3. A non-empty record must quote both rates
//! 4. The oracle signature must verify against the network's key
//! 5. The record timestamp must not lead the block by more than the skew
//! 6. The record timestamp must strictly follow the previous block's
//!
//! Structural checks run before the asymmetric-crypto verification, and
//! crypto runs before the timestamp checks so timestamp policy cannot be
//! probed without a valid signature. The verdict is a pure function of
//! the arguments; the wall clock is never consulted.

use crate::config::{get_config, Network, NetworkConfig};
use crate::constants::{HF_VERSION_CONVERSION, PRICING_RECORD_MAX_FUTURE_SKEW};
use crate::crypto::signatures::verify_signature;
use crate::oracle::PricingRecord;
use tracing::warn;

/// Outcome of a consensus check.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Record is acceptable
    Valid,
    /// Record must be rejected, with a diagnostic reason
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Validates pricing records against one network's parameters.
pub struct RecordValidator<'a> {
    config: &'a NetworkConfig,
    /// Seconds a record may lead the block timestamp.
    max_future_skew: u64,
}

impl<'a> RecordValidator<'a> {
    pub fn new(config: &'a NetworkConfig) -> Self {
        Self {
            config,
            max_future_skew: PRICING_RECORD_MAX_FUTURE_SKEW,
        }
    }

    /// Built-in parameters for `network`.
    pub fn for_network(network: Network) -> Self {
        Self::new(get_config(network))
    }

    /// Decide acceptance of `record` in a block with `block_timestamp`
    /// whose predecessor carried `prev_block_timestamp`.
    pub fn validate(
        &self,
        record: &PricingRecord,
        hf_version: u32,
        block_timestamp: u64,
        prev_block_timestamp: u64,
    ) -> ValidationResult {
        // Blocks before the conversion fork carry no pricing record.
        if hf_version < HF_VERSION_CONVERSION && !record.empty() {
            warn!(
                network = %self.config.network,
                hf_version,
                "pricing record present before conversion fork"
            );
            return ValidationResult::Invalid(
                "pricing record present before conversion fork".into(),
            );
        }

        // "No quote this block" is always acceptable.
        if record.empty() {
            return ValidationResult::Valid;
        }

        if record.has_missing_rates() {
            warn!("pricing record has missing rates");
            return ValidationResult::Invalid("pricing record has missing rates".into());
        }

        let message = record.signing_message();
        if verify_signature(
            self.config.oracle_public_key,
            message.as_bytes(),
            &record.signature,
        )
        .is_err()
        {
            warn!(network = %self.config.network, "invalid pricing record signature");
            return ValidationResult::Invalid("invalid pricing record signature".into());
        }

        if record.timestamp > block_timestamp.saturating_add(self.max_future_skew) {
            warn!(
                record_timestamp = record.timestamp,
                block_timestamp, "pricing record timestamp is too far in the future"
            );
            return ValidationResult::Invalid(
                "pricing record timestamp is too far in the future".into(),
            );
        }

        if record.timestamp <= prev_block_timestamp {
            warn!(
                record_timestamp = record.timestamp,
                prev_block_timestamp, "pricing record timestamp is too old"
            );
            return ValidationResult::Invalid("pricing record timestamp is too old".into());
        }

        ValidationResult::Valid
    }
}

impl PricingRecord {
    /// Convenience wrapper: validate against the built-in parameters for
    /// `network`, reduced to the verdict the block pipeline consumes.
    pub fn valid(
        &self,
        network: Network,
        hf_version: u32,
        block_timestamp: u64,
        prev_block_timestamp: u64,
    ) -> bool {
        RecordValidator::for_network(network)
            .validate(self, hf_version, block_timestamp, prev_block_timestamp)
            .is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::signatures::{public_key_to_pem, sign_message, SIGNATURE_SIZE};
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    const T: u64 = 1_700_000_000;

    /// A validator wired to a freshly generated oracle key, plus the key
    /// for producing signatures.
    fn test_setup() -> (SigningKey, NetworkConfig) {
        let signing_key = SigningKey::generate(&mut OsRng);
        let pem = public_key_to_pem(&signing_key.verifying_key()).unwrap();
        let config = NetworkConfig {
            network: Network::Testnet,
            oracle_public_key: Box::leak(pem.into_boxed_str()),
        };
        (signing_key, config)
    }

    fn signed_record(signing_key: &SigningKey, spot: u64, moving_average: u64, timestamp: u64) -> PricingRecord {
        let mut record = PricingRecord::new(1, spot, moving_average, timestamp, [0u8; SIGNATURE_SIZE]);
        record.signature = sign_message(signing_key, record.signing_message().as_bytes());
        record
    }

    #[test]
    fn test_signed_record_accepted() {
        let (signing_key, config) = test_setup();
        let record = signed_record(&signing_key, 1_000_000, 990_000, T);
        let validator = RecordValidator::new(&config);

        let result = validator.validate(&record, HF_VERSION_CONVERSION, T, T - 1);
        assert!(result.is_valid());
    }

    #[test]
    fn test_mutating_any_signed_field_fails() {
        let (signing_key, config) = test_setup();
        let record = signed_record(&signing_key, 1_000_000, 990_000, T);
        let validator = RecordValidator::new(&config);

        let mut tampered = record;
        tampered.spot += 1;
        assert!(!validator.validate(&tampered, HF_VERSION_CONVERSION, T, T - 1).is_valid());

        let mut tampered = record;
        tampered.moving_average += 1;
        assert!(!validator.validate(&tampered, HF_VERSION_CONVERSION, T, T - 1).is_valid());

        let mut tampered = record;
        tampered.timestamp -= 1;
        assert!(!validator.validate(&tampered, HF_VERSION_CONVERSION, T, T - 2).is_valid());

        let mut tampered = record;
        tampered.version += 1;
        assert!(!validator.validate(&tampered, HF_VERSION_CONVERSION, T, T - 1).is_valid());
    }

    #[test]
    fn test_pre_fork_requires_empty() {
        let (signing_key, config) = test_setup();
        let validator = RecordValidator::new(&config);

        // a perfectly signed record is still rejected before the fork
        let record = signed_record(&signing_key, 1_000_000, 990_000, T);
        assert!(!validator.validate(&record, HF_VERSION_CONVERSION - 1, T, T - 1).is_valid());

        // an empty record is fine before the fork
        let empty = PricingRecord::default();
        assert!(validator.validate(&empty, HF_VERSION_CONVERSION - 1, T, T - 1).is_valid());
    }

    #[test]
    fn test_empty_record_accepted_after_fork() {
        let (_, config) = test_setup();
        let validator = RecordValidator::new(&config);

        let empty = PricingRecord::default();
        assert!(validator.validate(&empty, HF_VERSION_CONVERSION, T, T - 1).is_valid());
    }

    #[test]
    fn test_missing_rates_rejected() {
        let (signing_key, config) = test_setup();
        let validator = RecordValidator::new(&config);

        // signature is valid over the zero moving average, so the reject
        // comes from the missing rate alone
        let record = signed_record(&signing_key, 1_000_000, 0, T);
        let result = validator.validate(&record, HF_VERSION_CONVERSION, T, T - 1);
        match result {
            ValidationResult::Invalid(reason) => assert!(reason.contains("missing rates")),
            ValidationResult::Valid => panic!("record with missing rates accepted"),
        }

        let record = signed_record(&signing_key, 0, 990_000, T);
        assert!(!validator.validate(&record, HF_VERSION_CONVERSION, T, T - 1).is_valid());
    }

    #[test]
    fn test_unsigned_record_rejected() {
        let (_, config) = test_setup();
        let validator = RecordValidator::new(&config);

        let record = PricingRecord::new(1, 1_000_000, 990_000, T, [0u8; SIGNATURE_SIZE]);
        assert!(!validator.validate(&record, HF_VERSION_CONVERSION, T, T - 1).is_valid());
    }

    #[test]
    fn test_future_skew_boundary() {
        let (signing_key, config) = test_setup();
        let validator = RecordValidator::new(&config);

        // exactly at the limit: accepted
        let record = signed_record(&signing_key, 1_000_000, 990_000, T + PRICING_RECORD_MAX_FUTURE_SKEW);
        assert!(validator.validate(&record, HF_VERSION_CONVERSION, T, T - 1).is_valid());

        // one second beyond: rejected
        let record = signed_record(&signing_key, 1_000_000, 990_000, T + PRICING_RECORD_MAX_FUTURE_SKEW + 1);
        assert!(!validator.validate(&record, HF_VERSION_CONVERSION, T, T - 1).is_valid());
    }

    #[test]
    fn test_monotonicity_boundary() {
        let (signing_key, config) = test_setup();
        let validator = RecordValidator::new(&config);

        // equal to the previous block: rejected
        let record = signed_record(&signing_key, 1_000_000, 990_000, T - 1);
        assert!(!validator.validate(&record, HF_VERSION_CONVERSION, T, T - 1).is_valid());

        // one past the previous block: accepted
        let record = signed_record(&signing_key, 1_000_000, 990_000, T);
        assert!(validator.validate(&record, HF_VERSION_CONVERSION, T, T - 1).is_valid());
    }

    #[test]
    fn test_block_timestamp_near_max_does_not_overflow() {
        let (signing_key, config) = test_setup();
        let validator = RecordValidator::new(&config);

        let record = signed_record(&signing_key, 1_000_000, 990_000, u64::MAX);
        let result = validator.validate(&record, HF_VERSION_CONVERSION, u64::MAX, u64::MAX - 1);
        assert!(result.is_valid());
    }

    #[test]
    fn test_builtin_network_rejects_foreign_oracle() {
        // a record signed by a random key never verifies against the
        // built-in testnet oracle key
        let signing_key = SigningKey::generate(&mut OsRng);
        let record = signed_record(&signing_key, 1_000_000, 990_000, T);
        assert!(!record.valid(Network::Testnet, HF_VERSION_CONVERSION, T, T - 1));

        // but an empty record is still fine there
        assert!(PricingRecord::default().valid(Network::Testnet, HF_VERSION_CONVERSION, T, T - 1));
    }
}

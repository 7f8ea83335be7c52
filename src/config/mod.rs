//! Per-Network Oracle Configuration
//!
//! Maps each network to the public key its oracle signs pricing records
//! with. The validator consults this registry; the embedding node owns it
//! and should call [`NetworkConfig::validate`] at startup so bad key
//! material fails the deployment, not individual records.

use crate::crypto::signatures::public_key_from_pem;
use crate::Result;
use std::fmt;

/// Chain flavour a node runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Stagenet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Stagenet => write!(f, "stagenet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Oracle parameters for one network.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub network: Network,
    /// PEM-encoded (SPKI) Ed25519 key the oracle signs pricing records with.
    pub oracle_public_key: &'static str,
}

impl NetworkConfig {
    /// Fail-fast probe for node startup. Empty or unparsable key material
    /// is a configuration error, never a per-record verdict.
    pub fn validate(&self) -> Result<()> {
        public_key_from_pem(self.oracle_public_key)?;
        Ok(())
    }
}

const MAINNET_ORACLE_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----
MCowBQYDK2VwAyEAMMNcD88Ek5rqYeYQ2UdqPXrRjwrDAIASB6NwVeNtqok=
-----END PUBLIC KEY-----
";

const STAGENET_ORACLE_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----
MCowBQYDK2VwAyEA63r1B/r4VfbTi9l13+dyqxkdX/iba7v3PD8HD5MnzNk=
-----END PUBLIC KEY-----
";

const TESTNET_ORACLE_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----
MCowBQYDK2VwAyEAwnNTUKfE9OHJ/YsUdtV3GHesFtcqX2YG13Iy9qVKTw0=
-----END PUBLIC KEY-----
";

static MAINNET: NetworkConfig = NetworkConfig {
    network: Network::Mainnet,
    oracle_public_key: MAINNET_ORACLE_PUBLIC_KEY,
};

static STAGENET: NetworkConfig = NetworkConfig {
    network: Network::Stagenet,
    oracle_public_key: STAGENET_ORACLE_PUBLIC_KEY,
};

static TESTNET: NetworkConfig = NetworkConfig {
    network: Network::Testnet,
    oracle_public_key: TESTNET_ORACLE_PUBLIC_KEY,
};

/// Built-in parameters for `network`.
pub fn get_config(network: Network) -> &'static NetworkConfig {
    match network {
        Network::Mainnet => &MAINNET,
        Network::Stagenet => &STAGENET,
        Network::Testnet => &TESTNET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys_parse() {
        for network in [Network::Mainnet, Network::Stagenet, Network::Testnet] {
            get_config(network).validate().unwrap();
        }
    }

    #[test]
    fn test_networks_have_distinct_keys() {
        assert_ne!(
            get_config(Network::Mainnet).oracle_public_key,
            get_config(Network::Testnet).oracle_public_key
        );
        assert_ne!(
            get_config(Network::Mainnet).oracle_public_key,
            get_config(Network::Stagenet).oracle_public_key
        );
    }

    #[test]
    fn test_validate_rejects_bad_key() {
        let config = NetworkConfig {
            network: Network::Testnet,
            oracle_public_key: "",
        };
        assert!(config.validate().is_err());

        let config = NetworkConfig {
            network: Network::Testnet,
            oracle_public_key: "not a pem document",
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_network_display() {
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
        assert_eq!(Network::Testnet.to_string(), "testnet");
    }
}

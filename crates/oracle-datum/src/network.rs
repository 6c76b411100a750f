//! Enum of possible Cardano networks.

use pallas::ledger::addresses::Network as AddressNetwork;

/// Enum of possible Cardano networks.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::VariantNames,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Network {
    /// Cardano mainnet network.
    Mainnet,
    /// Cardano pre-production network.
    Preprod,
    /// Cardano preview network.
    Preview,
}

// Preprod Defaults
/// Preprod Ogmios instance run by the oracle publisher.
const DEFAULT_PREPROD_OGMIOS: &str = "ws://ogmios.preprod.orcfax.io:1337";
/// Preprod Plutus chain index transaction endpoint.
const DEFAULT_PREPROD_CHAIN_INDEX: &str = "http://plutus-chain-index.preprod.orcfax.io:9084/tx";
/// Preprod ADA/USD oracle smart contract address.
const DEFAULT_PREPROD_ORACLE_ADDRESS: &str =
    "addr_test1wrtcecfy7np3sduzn99ffuv8qx2sa8v977l0xql8ca7lgkgmktuc0";
/// Preprod address the authorization tokens are minted to.
const DEFAULT_PREPROD_AUTH_ADDRESS: &str =
    "addr_test1vrc7lrdcsz08vxuj4278aeyn4g82salal76l54gr6rw4ync86tfse";
/// Preprod policy id of the authorization tokens.
const DEFAULT_PREPROD_AUTH_POLICY: &str =
    "5ec8416ecd8af5fe338068b2aee00a028dc1f4c0cd5978fb86d7c038";

impl Network {
    /// Get the default Ogmios endpoint for a blockchain network.
    #[must_use]
    pub fn default_ogmios_url(self) -> Option<String> {
        match self {
            Network::Preprod => Some(DEFAULT_PREPROD_OGMIOS.to_string()),
            Network::Mainnet | Network::Preview => None,
        }
    }

    /// Get the default chain index transaction endpoint for a blockchain network.
    #[must_use]
    pub fn default_chain_index_url(self) -> Option<String> {
        match self {
            Network::Preprod => Some(DEFAULT_PREPROD_CHAIN_INDEX.to_string()),
            Network::Mainnet | Network::Preview => None,
        }
    }

    /// Get the default oracle contract address for a blockchain network.
    #[must_use]
    pub fn default_oracle_address(self) -> Option<String> {
        match self {
            Network::Preprod => Some(DEFAULT_PREPROD_ORACLE_ADDRESS.to_string()),
            Network::Mainnet | Network::Preview => None,
        }
    }

    /// Get the default authorization address for a blockchain network.
    #[must_use]
    pub fn default_auth_address(self) -> Option<String> {
        match self {
            Network::Preprod => Some(DEFAULT_PREPROD_AUTH_ADDRESS.to_string()),
            Network::Mainnet | Network::Preview => None,
        }
    }

    /// Get the default authorization token policy id for a blockchain network.
    #[must_use]
    pub fn default_auth_policy(self) -> Option<String> {
        match self {
            Network::Preprod => Some(DEFAULT_PREPROD_AUTH_POLICY.to_string()),
            Network::Mainnet | Network::Preview => None,
        }
    }

    /// True if an address header network id belongs to this network.
    #[must_use]
    pub fn matches_address_network(self, network: AddressNetwork) -> bool {
        match self {
            Network::Mainnet => network == AddressNetwork::Mainnet,
            Network::Preprod | Network::Preview => network == AddressNetwork::Testnet,
        }
    }
}

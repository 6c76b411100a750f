//! Oracle reader configuration.
//!
//! Each network has its own set of defaults, so no single "default" can apply.
//! Settings left unset fall back to the network defaults when the configuration is
//! validated.

use std::time::Duration;

use chrono::TimeDelta;
use pallas::ledger::addresses::{Address, ShelleyPaymentPart};
use tracing::debug;
use url::Url;

use crate::{
    error::{Error, Result},
    network::Network,
    validator::AuthToken,
};

/// How old the freshest datum may be before a staleness warning is raised (seconds).
const DEFAULT_STALE_AFTER_SECS: i64 = 60 * 60;

/// Default timeout applied to chain query requests.
const DEFAULT_CHAIN_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Length of a policy id, in bytes.
const POLICY_ID_LEN: usize = 28;

/// Oracle reader configuration, as supplied by the user.
#[derive(Clone, Debug)]
pub struct ReaderConfig {
    /// Chain Network
    pub network: Network,
    /// Ogmios endpoint.
    ogmios_url: Option<String>,
    /// Chain index transaction endpoint.
    chain_index_url: Option<String>,
    /// Oracle smart contract address.
    oracle_address: Option<String>,
    /// Address holding the authorization tokens.
    auth_address: Option<String>,
    /// Policy id of the authorization tokens.
    auth_policy: Option<String>,
    /// Age after which the freshest datum is reported as stale.
    stale_after: TimeDelta,
    /// Timeout for chain query requests.
    chain_query_timeout: Duration,
}

/// Validated settings, ready to be used by the reader.
#[derive(Clone, Debug)]
pub struct OracleSettings {
    /// Chain Network
    pub network: Network,
    /// Ogmios endpoint.
    pub ogmios_url: Url,
    /// Chain index transaction endpoint.
    pub chain_index_url: Url,
    /// Oracle smart contract address.
    pub oracle_address: String,
    /// Authorization token the published UTxO must trace back to.
    pub auth: AuthToken,
    /// Age after which the freshest datum is reported as stale.
    pub stale_after: TimeDelta,
    /// Timeout for chain query requests.
    pub chain_query_timeout: Duration,
}

impl ReaderConfig {
    /// Sets the defaults for a given cardano network.
    ///
    /// Endpoints and addresses are left unset, and resolved from the network defaults
    /// by [`ReaderConfig::validate`].
    #[must_use]
    pub fn default_for(network: Network) -> Self {
        Self {
            network,
            ogmios_url: None,
            chain_index_url: None,
            oracle_address: None,
            auth_address: None,
            auth_policy: None,
            stale_after: TimeDelta::seconds(DEFAULT_STALE_AFTER_SECS),
            chain_query_timeout: DEFAULT_CHAIN_QUERY_TIMEOUT,
        }
    }

    /// Sets the Ogmios endpoint used to query UTxOs.
    #[must_use]
    pub fn ogmios_url(mut self, url: String) -> Self {
        self.ogmios_url = Some(url);
        self
    }

    /// Sets the chain index endpoint used to look up transactions.
    #[must_use]
    pub fn chain_index_url(mut self, url: String) -> Self {
        self.chain_index_url = Some(url);
        self
    }

    /// Sets the oracle smart contract address.
    #[must_use]
    pub fn oracle_address(mut self, address: String) -> Self {
        self.oracle_address = Some(address);
        self
    }

    /// Sets the address holding the authorization tokens.
    #[must_use]
    pub fn auth_address(mut self, address: String) -> Self {
        self.auth_address = Some(address);
        self
    }

    /// Sets the policy id of the authorization tokens.
    #[must_use]
    pub fn auth_policy(mut self, policy: String) -> Self {
        self.auth_policy = Some(policy);
        self
    }

    /// Sets the age after which the freshest datum is reported as stale.
    #[must_use]
    pub fn stale_after(mut self, age: TimeDelta) -> Self {
        self.stale_after = age;
        self
    }

    /// Sets the timeout of chain query requests.
    #[must_use]
    pub fn chain_query_timeout(mut self, timeout: Duration) -> Self {
        self.chain_query_timeout = timeout;
        self
    }

    /// Resolve defaults and validate every setting.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingSetting` if a setting is unset and the network has no
    /// default, `Error::InvalidUrl`, `Error::InvalidAddress`, `Error::NetworkMismatch`,
    /// `Error::NoPaymentKeyHash` or `Error::InvalidPolicyId` if a setting is invalid.
    pub fn validate(self) -> Result<OracleSettings> {
        let network = self.network;
        let setting = |value: Option<String>, default: fn(Network) -> Option<String>, name| {
            value
                .or_else(|| default(network))
                .ok_or(Error::MissingSetting(name, network))
        };

        let ogmios_url = parse_url(&setting(
            self.ogmios_url,
            Network::default_ogmios_url,
            "ogmios-url",
        )?)?;
        let chain_index_url = parse_url(&setting(
            self.chain_index_url,
            Network::default_chain_index_url,
            "chain-index-url",
        )?)?;
        let oracle_address = setting(
            self.oracle_address,
            Network::default_oracle_address,
            "oracle-address",
        )?;
        parse_address(&oracle_address, network)?;

        let auth_address = setting(
            self.auth_address,
            Network::default_auth_address,
            "auth-address",
        )?;
        let payment_key_hash = payment_key_hash(&parse_address(&auth_address, network)?)
            .ok_or_else(|| Error::NoPaymentKeyHash(auth_address.clone()))?;
        let policy_id = parse_policy_id(&setting(
            self.auth_policy,
            Network::default_auth_policy,
            "auth-policy",
        )?)?;

        debug!(
            chain = network.to_string(),
            ogmios = ogmios_url.as_str(),
            chain_index = chain_index_url.as_str(),
            oracle = oracle_address,
            "Oracle reader settings resolved",
        );

        Ok(OracleSettings {
            network,
            ogmios_url,
            chain_index_url,
            oracle_address,
            auth: AuthToken {
                address: auth_address,
                payment_key_hash,
                policy_id,
            },
            stale_after: self.stale_after,
            chain_query_timeout: self.chain_query_timeout,
        })
    }
}

/// Parse a service URL.
fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(url.to_string(), e.to_string()))
}

/// Parse a bech32 address and check it belongs to `network`.
fn parse_address(address: &str, network: Network) -> Result<Address> {
    let parsed = Address::from_bech32(address)
        .map_err(|e| Error::InvalidAddress(address.to_string(), e.to_string()))?;
    match parsed.network() {
        Some(id) if network.matches_address_network(id) => Ok(parsed),
        _ => Err(Error::NetworkMismatch(address.to_string(), network)),
    }
}

/// Hex encoded payment key hash of a Shelley address.
fn payment_key_hash(address: &Address) -> Option<String> {
    match address {
        Address::Shelley(shelley) => {
            match shelley.payment() {
                ShelleyPaymentPart::Key(hash) => Some(hex::encode(hash.as_ref())),
                ShelleyPaymentPart::Script(_) => None,
            }
        },
        _ => None,
    }
}

/// Normalise a policy id to lower case hex, checking its length.
fn parse_policy_id(policy: &str) -> Result<String> {
    match hex::decode(policy) {
        Ok(bytes) if bytes.len() == POLICY_ID_LEN => Ok(hex::encode(bytes)),
        _ => Err(Error::InvalidPolicyId(policy.to_string())),
    }
}

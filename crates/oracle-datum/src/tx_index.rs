//! Transaction lookups against a Plutus chain index.
//!
//! Only the parts of a chain index transaction needed to trace an authorization token
//! are modelled. Unknown fields are ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Timeout of a single transaction lookup.
pub const TX_INDEX_TIMEOUT: Duration = Duration::from_secs(30);

/// Looks up transactions by id.
pub trait TxIndex {
    /// Fetch the transaction with the given hex encoded id.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction can not be fetched or parsed.
    fn tx(&self, tx_id: &str) -> Result<ChainIndexTx>;
}

/// A transaction as returned by the chain index.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainIndexTx {
    /// Inputs spent by the transaction.
    #[serde(rename = "_citxInputs", default)]
    pub inputs: Vec<ChainIndexInput>,
    /// Outputs produced by the transaction.
    #[serde(rename = "_citxOutputs", default)]
    pub outputs: ChainIndexOutputs,
}

/// A transaction input.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainIndexInput {
    /// Output spent by this input.
    #[serde(rename = "txInRef")]
    pub out_ref: TxOutRef,
}

/// Reference to an output of another transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TxOutRef {
    /// Producing transaction.
    #[serde(rename = "txOutRefId")]
    pub tx_id: TxId,
    /// Output index within the producing transaction.
    #[serde(rename = "txOutRefIdx")]
    pub index: u64,
}

/// Wrapped transaction id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxId {
    /// Hex encoded transaction id.
    #[serde(rename = "getTxId")]
    pub id: String,
}

/// Transaction outputs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainIndexOutputs {
    /// Outputs, in transaction order.
    #[serde(default)]
    pub contents: Vec<ChainIndexOutput>,
}

/// A transaction output.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainIndexOutput {
    /// Output address.
    pub address: ChainIndexAddress,
    /// Output value.
    pub value: ChainIndexValue,
}

/// Address of an output.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainIndexAddress {
    /// Payment credential.
    #[serde(rename = "addressCredential")]
    pub credential: Credential,
}

/// Payment credential of an address.
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    /// Credential kind, e.g. `PubKeyCredential`.
    #[serde(default)]
    pub tag: Option<String>,
    /// Credential hash.
    pub contents: CredentialContents,
}

/// Hash of a payment credential.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialContents {
    /// Payment key hash, absent for script credentials.
    #[serde(rename = "getPubKeyHash", default)]
    pub pub_key_hash: Option<String>,
}

/// Multi-asset value of an output.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainIndexValue {
    /// `(currency symbol, tokens)` entries. Token quantities are not inspected.
    #[serde(rename = "getValue", default)]
    pub entries: Vec<(CurrencySymbol, serde_json::Value)>,
}

/// Wrapped policy id.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencySymbol {
    /// Hex encoded policy id, empty for ada.
    #[serde(rename = "unCurrencySymbol")]
    pub policy_id: String,
}

impl ChainIndexOutput {
    /// Payment key hash of the output address, if it has one.
    #[must_use]
    pub fn pub_key_hash(&self) -> Option<&str> {
        self.address.credential.contents.pub_key_hash.as_deref()
    }

    /// True if the output carries any token minted under `policy_id`.
    #[must_use]
    pub fn has_policy(&self, policy_id: &str) -> bool {
        self.value
            .entries
            .iter()
            .any(|(symbol, _)| symbol.policy_id.eq_ignore_ascii_case(policy_id))
    }
}

/// Chain index client over HTTP.
#[derive(Debug, Clone)]
pub struct ChainIndexClient {
    /// HTTP client.
    http: reqwest::blocking::Client,
    /// Transaction endpoint.
    url: Url,
}

impl ChainIndexClient {
    /// Create a client for the transaction endpoint at `url`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client can not be built.
    pub fn new(url: Url) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(TX_INDEX_TIMEOUT)
            .build()?;
        Ok(Self { http, url })
    }
}

impl TxIndex for ChainIndexClient {
    fn tx(&self, tx_id: &str) -> Result<ChainIndexTx> {
        debug!(tx_id, url = self.url.as_str(), "Looking up transaction");
        let body = self
            .http
            .post(self.url.clone())
            .json(&TxId {
                id: tx_id.to_string(),
            })
            .send()?
            .error_for_status()?
            .text()?;
        serde_json::from_str(&body).map_err(Error::from)
    }
}

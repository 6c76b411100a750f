//! UTxO queries against an Ogmios node.
//!
//! Ogmios serves the same JSON-RPC methods over HTTP and websockets, so a `ws://`
//! endpoint is queried with plain HTTP requests on the same host and port.

use std::{collections::BTreeMap, fmt::Display, time::Duration};

use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Ogmios method returning the UTxOs at a set of addresses.
const QUERY_UTXO_METHOD: &str = "queryLedgerState/utxo";

/// Asset group holding the ada amount of an output.
const ADA_ASSET_GROUP: &str = "ada";

/// Asset name of the ada amount of an output.
const LOVELACE: &str = "lovelace";

/// Queries the current UTxO set.
pub trait ChainQuery {
    /// All unspent outputs currently at `address`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain can not be queried.
    fn utxos_at(&self, address: &str) -> Result<Vec<Utxo>>;
}

/// Reference to a transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxInput {
    /// Hex encoded id of the producing transaction.
    pub tx_id: String,
    /// Output index within the producing transaction.
    pub index: u64,
}

impl Display for TxInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.tx_id, self.index)
    }
}

/// A transaction output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TxOutput {
    /// Bech32 address.
    pub address: String,
    /// Ada amount, in lovelace.
    pub coin: u64,
    /// Native assets, keyed by policy id then asset name.
    pub multi_asset: BTreeMap<String, BTreeMap<String, u64>>,
    /// Inline datum, CBOR encoded.
    pub datum: Option<Vec<u8>>,
    /// Hash of a datum that is not inlined.
    pub datum_hash: Option<String>,
    /// Reference script carried by the output.
    pub script: Option<ScriptRef>,
}

/// Reference script attached to an output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptRef {
    /// Script language, e.g. `plutus:v2` or `native`.
    pub language: String,
}

/// An unspent transaction output.
#[derive(Debug, Clone, PartialEq)]
pub struct Utxo {
    /// Where the output was produced.
    pub input: TxInput,
    /// The output itself.
    pub output: TxOutput,
}

/// JSON-RPC response envelope.
#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    /// Successful result.
    result: Option<T>,
    /// Failure.
    error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Deserialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Error message.
    message: String,
}

/// Output reference in an Ogmios UTxO.
#[derive(Deserialize)]
struct OgmiosTransaction {
    /// Transaction id.
    id: String,
}

/// A UTxO as returned by Ogmios.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OgmiosUtxo {
    /// Producing transaction.
    transaction: OgmiosTransaction,
    /// Output index.
    index: u64,
    /// Bech32 address.
    address: String,
    /// Value grouped by policy id, with ada under `ada.lovelace`.
    value: BTreeMap<String, BTreeMap<String, u64>>,
    /// Hex encoded inline datum.
    datum: Option<String>,
    /// Hash of a datum that is not inlined.
    datum_hash: Option<String>,
    /// Reference script.
    script: Option<ScriptRef>,
}

impl TryFrom<OgmiosUtxo> for Utxo {
    type Error = Error;

    fn try_from(utxo: OgmiosUtxo) -> Result<Self> {
        let input = TxInput {
            tx_id: utxo.transaction.id,
            index: utxo.index,
        };
        let datum = utxo
            .datum
            .map(|datum| {
                hex::decode(&datum).map_err(|e| {
                    Error::MalformedDatum(format!("inline datum of {input} is not hex: {e}"))
                })
            })
            .transpose()?;

        let mut multi_asset = utxo.value;
        let coin = multi_asset
            .remove(ADA_ASSET_GROUP)
            .and_then(|ada| ada.get(LOVELACE).copied())
            .unwrap_or_default();

        Ok(Utxo {
            input,
            output: TxOutput {
                address: utxo.address,
                coin,
                multi_asset,
                datum,
                datum_hash: utxo.datum_hash,
                script: utxo.script,
            },
        })
    }
}

/// Ogmios client over HTTP JSON-RPC.
#[derive(Debug, Clone)]
pub struct OgmiosClient {
    /// HTTP client.
    http: reqwest::blocking::Client,
    /// HTTP endpoint.
    url: Url,
}

impl OgmiosClient {
    /// Create a client for the Ogmios instance at `url`.
    ///
    /// `ws` and `wss` endpoints are mapped to `http` and `https`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the scheme can not be mapped, or `Error::Http`
    /// if the HTTP client can not be built.
    pub fn new(url: &Url, timeout: Duration) -> Result<Self> {
        let mut url = url.clone();
        let scheme = match url.scheme() {
            "ws" => Some("http"),
            "wss" => Some("https"),
            "http" | "https" => None,
            other => {
                return Err(Error::InvalidUrl(
                    url.to_string(),
                    format!("unsupported scheme {other}"),
                ))
            },
        };
        if let Some(scheme) = scheme {
            url.set_scheme(scheme).map_err(|()| {
                Error::InvalidUrl(url.to_string(), format!("can not switch to {scheme}"))
            })?;
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http, url })
    }

    /// The HTTP endpoint queried by this client.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ChainQuery for OgmiosClient {
    fn utxos_at(&self, address: &str) -> Result<Vec<Utxo>> {
        debug!(address, url = self.url.as_str(), "Querying UTxOs");
        let request = json!({
            "jsonrpc": "2.0",
            "method": QUERY_UTXO_METHOD,
            "params": { "addresses": [address] },
            "id": null,
        });
        let response = self.http.post(self.url.clone()).json(&request).send()?;
        let status = response.status();
        let body = response.text()?;

        let response: JsonRpcResponse<Vec<OgmiosUtxo>> = match serde_json::from_str(&body) {
            Ok(response) => response,
            Err(_) if !status.is_success() => {
                return Err(Error::JsonRpc {
                    code: i64::from(status.as_u16()),
                    message: body,
                })
            },
            Err(e) => return Err(e.into()),
        };

        match (response.result, response.error) {
            (_, Some(err)) => {
                Err(Error::JsonRpc {
                    code: err.code,
                    message: err.message,
                })
            },
            (Some(utxos), None) => utxos.into_iter().map(Utxo::try_from).collect(),
            (None, None) => Err(Error::EmptyJsonRpcResponse),
        }
    }
}

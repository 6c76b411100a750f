//! Library Crates Defined Errors

use crate::network::Network;

/// Crate error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The datum bytes are not valid CBOR, or use a CBOR type we do not handle.
    #[error("CBOR decode error: {0}")]
    Cbor(#[from] minicbor::decode::Error),
    /// Re-encoding a datum to CBOR failed.
    #[error("CBOR encode error: {0}")]
    CborEncode(String),
    /// The datum decoded as CBOR, but its shape is not the oracle datum shape.
    #[error("Malformed datum: {0}")]
    MalformedDatum(String),
    /// A field required by the canonical datum layout is missing. This is the
    /// malformed datum case for absent fields.
    #[error("Malformed datum: missing required field `{0}`")]
    MissingField(&'static str),
    /// A `[significand, exponent]` pair could not be decoded.
    #[error("Malformed number: {0}")]
    MalformedNumber(String),
    /// HTTP transport error talking to a collaborator service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// A collaborator answered with a body that is not the JSON we expect.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Ogmios answered a JSON-RPC request with an error object.
    #[error("Ogmios JSON-RPC error {code}: {message}")]
    JsonRpc {
        /// JSON-RPC error code.
        code: i64,
        /// Human readable error message.
        message: String,
    },
    /// Ogmios answered without a result and without an error.
    #[error("Ogmios returned neither a result nor an error")]
    EmptyJsonRpcResponse,
    /// A configured service URL is not valid.
    #[error("Service URL `{0}` is not a valid URL: {1}")]
    InvalidUrl(String, String),
    /// A configured address is not a valid bech32 Cardano address.
    #[error("Address `{0}` is not a valid Cardano address: {1}")]
    InvalidAddress(String, String),
    /// A configured address does not carry a payment key hash.
    #[error("Address `{0}` has no payment key hash")]
    NoPaymentKeyHash(String),
    /// A configured address belongs to a different network.
    #[error("Address `{0}` does not belong to network `{1}`")]
    NetworkMismatch(String, Network),
    /// A configured policy id is not 28 bytes of hex.
    #[error("Policy id `{0}` is not 28 bytes of hex")]
    InvalidPolicyId(String),
    /// A setting has no built-in default for the selected network.
    #[error("No `{0}` configured for network `{1}`, and the network has no default")]
    MissingSetting(&'static str, Network),
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

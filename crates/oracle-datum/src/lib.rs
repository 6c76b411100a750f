//! Oracle datum reader.
//!
//! Finds the freshest price datum published at an oracle contract address, checks it
//! was published with the oracle's authorization token, and decodes it into its
//! canonical field order and price pair.

pub mod chain_query;
mod config;
pub mod datum;
mod document;
mod error;
mod fixed_point;
mod network;
mod plutus_data;
mod reader;
mod selector;
pub mod tx_index;
mod validator;

pub use chain_query::{ChainQuery, OgmiosClient, Utxo};
pub use config::{OracleSettings, ReaderConfig};
pub use datum::{decode, CanonicalDatum, OracleDatum, PricePair, PriceQuote};
pub use document::{DocValue, Document};
pub use error::{Error, Result};
pub use fixed_point::{decode_fixed_point, FixedPoint};
pub use network::Network;
pub use plutus_data::PlutusData;
pub use reader::{read_latest, OracleReport};
pub use selector::{select_latest, Selection};
pub use tx_index::{ChainIndexClient, ChainIndexTx, TxIndex};
pub use validator::{validate_utxo, AuthToken};

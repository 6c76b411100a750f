//! Reads the latest authorized oracle datum.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    chain_query::{ChainQuery, Utxo},
    config::OracleSettings,
    datum::{CanonicalDatum, OracleDatum, PricePair},
    error::Result,
    selector::select_latest,
    tx_index::TxIndex,
    validator::validate_utxo,
};

/// Lovelace in one ada.
const LOVELACE_PER_ADA: f64 = 1_000_000.0;

/// The latest authorized oracle publication.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleReport {
    /// The UTxO holding the datum.
    pub utxo: Utxo,
    /// The datum envelope.
    pub datum: OracleDatum,
    /// The datum fields in canonical order.
    pub canonical: CanonicalDatum,
    /// The published prices.
    pub prices: PricePair,
    /// Hours since publication, when older than the staleness threshold.
    pub stale_hours: Option<f64>,
}

impl OracleReport {
    /// Ada locked in the UTxO.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cost_ada(&self) -> f64 {
        self.utxo.output.coin as f64 / LOVELACE_PER_ADA
    }

    /// Raw datum bytes, hex encoded.
    #[must_use]
    pub fn datum_hex(&self) -> String {
        self.utxo
            .output
            .datum
            .as_deref()
            .map(hex::encode)
            .unwrap_or_default()
    }

    /// Internal identifier of the datum.
    #[must_use]
    pub fn identifier(&self) -> String {
        self.datum.identifier_display()
    }

    /// Publication time, if representable.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.datum.published_at()
    }
}

/// Find, authorize and decode the freshest datum at the oracle address.
///
/// Returns `Ok(None)` when no UTxO carries a readable datum, or when the freshest one
/// was not published with the authorization token.
///
/// # Errors
///
/// Returns an error if the chain query fails or the selected datum is malformed.
pub fn read_latest(
    chain: &impl ChainQuery, index: &impl TxIndex, settings: &OracleSettings, now: DateTime<Utc>,
) -> Result<Option<OracleReport>> {
    info!(address = settings.oracle_address, "Oracle contract address");
    let utxos = chain.utxos_at(&settings.oracle_address)?;
    info!(count = utxos.len(), "Inspecting oracle UTxOs");

    let Some(selection) = select_latest(utxos, now, settings.stale_after) else {
        return Ok(None);
    };
    if !validate_utxo(index, &settings.auth, &selection.utxo.input.tx_id) {
        return Ok(None);
    }

    let (canonical, prices) = selection.datum.decode()?;
    Ok(Some(OracleReport {
        utxo: selection.utxo,
        datum: selection.datum,
        canonical,
        prices,
        stale_hours: selection.stale_hours,
    }))
}

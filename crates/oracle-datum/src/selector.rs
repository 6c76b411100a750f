//! Selection of the freshest oracle UTxO.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::{chain_query::Utxo, datum::OracleDatum};

/// Milliseconds in an hour.
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// The UTxO holding the freshest datum.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The selected UTxO.
    pub utxo: Utxo,
    /// Its parsed datum envelope.
    pub datum: OracleDatum,
    /// Hours since publication, set when the datum is older than the staleness
    /// threshold.
    pub stale_hours: Option<f64>,
}

/// Pick the UTxO whose datum carries the greatest timestamp.
///
/// UTxOs carrying a reference script or no inline datum are skipped, as are datums
/// whose envelope can not be parsed. On equal timestamps the first UTxO wins.
/// Returns `None` when no UTxO qualifies.
#[must_use]
pub fn select_latest(
    utxos: Vec<Utxo>, now: DateTime<Utc>, stale_after: TimeDelta,
) -> Option<Selection> {
    let mut latest: Option<(Utxo, OracleDatum)> = None;

    for utxo in utxos {
        if utxo.output.script.is_some() {
            debug!(utxo = %utxo.input, "Skipping UTxO carrying a reference script");
            continue;
        }
        let Some(raw) = utxo.output.datum.as_deref() else {
            debug!(utxo = %utxo.input, "Skipping UTxO without an inline datum");
            continue;
        };
        let datum = match OracleDatum::from_cbor(raw) {
            Ok(datum) => datum,
            Err(err) => {
                debug!(utxo = %utxo.input, error = %err, "Skipping UTxO with an unreadable datum");
                continue;
            },
        };
        if latest
            .as_ref()
            .is_none_or(|(_, best)| datum.timestamp > best.timestamp)
        {
            latest = Some((utxo, datum));
        }
    }

    let (utxo, datum) = latest?;
    let stale_hours = staleness(datum.timestamp, now, stale_after);
    if let Some(hours) = stale_hours {
        warn!(utxo = %utxo.input, "'{hours:.2}' hours since datum was published");
    }
    Some(Selection {
        utxo,
        datum,
        stale_hours,
    })
}

/// Hours elapsed since `timestamp` (POSIX milliseconds), if more than `stale_after`.
#[allow(clippy::cast_precision_loss)]
fn staleness(timestamp: u64, now: DateTime<Utc>, stale_after: TimeDelta) -> Option<f64> {
    let age = i128::from(now.timestamp_millis()) - i128::from(timestamp);
    (age > i128::from(stale_after.num_milliseconds())).then(|| age as f64 / MILLIS_PER_HOUR)
}

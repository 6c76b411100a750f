//! Authorization token validation.
//!
//! A datum is only trusted if the transaction that published it spent an output
//! owned by the authorization address and carrying a token of the authorization
//! policy. Every failure along the way is logged and treated as "not authorized".

use tracing::{error, info, warn};

use crate::tx_index::{ChainIndexOutput, TxIndex};

/// Authorization token the published UTxO must trace back to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthToken {
    /// Bech32 address holding the tokens.
    pub address: String,
    /// Hex encoded payment key hash of `address`.
    pub payment_key_hash: String,
    /// Hex encoded policy id of the tokens.
    pub policy_id: String,
}

impl AuthToken {
    /// True if `output` belongs to the authorization address and holds a token of the
    /// authorization policy.
    #[must_use]
    pub fn authorizes(&self, output: &ChainIndexOutput) -> bool {
        output
            .pub_key_hash()
            .is_some_and(|hash| hash.eq_ignore_ascii_case(&self.payment_key_hash))
            && output.has_policy(&self.policy_id)
    }
}

/// Check that the transaction `tx_id` spent an output holding the authorization
/// token.
///
/// Inputs are grouped by producing transaction, so each producing transaction is
/// fetched once.
pub fn validate_utxo<I: TxIndex + ?Sized>(index: &I, auth: &AuthToken, tx_id: &str) -> bool {
    info!(tx_id, "Inspecting the UTxO for valid auth tokens");

    let tx = match index.tx(tx_id) {
        Ok(tx) => tx,
        Err(err) => {
            error!(tx_id, error = %err, "Unable to fetch the publishing transaction");
            return false;
        },
    };

    let mut producers: Vec<(&str, Vec<u64>)> = Vec::new();
    for input in &tx.inputs {
        let producer = input.out_ref.tx_id.id.as_str();
        match producers.iter_mut().find(|(id, _)| *id == producer) {
            Some((_, indices)) => indices.push(input.out_ref.index),
            None => producers.push((producer, vec![input.out_ref.index])),
        }
    }

    for (producer, indices) in producers {
        let producing_tx = match index.tx(producer) {
            Ok(tx) => tx,
            Err(err) => {
                warn!(tx_id = producer, error = %err, "Unable to fetch an input transaction");
                continue;
            },
        };
        for output_index in indices {
            let output = usize::try_from(output_index)
                .ok()
                .and_then(|i| producing_tx.outputs.contents.get(i));
            let Some(output) = output else {
                warn!(
                    tx_id = producer,
                    output_index, "Input references a missing output"
                );
                continue;
            };
            if auth.authorizes(output) {
                info!(tx_id, "The UTxO is valid, it contains the correct auth token");
                return true;
            }
        }
    }

    error!(tx_id, "The UTxO is not valid, it does not contain the auth token");
    false
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::{
        error::{Error, Result},
        tx_index::ChainIndexTx,
    };

    /// Payment key hash of the authorization address.
    const AUTH_HASH: &str = "f1ef8db1c09e761b92aaf1fee493aa0ea877fdffb5fa5503d0dd5524";
    /// Authorization policy.
    const AUTH_POLICY: &str = "5ec8416ecd8af5fe338068b2aee00a028dc1f4c0cd5978fb86d7c038";

    /// In memory transaction index.
    #[derive(Default)]
    struct MemoryIndex(HashMap<String, serde_json::Value>);

    impl MemoryIndex {
        fn with(mut self, tx_id: &str, tx: serde_json::Value) -> Self {
            self.0.insert(tx_id.to_string(), tx);
            self
        }
    }

    impl TxIndex for MemoryIndex {
        fn tx(&self, tx_id: &str) -> Result<ChainIndexTx> {
            let tx = self
                .0
                .get(tx_id)
                .ok_or_else(|| Error::MalformedDatum(format!("unknown tx {tx_id}")))?;
            Ok(serde_json::from_value(tx.clone())?)
        }
    }

    fn auth() -> AuthToken {
        AuthToken {
            address: "addr_test1vrc7lrdcsz08vxuj4278aeyn4g82salal76l54gr6rw4ync86tfse"
                .to_string(),
            payment_key_hash: AUTH_HASH.to_string(),
            policy_id: AUTH_POLICY.to_string(),
        }
    }

    fn spending(inputs: &[(&str, u64)]) -> serde_json::Value {
        let inputs: Vec<_> = inputs
            .iter()
            .map(|(id, idx)| json!({ "txInRef": { "txOutRefId": { "getTxId": id }, "txOutRefIdx": idx } }))
            .collect();
        json!({ "_citxInputs": inputs, "_citxOutputs": { "contents": [] } })
    }

    fn output(key_hash: &str, policies: &[&str]) -> serde_json::Value {
        let mut value = vec![json!([{ "unCurrencySymbol": "" }, [[{ "unTokenName": "" }, 2_000_000]]])];
        value.extend(
            policies
                .iter()
                .map(|p| json!([{ "unCurrencySymbol": p }, [[{ "unTokenName": "" }, 1]]])),
        );
        json!({
            "address": {
                "addressCredential": { "tag": "PubKeyCredential", "contents": { "getPubKeyHash": key_hash } }
            },
            "value": { "getValue": value }
        })
    }

    fn producing(outputs: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "_citxInputs": [], "_citxOutputs": { "contents": outputs } })
    }

    #[test]
    fn test_authorizing_input() {
        let index = MemoryIndex::default()
            .with("publish", spending(&[("other", 0), ("funding", 1)]))
            .with("other", producing(vec![output("00ff", &[])]))
            .with(
                "funding",
                producing(vec![output("00ff", &[]), output(AUTH_HASH, &[AUTH_POLICY])]),
            );

        assert!(validate_utxo(&index, &auth(), "publish"));
    }

    #[test]
    fn test_token_at_wrong_address() {
        let index = MemoryIndex::default()
            .with("publish", spending(&[("funding", 0)]))
            .with("funding", producing(vec![output("00ff", &[AUTH_POLICY])]));

        assert!(!validate_utxo(&index, &auth(), "publish"));
    }

    #[test]
    fn test_auth_address_without_token() {
        let index = MemoryIndex::default()
            .with("publish", spending(&[("funding", 0)]))
            .with("funding", producing(vec![output(AUTH_HASH, &["abcdef"])]));

        assert!(!validate_utxo(&index, &auth(), "publish"));
    }

    #[test]
    fn test_publishing_tx_unavailable() {
        assert!(!validate_utxo(&MemoryIndex::default(), &auth(), "publish"));
    }

    #[test]
    fn test_missing_input_tx_and_output() {
        let index = MemoryIndex::default()
            .with("publish", spending(&[("gone", 0), ("funding", 3)]))
            .with("funding", producing(vec![output(AUTH_HASH, &[AUTH_POLICY])]));

        assert!(!validate_utxo(&index, &auth(), "publish"));
    }

    #[test]
    fn test_malformed_tx() {
        let index = MemoryIndex::default().with("publish", json!({ "_citxInputs": "nope" }));

        assert!(!validate_utxo(&index, &auth(), "publish"));
    }
}

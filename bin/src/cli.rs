//! CLI interpreter for the reader

use chrono::Utc;
use clap::Parser;
use oracle_datum::{
    read_latest, ChainIndexClient, Network, OgmiosClient, OracleReport, ReaderConfig,
};
use tracing::{info, warn};

use crate::logger::{self, LogLevel};

/// Oracle reader
///
/// Finds the freshest datum at the oracle contract address, checks it was published
/// with the oracle authorization token, and prints its decoded content.
/// Settings not given fall back to the network defaults, where the network has them.
#[derive(Parser)]
#[clap(version, about)]
pub(crate) struct Cli {
    /// Cardano network the oracle publishes to
    #[clap(long, env = "ORACLE_NETWORK", default_value = "preprod")]
    network: Network,

    /// Ogmios endpoint, `ws://` or `http://`
    #[clap(long, env = "ORACLE_OGMIOS_URL")]
    ogmios_url: Option<String>,

    /// Chain index transaction endpoint
    #[clap(long, env = "ORACLE_CHAIN_INDEX_URL")]
    chain_index_url: Option<String>,

    /// Oracle smart contract address
    #[clap(long, env = "ORACLE_ADDRESS")]
    oracle_address: Option<String>,

    /// Address the authorization tokens are held at
    #[clap(long, env = "ORACLE_AUTH_ADDRESS")]
    auth_address: Option<String>,

    /// Policy id of the authorization tokens
    #[clap(long, env = "ORACLE_AUTH_POLICY")]
    auth_policy: Option<String>,

    /// Logging verbosity
    #[clap(long, env = "ORACLE_LOG_LEVEL", value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Emit logs as JSON
    #[clap(long, env = "ORACLE_JSON_LOGS", action = clap::ArgAction::SetTrue)]
    json_logs: bool,
}

impl Cli {
    /// Read and report the latest oracle datum
    pub(crate) fn exec(self) -> anyhow::Result<()> {
        logger::init(self.log_level, self.json_logs)?;

        let settings = self.config().validate()?;
        let chain = OgmiosClient::new(&settings.ogmios_url, settings.chain_query_timeout)?;
        let index = ChainIndexClient::new(settings.chain_index_url.clone())?;

        match read_latest(&chain, &index, &settings, Utc::now())? {
            Some(report) => log_report(&report)?,
            None => info!("No oracle data found"),
        }
        Ok(())
    }

    /// Reader configuration from the command line.
    fn config(&self) -> ReaderConfig {
        let mut config = ReaderConfig::default_for(self.network);
        if let Some(url) = &self.ogmios_url {
            config = config.ogmios_url(url.clone());
        }
        if let Some(url) = &self.chain_index_url {
            config = config.chain_index_url(url.clone());
        }
        if let Some(address) = &self.oracle_address {
            config = config.oracle_address(address.clone());
        }
        if let Some(address) = &self.auth_address {
            config = config.auth_address(address.clone());
        }
        if let Some(policy) = &self.auth_policy {
            config = config.auth_policy(policy.clone());
        }
        config
    }
}

/// Log every part of a report.
fn log_report(report: &OracleReport) -> anyhow::Result<()> {
    let output = &report.utxo.output;
    info!(
        tx_id = report.utxo.input.tx_id.as_str(),
        index = report.utxo.input.index,
        "Transaction"
    );
    info!(address = output.address.as_str(), "Output address");
    info!(datum = report.datum_hex().as_str(), "Raw datum");
    info!("Cost: {} ADA", report.cost_ada());
    info!("Datum:\n{}", report.canonical.to_json_pretty()?);
    info!(identifier = report.identifier().as_str(), "Identifier");
    match report.published_at() {
        Some(published) => {
            info!(
                timestamp = published.to_rfc3339().as_str(),
                millis = report.datum.timestamp,
                "Published"
            );
        },
        None => warn!(millis = report.datum.timestamp, "Publication time out of range"),
    }
    for quote in report.prices.quotes() {
        info!("{}: {}", quote.label, quote.value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_preprod() {
        let cli = Cli::try_parse_from(["oracle-reader"]).expect("Error parsing arguments");
        let settings = cli.config().validate().expect("Error validating config");
        assert_eq!(settings.network, Network::Preprod);
        assert_eq!(settings.ogmios_url.scheme(), "ws");
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "oracle-reader",
            "--network",
            "Preprod",
            "--ogmios-url",
            "http://localhost:1337",
            "--auth-policy",
            "5EC8416ECD8AF5FE338068B2AEE00A028DC1F4C0CD5978FB86D7C038",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .expect("Error parsing arguments");
        assert!(cli.json_logs);

        let settings = cli.config().validate().expect("Error validating config");
        assert_eq!(settings.ogmios_url.as_str(), "http://localhost:1337/");
        assert_eq!(
            settings.auth.policy_id,
            "5ec8416ecd8af5fe338068b2aee00a028dc1f4c0cd5978fb86d7c038"
        );
    }

    #[test]
    fn test_mainnet_needs_settings() {
        let cli = Cli::try_parse_from(["oracle-reader", "--network", "mainnet"])
            .expect("Error parsing arguments");
        assert!(cli.config().validate().is_err());
    }
}

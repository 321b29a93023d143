//! # Runtime Configuration
//!
//! TOML-loaded configuration for one bridge node, validated before any
//! subsystem is constructed.

use anyhow::{bail, Context};
use lb_01_rate_limiter::RateLimitConfig;
use lb_04_supply_oracle::OracleConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainId, Protocol};
use std::path::Path;

/// One oracle signer entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignerEntry {
    /// 20-byte signer address, hex encoded.
    pub address: String,
    /// Shared secret for report signing.
    pub secret: String,
}

/// One enabled chain × protocol route.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Destination chain name.
    pub chain: String,
    /// Protocol name.
    pub protocol: String,
}

/// Top-level runtime configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Chain whose ledger this node serves.
    pub local_chain: String,
    /// Enabled destination routes.
    pub routes: Vec<RouteEntry>,
    /// Oracle signers.
    pub signers: Vec<SignerEntry>,
    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,
    /// Supply oracle configuration.
    pub oracle: OracleConfig,
    /// Seconds between rate-limit window pruning passes.
    pub prune_interval_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let local = ChainId::Ethereum;
        let routes = ChainId::ALL
            .into_iter()
            .filter(|chain| *chain != local)
            .flat_map(|chain| {
                Protocol::ALL.into_iter().map(move |protocol| RouteEntry {
                    chain: chain.as_str().to_string(),
                    protocol: protocol.as_str().to_string(),
                })
            })
            .collect();

        Self {
            local_chain: local.as_str().to_string(),
            routes,
            signers: Vec::new(),
            rate_limit: RateLimitConfig::default(),
            oracle: OracleConfig::default(),
            prune_interval_secs: 300,
        }
    }
}

impl RuntimeConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw).context("parsing config file")?;
        Ok(config)
    }

    /// Validate configuration and resolve typed fields.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.local_chain
            .parse::<ChainId>()
            .map_err(anyhow::Error::msg)?;
        for route in &self.routes {
            route.chain.parse::<ChainId>().map_err(anyhow::Error::msg)?;
            route
                .protocol
                .parse::<Protocol>()
                .map_err(anyhow::Error::msg)?;
        }
        for signer in &self.signers {
            parse_address(&signer.address)?;
            if signer.secret.is_empty() {
                bail!("signer {} has an empty secret", signer.address);
            }
        }
        self.rate_limit.validate().map_err(anyhow::Error::msg)?;
        self.oracle.validate().map_err(anyhow::Error::msg)?;
        if self.prune_interval_secs == 0 {
            bail!("prune_interval_secs cannot be 0");
        }
        Ok(())
    }

    /// The resolved local chain.
    pub fn local_chain_id(&self) -> ChainId {
        self.local_chain
            .parse()
            .expect("validated before construction")
    }
}

/// Parse a hex-encoded 20-byte address.
pub fn parse_address(hex_str: &str) -> anyhow::Result<Address> {
    let bytes = hex::decode(hex_str.trim_start_matches("0x"))
        .with_context(|| format!("address {hex_str} is not hex"))?;
    let address: Address = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("address {hex_str} is not 20 bytes"))?;
    Ok(address)
}

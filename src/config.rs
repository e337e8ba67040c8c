//! Runtime configuration
//!
//! Values are read from the environment (after `.env` is loaded by `main`)
//! and fall back to the Shardeum Sphinx defaults.

use std::env;

use crate::utils::address::Address;

/// Fixed descriptor of the target chain, used for both the switch and the
/// add-chain request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainDescriptor {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub currency_name: String,
    pub currency_symbol: String,
    pub decimals: u8,
    pub explorer_url: String,
}

impl ChainDescriptor {
    /// Shardeum Sphinx 1.X testnet
    pub fn shardeum_sphinx() -> Self {
        Self {
            chain_id: 8080,
            name: "Shardeum Sphinx 1.X".to_string(),
            rpc_url: "https://sphinx.shardeum.org/".to_string(),
            currency_name: "Shardeum".to_string(),
            currency_symbol: "SHM".to_string(),
            decimals: 18,
            explorer_url: "https://explorer-sphinx.shardeum.org".to_string(),
        }
    }

    /// Explorer link for a transaction hash
    pub fn transaction_url(&self, hash: &str) -> String {
        format!("{}/transaction/{}", self.explorer_url.trim_end_matches('/'), hash)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint of the wallet. `None` means no wallet is available.
    pub wallet_rpc_url: Option<String>,

    /// SQLite database holding the local ledger and schedules
    pub database_url: String,

    pub chain: ChainDescriptor,

    /// Crowdfunding campaign receiving contributions
    pub campaign_address: Address,
    pub campaign_name: String,
    pub campaign_goal: f64,

    /// Campus treasury receiving purchases
    pub campus_treasury: Address,

    /// Delay between receipt polls in milliseconds
    pub receipt_poll_ms: u64,

    /// Delay between account/chain checks of the provider watcher
    pub watch_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wallet_rpc_url: Some("http://127.0.0.1:1248".to_string()),
            database_url: "sqlite://payfi.db".to_string(),
            chain: ChainDescriptor::shardeum_sphinx(),
            campaign_address: Address::from_bytes(DEFAULT_CAMPAIGN_ADDRESS),
            campaign_name: "Shardeum dApp Development Fund".to_string(),
            campaign_goal: 1000.0,
            campus_treasury: Address::from_bytes(DEFAULT_CAMPUS_TREASURY),
            receipt_poll_ms: 2000,
            watch_interval_ms: 3000,
        }
    }
}

const DEFAULT_CAMPAIGN_ADDRESS: [u8; 20] = [
    0x74, 0x2d, 0x35, 0xcc, 0x66, 0x34, 0xc0, 0x53, 0x29, 0x25,
    0xa3, 0xb8, 0xd0, 0xb4, 0xe0, 0xa5, 0x42, 0x0c, 0x8b, 0x71,
];

const DEFAULT_CAMPUS_TREASURY: [u8; 20] = [
    0x8b, 0xa1, 0xf1, 0x09, 0x55, 0x1b, 0xd4, 0x32, 0x80, 0x30,
    0x12, 0x64, 0x5a, 0xc1, 0x36, 0xdd, 0xd6, 0x4d, 0xba, 0x72,
];

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("PAYFI_WALLET_RPC_URL") {
            let url = url.trim().to_string();
            config.wallet_rpc_url = if url.is_empty() { None } else { Some(url) };
        }

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }

        if let Ok(id) = env::var("PAYFI_CHAIN_ID") {
            match id.parse() {
                Ok(id) => config.chain.chain_id = id,
                Err(_) => tracing::warn!("Ignoring invalid PAYFI_CHAIN_ID: {}", id),
            }
        }

        if let Ok(name) = env::var("PAYFI_CHAIN_NAME") {
            config.chain.name = name;
        }

        if let Ok(url) = env::var("PAYFI_CHAIN_RPC_URL") {
            config.chain.rpc_url = url;
        }

        if let Ok(symbol) = env::var("PAYFI_CURRENCY_SYMBOL") {
            config.chain.currency_symbol = symbol;
        }

        if let Ok(url) = env::var("PAYFI_EXPLORER_URL") {
            config.chain.explorer_url = url;
        }

        if let Ok(address) = env::var("PAYFI_CAMPAIGN_ADDRESS") {
            match address.parse() {
                Ok(address) => config.campaign_address = address,
                Err(e) => tracing::warn!("Ignoring PAYFI_CAMPAIGN_ADDRESS: {}", e),
            }
        }

        if let Ok(name) = env::var("PAYFI_CAMPAIGN_NAME") {
            config.campaign_name = name;
        }

        if let Ok(goal) = env::var("PAYFI_CAMPAIGN_GOAL") {
            if let Ok(goal) = goal.parse() {
                config.campaign_goal = goal;
            }
        }

        if let Ok(address) = env::var("PAYFI_CAMPUS_TREASURY") {
            match address.parse() {
                Ok(address) => config.campus_treasury = address,
                Err(e) => tracing::warn!("Ignoring PAYFI_CAMPUS_TREASURY: {}", e),
            }
        }

        if let Ok(ms) = env::var("PAYFI_RECEIPT_POLL_MS") {
            if let Ok(ms) = ms.parse() {
                config.receipt_poll_ms = ms;
            }
        }

        if let Ok(ms) = env::var("PAYFI_WATCH_INTERVAL_MS") {
            if let Ok(ms) = ms.parse() {
                config.watch_interval_ms = ms;
            }
        }

        config
    }
}

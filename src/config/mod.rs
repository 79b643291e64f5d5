use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::intelligence::{
    AddressPredicate, ChainParams, PolicyName, RewardParams, ScoringEngine, ScoringPolicy,
};
use crate::sei::{SeiNetwork, DEFAULT_API_ENDPOINTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Stdio,
}

impl FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Transport::Http),
            "stdio" => Ok(Transport::Stdio),
            other => Err(anyhow::anyhow!("ANALYZER_TRANSPORT must be http or stdio, got {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub transport: Transport,
    pub log_json: bool,

    // Sei REST
    pub sei_api_endpoints: Vec<String>,
    pub request_timeout: Duration,
    pub network_cache_ttl: Duration,
    pub chain_id: String,
    pub denom: String,
    pub decimals: u32,
    pub tx_fetch_limit: usize,

    // Scoring
    pub policy: PolicyName,
    pub total_supply: f64,
    pub price_usd: f64,
    pub address_prefix: String,
    pub inflation_rate: f64,
    pub reward_share: f64,

    pub mcp_config_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let chain = ChainParams::default();
        let network = SeiNetwork::default();
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            transport: Transport::Http,
            log_json: false,
            sei_api_endpoints: DEFAULT_API_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            request_timeout: Duration::from_secs(10),
            network_cache_ttl: Duration::from_secs(300),
            chain_id: network.chain_id,
            denom: network.denom,
            decimals: network.decimals,
            tx_fetch_limit: 100,
            policy: PolicyName::Standard,
            total_supply: chain.total_supply,
            price_usd: chain.price_usd,
            address_prefix: "sei1".into(),
            inflation_rate: chain.rewards.inflation_rate,
            reward_share: chain.rewards.reward_share,
            mcp_config_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let sei_api_endpoints: Vec<String> = env::var("SEI_API_ENDPOINTS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let transport = if env::args().any(|a| a == "--stdio") {
            Transport::Stdio
        } else {
            env::var("ANALYZER_TRANSPORT")
                .unwrap_or_else(|_| "http".into())
                .parse()?
        };

        let policy = env::var("ANALYZER_POLICY")
            .unwrap_or_else(|_| "standard".into())
            .parse::<PolicyName>()
            .map_err(|e| anyhow::anyhow!(e))?;

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".into())
                .parse()?,
            transport,
            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),

            sei_api_endpoints: if sei_api_endpoints.is_empty() {
                defaults.sei_api_endpoints
            } else {
                sei_api_endpoints
            },
            request_timeout: Duration::from_secs(parse_or("SEI_REQUEST_TIMEOUT_SECS", 10)),
            network_cache_ttl: Duration::from_secs(parse_or("NETWORK_CACHE_TTL_SECS", 300)),
            chain_id: env::var("SEI_CHAIN_ID").unwrap_or(defaults.chain_id),
            denom: env::var("SEI_DENOM").unwrap_or(defaults.denom),
            decimals: parse_or("SEI_DECIMALS", defaults.decimals),
            tx_fetch_limit: parse_or("TX_FETCH_LIMIT", defaults.tx_fetch_limit),

            policy,
            total_supply: parse_or("SEI_TOTAL_SUPPLY", defaults.total_supply),
            price_usd: parse_or("SEI_PRICE_USD", defaults.price_usd),
            address_prefix: env::var("ANALYZER_ADDRESS_PREFIX").unwrap_or(defaults.address_prefix),
            inflation_rate: parse_or("INFLATION_RATE", defaults.inflation_rate),
            reward_share: parse_or("REWARD_SHARE", defaults.reward_share),

            mcp_config_path: env::var("MCP_CONFIG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn chain_params(&self) -> ChainParams {
        ChainParams {
            total_supply: self.total_supply,
            price_usd: self.price_usd,
            rewards: RewardParams {
                inflation_rate: self.inflation_rate,
                reward_share: self.reward_share,
            },
        }
    }

    pub fn sei_network(&self) -> SeiNetwork {
        SeiNetwork {
            chain_id: self.chain_id.clone(),
            denom: self.denom.clone(),
            decimals: self.decimals,
        }
    }

    pub fn build_engine(&self) -> ScoringEngine {
        ScoringEngine::new(
            ScoringPolicy::preset(self.policy),
            self.chain_params(),
            AddressPredicate::prefix(self.address_prefix.clone()),
        )
    }
}

/// Parse an env var, falling back to `default` when unset or malformed.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable config value");
            default
        }),
        Err(_) => default,
    }
}

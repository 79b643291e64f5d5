pub mod client;
pub mod fetcher;
pub mod types;

pub use client::{SeiClient, SeiClientError, DEFAULT_API_ENDPOINTS};
pub use fetcher::{validate_address, DataFetcher, SeiFetcher, SeiNetwork, MAX_TX_LIMIT};

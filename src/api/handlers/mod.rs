pub mod account;
pub mod analyze;
pub mod mcp;
pub mod network;
pub mod servers;
pub mod status;

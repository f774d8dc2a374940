pub mod config;
pub mod dismissal;
pub mod export;
pub mod fielding;
pub mod http_client;
pub mod scorecard;
pub mod scorecard_fetch;

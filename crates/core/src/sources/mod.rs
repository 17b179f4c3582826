pub mod fetch;
pub mod traits;

// Feed client implementations
pub mod alternative_me;
pub mod blockchain_info;
pub mod coingecko;

pub mod http;

/// Production spot REST host
pub const API_ENDPOINT: &str = "https://api.binance.com";
/// Spot testnet REST host
pub const TESTNET_ENDPOINT: &str = "https://testnet.binance.vision";

pub const PING: &str = "/api/v3/ping";
pub const TIME: &str = "/api/v3/time";
pub const EXCHANGE_INFO: &str = "/api/v3/exchangeInfo";

use super::converters::to_cex_symbol;
use super::endpoints;
use super::types::{ServerTime, SpotExchangeInfo};
use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    HttpTransport, ReqwestTransport, RestClient, RestClientConfig, RestRequest, RestResponse,
};
use crate::core::types::Symbol;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Optional query parameters for `GET /api/v3/exchangeInfo`
#[derive(Debug, Clone, Default)]
pub struct ExchangeInfoParams {
    pub symbol: Option<String>,
    pub symbols: Option<Vec<String>>,
    pub permissions: Option<Vec<String>>,
    pub show_permission_sets: Option<bool>,
    pub symbol_status: Option<String>,
}

impl ExchangeInfoParams {
    /// All entries go into the map, unset ones as null; the kernel's
    /// normalizer drops those before the URL is built.
    fn into_params(self) -> BTreeMap<String, Value> {
        let mut params = BTreeMap::new();
        params.insert(
            "symbol".to_string(),
            self.symbol.map_or(Value::Null, Value::String),
        );
        params.insert(
            "symbols".to_string(),
            self.symbols.map_or(Value::Null, |s| json!(s)),
        );
        params.insert(
            "permissions".to_string(),
            self.permissions.map_or(Value::Null, |p| json!(p)),
        );
        params.insert(
            "showPermissionSets".to_string(),
            self.show_permission_sets.map_or(Value::Null, Value::Bool),
        );
        params.insert(
            "symbolStatus".to_string(),
            self.symbol_status.map_or(Value::Null, Value::String),
        );
        params
    }
}

/// Thin typed wrapper over the transport kernel for Binance spot endpoints
pub struct BinanceSpotRest<T: HttpTransport = ReqwestTransport> {
    client: RestClient<T>,
    base_url: String,
    api_key: Option<String>,
}

impl BinanceSpotRest<ReqwestTransport> {
    pub fn new(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        let client = RestClient::new(RestClientConfig::new("binance".to_string()))?;
        Ok(Self::with_client(client, config))
    }
}

impl<T: HttpTransport> BinanceSpotRest<T> {
    /// Build over an existing client; tests use this to inject a scripted
    /// transport.
    pub fn with_client(client: RestClient<T>, config: &ExchangeConfig) -> Self {
        let base_url = if config.testnet {
            endpoints::TESTNET_ENDPOINT.to_string()
        } else {
            config
                .base_url
                .clone()
                .unwrap_or_else(|| endpoints::API_ENDPOINT.to_string())
        };

        Self {
            client,
            base_url,
            api_key: config.api_key().map(str::to_string),
        }
    }

    fn request(&self, path: &str) -> RestRequest {
        let mut req = RestRequest::get(&self.base_url, path);
        if let Some(key) = &self.api_key {
            req = req.with_api_key(key.clone());
        }
        req
    }

    /// Connectivity check
    pub async fn ping(&self) -> Result<(), ExchangeError> {
        self.client
            .execute::<Value>(&self.request(endpoints::PING))
            .await
            .map(|_| ())
    }

    /// Current server time in milliseconds
    pub async fn server_time(&self) -> Result<RestResponse<ServerTime>, ExchangeError> {
        self.client.execute(&self.request(endpoints::TIME)).await
    }

    /// Current server time in microseconds
    pub async fn server_time_micros(&self) -> Result<RestResponse<ServerTime>, ExchangeError> {
        let req = self.request(endpoints::TIME).with_recv_micros(true);
        self.client.execute(&req).await
    }

    /// Exchange metadata, optionally narrowed by symbol/permission filters
    pub async fn exchange_info(
        &self,
        params: ExchangeInfoParams,
    ) -> Result<RestResponse<SpotExchangeInfo>, ExchangeError> {
        let req = self
            .request(endpoints::EXCHANGE_INFO)
            .with_params(params.into_params());
        self.client.execute(&req).await
    }

    /// All spot symbols, converted to the generic representation
    pub async fn spot_symbols(&self) -> Result<Vec<Symbol>, ExchangeError> {
        let resp = self.exchange_info(ExchangeInfoParams::default()).await?;
        let info = resp.data.ok_or_else(|| {
            ExchangeError::MalformedResponse("empty exchangeInfo response".to_string())
        })?;

        info.symbols.iter().map(to_cex_symbol).collect()
    }
}

use crate::core::errors::{ExchangeError, TransportError};
use crate::core::kernel::params::tidy_request_params;
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Header asking the server to report timestamps in microseconds
pub const HEADER_TIME_UNIT: &str = "X-MBX-TIME-UNIT";
/// Header carrying the API key
pub const HEADER_API_KEY: &str = "X-MBX-APIKEY";

const TIME_UNIT_MICROSECOND: &str = "MICROSECOND";

/// recvWindow violation. Transient when the local clock drifts, so it gets
/// the same retry treatment as a connection failure.
const CODE_RECV_WINDOW: i64 = -1021;

/// Descriptor for one logical API call.
///
/// Immutable for the lifetime of the call: the retry counter is an
/// accumulator inside [`RestClient::execute`], never a field here, so a
/// caller holding the request observes no mutation across attempts.
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub base_url: String,
    pub path: String,
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub params: BTreeMap<String, Value>,
    pub api_key: Option<String>,
    /// Ask the server for microsecond timestamps instead of milliseconds
    pub recv_micros: bool,
}

impl RestRequest {
    pub fn new(method: Method, base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method,
            headers: HashMap::new(),
            params: BTreeMap::new(),
            api_key: None,
            recv_micros: false,
        }
    }

    pub fn get(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::GET, base_url, path)
    }

    #[must_use]
    pub fn with_params(mut self, params: BTreeMap<String, Value>) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_recv_micros(mut self, recv_micros: bool) -> Self {
        self.recv_micros = recv_micros;
        self
    }

    /// Full URL: base + path, plus a percent-encoded query string when any
    /// parameter survives normalization.
    fn url(&self) -> Result<Url, ExchangeError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, self.path))
            .map_err(|e| ExchangeError::InvalidUrl(e.to_string()))?;

        if !self.params.is_empty() {
            let tidied = tidy_request_params(&self.params);
            if !tidied.is_empty() {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in &tidied {
                    pairs.append_pair(key, value);
                }
            }
        }

        Ok(url)
    }

    fn request_headers(&self) -> HashMap<String, String> {
        let mut headers = self.headers.clone();
        if self.recv_micros {
            headers.insert(HEADER_TIME_UNIT.to_string(), TIME_UNIT_MICROSECOND.to_string());
        }
        if let Some(key) = &self.api_key {
            headers.insert(HEADER_API_KEY.to_string(), key.clone());
        }
        headers
    }
}

/// Decoded envelope for one logical call.
///
/// `code` and `msg` are the exchange-defined error fields; on the success
/// path they stay `0` / empty. `data` is `None` for an empty 200 body.
#[derive(Debug, Clone)]
pub struct RestResponse<T> {
    pub status_code: u16,
    pub status: String,
    pub code: i64,
    pub msg: String,
    pub data: Option<T>,
}

/// Exchange error body, `{"code": -1021, "msg": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    msg: Option<String>,
}

/// Raw HTTP response as seen by the transport, before any classification
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

/// One HTTP attempt. `Err` means the request never reached the server or no
/// response was obtainable; the retry loop treats every `Err` as retryable.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        url: &Url,
        headers: &HashMap<String, String>,
    ) -> Result<RawResponse, TransportError>;
}

/// `HttpTransport` over a pooled `reqwest` client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigError(crate::core::config::ConfigError::InvalidConfiguration(
                    format!("Failed to build HTTP client: {}", e),
                ))
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: &Url,
        headers: &HashMap<String, String>,
    ) -> Result<RawResponse, TransportError> {
        let mut request = self.client.request(method, url.clone());
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let body = response.bytes().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason,
            body: body.to_vec(),
        })
    }
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum number of retries for one logical call
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(exchange_name: String) -> Self {
        Self {
            exchange_name,
            timeout_seconds: 30,
            max_retries: 5,
            retry_delay: Duration::from_secs(1),
            user_agent: "spotlink/0.1".to_string(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// REST client: executes one logical call with bounded automatic retry and
/// decodes the typed envelope.
pub struct RestClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    config: RestClientConfig,
}

impl RestClient<ReqwestTransport> {
    pub fn new(config: RestClientConfig) -> Result<Self, ExchangeError> {
        let transport = ReqwestTransport::new(
            Duration::from_secs(config.timeout_seconds),
            &config.user_agent,
        )?;
        Ok(Self { transport, config })
    }
}

impl<T: HttpTransport> RestClient<T> {
    /// Build over an explicit transport. Tests use this seam to script
    /// responses and count attempts.
    pub fn with_transport(transport: T, config: RestClientConfig) -> Self {
        Self { transport, config }
    }

    /// Execute one logical call.
    ///
    /// Connection-level failures and recvWindow rejections (code -1021) are
    /// retried up to `max_retries` times with a fixed delay; everything else
    /// is terminal. The envelope is produced exactly once, from the final
    /// attempt.
    #[instrument(
        skip(self, req),
        fields(exchange = %self.config.exchange_name, method = %req.method, path = %req.path)
    )]
    pub async fn execute<D: DeserializeOwned>(
        &self,
        req: &RestRequest,
    ) -> Result<RestResponse<D>, ExchangeError> {
        let url = req.url()?;
        let headers = req.request_headers();

        let mut retries = 0u32;
        loop {
            let raw = match self.transport.send(req.method.clone(), &url, &headers).await {
                Ok(raw) => raw,
                Err(source) => {
                    if retries < self.config.max_retries {
                        retries += 1;
                        warn!(retries, error = %source, "connection failed, retrying");
                        tokio::time::sleep(self.config.retry_delay).await;
                        continue;
                    }
                    return Err(ExchangeError::RetriesExhausted { retries, source });
                }
            };

            if raw.status != 200 {
                let error: ErrorBody = serde_json::from_slice(&raw.body).map_err(|e| {
                    ExchangeError::MalformedResponse(format!(
                        "error body is not JSON ({}): {}",
                        e,
                        String::from_utf8_lossy(&raw.body)
                    ))
                })?;
                let code = error.code.unwrap_or(0);

                if code == CODE_RECV_WINDOW && retries < self.config.max_retries {
                    retries += 1;
                    warn!(retries, "timestamp outside recvWindow, retrying");
                    tokio::time::sleep(self.config.retry_delay).await;
                    continue;
                }

                return Err(ExchangeError::ApiError {
                    status: raw.status,
                    code,
                    message: error.msg.unwrap_or_default(),
                });
            }

            let data = if raw.body.is_empty() {
                None
            } else {
                Some(serde_json::from_slice(&raw.body).map_err(|e| {
                    ExchangeError::MalformedResponse(format!("response body is not valid: {}", e))
                })?)
            };

            debug!(status = raw.status, retries, "request succeeded");
            return Ok(RestResponse {
                status_code: raw.status,
                status: raw.reason,
                code: 0,
                msg: String::new(),
                data,
            });
        }
    }
}

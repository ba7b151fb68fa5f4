use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::{json, Value};
use spotlink::core::errors::{ExchangeError, TransportError};
use spotlink::core::kernel::{
    HttpTransport, RawResponse, RestClient, RestClientConfig, RestRequest,
};
use spotlink::exchanges::binance::ServerTime;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Script {
    ConnectError,
    Respond {
        status: u16,
        reason: &'static str,
        body: &'static str,
    },
}

/// Scripted transport: counts attempts and records what the kernel sent.
struct MockTransport {
    script: Script,
    calls: Arc<AtomicU32>,
    seen: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(
        &self,
        _method: Method,
        url: &Url,
        headers: &HashMap<String, String>,
    ) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((url.to_string(), headers.clone()));

        match &self.script {
            Script::ConnectError => Err(TransportError("connection refused".to_string())),
            Script::Respond {
                status,
                reason,
                body,
            } => Ok(RawResponse {
                status: *status,
                reason: (*reason).to_string(),
                body: body.as_bytes().to_vec(),
            }),
        }
    }
}

type Recorded = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

fn scripted_client(script: Script) -> (RestClient<MockTransport>, Arc<AtomicU32>, Recorded) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let calls = Arc::new(AtomicU32::new(0));
    let seen: Recorded = Arc::new(Mutex::new(Vec::new()));
    let transport = MockTransport {
        script,
        calls: calls.clone(),
        seen: seen.clone(),
    };
    let config = RestClientConfig::new("binance".to_string()).with_retry_delay(Duration::ZERO);

    (RestClient::with_transport(transport, config), calls, seen)
}

fn time_request() -> RestRequest {
    RestRequest::get("https://mock.test", "/api/v3/time")
}

#[tokio::test]
async fn success_envelope_decodes_typed_payload() {
    let (client, calls, _) = scripted_client(Script::Respond {
        status: 200,
        reason: "OK",
        body: r#"{"serverTime": 1700000000000}"#,
    });

    let resp = client
        .execute::<ServerTime>(&time_request())
        .await
        .unwrap();

    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.status, "OK");
    assert_eq!(resp.code, 0);
    assert!(resp.msg.is_empty());
    assert_eq!(resp.data.unwrap().server_time, 1_700_000_000_000);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_success_body_maps_to_no_payload() {
    let (client, _, _) = scripted_client(Script::Respond {
        status: 200,
        reason: "OK",
        body: "",
    });

    let resp = client.execute::<Value>(&time_request()).await.unwrap();
    assert!(resp.data.is_none());
}

#[tokio::test]
async fn connection_failures_exhaust_after_five_retries() {
    let (client, calls, _) = scripted_client(Script::ConnectError);

    let err = client.execute::<Value>(&time_request()).await.unwrap_err();

    match err {
        ExchangeError::RetriesExhausted { retries, .. } => assert_eq!(retries, 5),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    // 5 retries = 6 total attempts
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn recv_window_violation_retries_then_surfaces_api_error() {
    let (client, calls, _) = scripted_client(Script::Respond {
        status: 409,
        reason: "Conflict",
        body: r#"{"code": -1021, "msg": "Timestamp for this request is outside of the recvWindow."}"#,
    });

    let err = client.execute::<Value>(&time_request()).await.unwrap_err();

    match err {
        ExchangeError::ApiError {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 409);
            assert_eq!(code, -1021);
            assert!(message.contains("recvWindow"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn other_api_errors_are_terminal_on_first_attempt() {
    let (client, calls, _) = scripted_client(Script::Respond {
        status: 400,
        reason: "Bad Request",
        body: r#"{"code": -1100, "msg": "Illegal characters found in a parameter."}"#,
    });

    let err = client.execute::<Value>(&time_request()).await.unwrap_err();

    assert!(matches!(
        err,
        ExchangeError::ApiError {
            status: 400,
            code: -1100,
            ..
        }
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unparsable_error_body_is_malformed_not_retried() {
    let (client, calls, _) = scripted_client(Script::Respond {
        status: 502,
        reason: "Bad Gateway",
        body: "<html>upstream error</html>",
    });

    let err = client.execute::<Value>(&time_request()).await.unwrap_err();

    assert!(matches!(err, ExchangeError::MalformedResponse(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unparsable_success_body_is_malformed() {
    let (client, _, _) = scripted_client(Script::Respond {
        status: 200,
        reason: "OK",
        body: "not json",
    });

    let err = client
        .execute::<ServerTime>(&time_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::MalformedResponse(_)));
}

#[tokio::test]
async fn query_and_headers_are_shaped_before_sending() {
    let (client, _, seen) = scripted_client(Script::Respond {
        status: 200,
        reason: "OK",
        body: "{}",
    });

    let mut params = BTreeMap::new();
    params.insert("a".to_string(), json!(true));
    params.insert("b".to_string(), Value::Null);
    params.insert("c".to_string(), json!([1, 2, 3]));

    let req = RestRequest::get("https://mock.test", "/api/v3/exchangeInfo")
        .with_params(params)
        .with_api_key("test-key")
        .with_recv_micros(true);

    client.execute::<Value>(&req).await.unwrap();

    let recorded = seen.lock().unwrap();
    let (url, headers) = &recorded[0];

    assert!(url.contains("a=true"));
    assert!(url.contains("c=%5B1%2C2%2C3%5D"));
    assert!(!url.contains("b="));
    assert_eq!(
        headers.get("X-MBX-TIME-UNIT").map(String::as_str),
        Some("MICROSECOND")
    );
    assert_eq!(
        headers.get("X-MBX-APIKEY").map(String::as_str),
        Some("test-key")
    );
}

#[tokio::test]
async fn requests_without_params_get_no_query_string() {
    let (client, _, seen) = scripted_client(Script::Respond {
        status: 200,
        reason: "OK",
        body: "{}",
    });

    client.execute::<Value>(&time_request()).await.unwrap();

    let recorded = seen.lock().unwrap();
    assert_eq!(recorded[0].0, "https://mock.test/api/v3/time");
}

//! Dispatcher behavior against a mock Borsdata server

use bd_client::{BorsdataClient, Config, Error, Sleeper};
use bd_core::{param, CalendarKind, Endpoint, HoldingsKind, PriceType, ReportType, Request};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records requested waits instead of sleeping
#[derive(Default)]
struct RecordingSleeper {
  sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
  fn recorded(&self) -> Vec<Duration> {
    self.sleeps.lock().unwrap().clone()
  }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
  async fn sleep(&self, duration: Duration) {
    self.sleeps.lock().unwrap().push(duration);
  }
}

fn init_tracing() {
  let _ = tracing_subscriber::fmt().with_env_filter("debug").with_test_writer().try_init();
}

fn test_config(server: &MockServer) -> Config {
  Config::default_with_key("test_key".to_string()).with_base_url(server.uri())
}

fn client_with_recorder(config: Config) -> (BorsdataClient, Arc<RecordingSleeper>) {
  let sleeper = Arc::new(RecordingSleeper::default());
  let client = BorsdataClient::with_sleeper(config, sleeper.clone()).expect("client");
  (client, sleeper)
}

async fn received_queries(server: &MockServer) -> Vec<String> {
  server
    .received_requests()
    .await
    .unwrap_or_default()
    .iter()
    .map(|r| r.url.query().unwrap_or_default().to_string())
    .collect()
}

#[tokio::test]
async fn test_success_returns_body_unmodified() {
  init_tracing();
  let server = MockServer::start().await;
  let body = json!({"instruments":[{"insId":3,"name":"X"}]});

  Mock::given(method("GET"))
    .and(path("/v1/instruments"))
    .and(query_param("authKey", "test_key"))
    .and(header("Content-Type", "application/json"))
    .and(header("Accept", "application/json"))
    .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
    .expect(1)
    .mount(&server)
    .await;

  let (client, sleeper) = client_with_recorder(test_config(&server));
  let data = client.instruments().all(bd_core::InstrumentOption::Instruments).await.unwrap();

  assert_eq!(data, body);
  assert_eq!(sleeper.recorded(), vec![Duration::from_millis(110)]);
  assert_eq!(received_queries(&server).await, vec!["authKey=test_key".to_string()]);
}

#[tokio::test]
async fn test_kpi_history_path_and_query() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/v1/instruments/3/kpis/2/year/mean/history"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"values": []})))
    .expect(1)
    .mount(&server)
    .await;

  let (client, _) = client_with_recorder(test_config(&server));
  client.kpis().history(3, 2, ReportType::Year, PriceType::Mean, Some(2)).await.unwrap();

  assert_eq!(received_queries(&server).await, vec!["authKey=test_key&maxCount=2".to_string()]);
}

#[tokio::test]
async fn test_absent_optional_params_are_not_sent() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/v1/instruments/3/stockprices"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stockPricesList": []})))
    .mount(&server)
    .await;

  let (client, _) = client_with_recorder(test_config(&server));
  let from = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
  client.stock_prices().for_instrument(3, Some(from), None, None).await.unwrap();
  client.stock_prices().for_instrument(3, None, None, None).await.unwrap();

  let queries = received_queries(&server).await;
  assert_eq!(queries, vec!["authKey=test_key&from=2022-01-01".to_string(), "authKey=test_key".to_string()]);
}

#[tokio::test]
async fn test_rate_limited_requests_are_retried_after_retry_after() {
  init_tracing();
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/v1/instruments/kpis/metadata"))
    .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
    .up_to_n_times(2)
    .with_priority(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .and(path("/v1/instruments/kpis/metadata"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kpiHistoryMetadatas": []})))
    .with_priority(2)
    .mount(&server)
    .await;

  let (client, sleeper) = client_with_recorder(test_config(&server));
  let data = client.kpis().metadata().await.unwrap();

  assert_eq!(data, json!({"kpiHistoryMetadatas": []}));
  assert_eq!(
    sleeper.recorded(),
    vec![Duration::from_secs(2), Duration::from_secs(2), Duration::from_millis(110)]
  );
  assert_eq!(client.rate_limited_count(), 2);

  let requests = server.received_requests().await.unwrap();
  assert_eq!(requests.len(), 3);
  assert!(requests.iter().all(|r| r.url == requests[0].url));
}

#[tokio::test]
async fn test_missing_retry_after_uses_default_wait() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(429))
    .up_to_n_times(1)
    .with_priority(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
    .with_priority(2)
    .mount(&server)
    .await;

  let mut config = test_config(&server);
  config.default_retry_after_secs = 4;
  config.success_delay_ms = 0;
  let (client, sleeper) = client_with_recorder(config);
  client.stock_prices().splits().await.unwrap();

  assert_eq!(sleeper.recorded(), vec![Duration::from_secs(4), Duration::ZERO]);
}

#[tokio::test]
async fn test_oversized_retry_after_uses_default_wait() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1e30"))
    .up_to_n_times(1)
    .with_priority(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kpisCalcUpdated": []})))
    .with_priority(2)
    .mount(&server)
    .await;

  let (client, sleeper) = client_with_recorder(test_config(&server));
  let data = client.kpis().updated().await.unwrap();

  assert_eq!(data, json!({"kpisCalcUpdated": []}));
  assert_eq!(sleeper.recorded(), vec![Duration::from_secs(1), Duration::from_millis(110)]);
}

#[tokio::test]
async fn test_retries_wait_on_shared_rate_limiter() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
    .up_to_n_times(3)
    .with_priority(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
    .with_priority(2)
    .mount(&server)
    .await;

  let mut config = test_config(&server);
  config.rate_limit = 1;
  config.rate_window_secs = 3600;
  config.call_timeout_secs = Some(1);
  let (client, sleeper) = client_with_recorder(config);
  let err = client.kpis().updated().await.unwrap_err();

  assert!(matches!(err, Error::Timeout(_)), "{:?}", err);
  assert_eq!(sleeper.recorded(), vec![Duration::ZERO]);
  assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_retry_cap_surfaces_rate_limit_error() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
    .mount(&server)
    .await;

  let mut config = test_config(&server);
  config.max_rate_limit_retries = Some(1);
  let (client, sleeper) = client_with_recorder(config);
  let err = client.kpis().updated().await.unwrap_err();

  assert!(matches!(err, Error::RateLimit(_)), "{:?}", err);
  assert_eq!(sleeper.recorded(), vec![Duration::from_secs(1)]);
  assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_access_denied_is_distinct() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/v1/instruments/global"))
    .respond_with(ResponseTemplate::new(418).set_body_string("I'm a teapot"))
    .expect(1)
    .mount(&server)
    .await;

  let (client, sleeper) = client_with_recorder(test_config(&server));
  let err = client.instruments().global().await.unwrap_err();

  assert!(err.is_access_denied(), "{:?}", err);
  assert!(matches!(err, Error::AccessDenied(ref path) if path == "instruments/global"));
  assert_eq!(err.status(), Some(418));
  assert!(sleeper.recorded().is_empty());
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(500))
    .expect(1)
    .mount(&server)
    .await;

  let (client, _) = client_with_recorder(test_config(&server));
  let err = client.reports().metadata().await.unwrap_err();

  match err {
    Error::HttpStatus { status, reason } => {
      assert_eq!(status, 500);
      assert_eq!(reason, "Internal Server Error");
    }
    other => panic!("Expected HttpStatus error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_malformed_json_is_a_parse_error() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
    .mount(&server)
    .await;

  let (client, _) = client_with_recorder(test_config(&server));
  let err = client.stock_prices().last().await.unwrap_err();

  assert!(matches!(err, Error::Parse(_)), "{:?}", err);
}

#[tokio::test]
async fn test_missing_credential_prevents_any_request() {
  let server = MockServer::start().await;

  let config = Config::default_with_key(String::new()).with_base_url(server.uri());
  let result = BorsdataClient::new(config);

  assert!(matches!(result, Err(Error::MissingCredential(_))));
  assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_call_deadline_bounds_the_whole_call() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({})).set_delay(Duration::from_secs(5)))
    .mount(&server)
    .await;

  let mut config = test_config(&server);
  config.call_timeout_secs = Some(1);
  let (client, _) = client_with_recorder(config);
  let err = client.kpis().updated().await.unwrap_err();

  assert!(matches!(err, Error::Timeout(_)), "{:?}", err);
}

#[tokio::test]
async fn test_list_endpoints_send_inst_list() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
    .mount(&server)
    .await;

  let (client, _) = client_with_recorder(test_config(&server));
  client.holdings().holdings(HoldingsKind::Insider, &[2, 3, 6]).await.unwrap();
  client.calendar().calendar(CalendarKind::Report, &[2]).await.unwrap();
  client.reports().for_list(&[2, 3], Some(2), None, Some(true)).await.unwrap();

  let requests = server.received_requests().await.unwrap();
  let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
  assert_eq!(paths, vec!["/v1/holdings/insider", "/v1/instruments/report/calendar", "/v1/instruments/reports"]);

  assert_eq!(requests[0].url.query(), Some("authKey=test_key&instList=2%2C3%2C6"));
  let pairs: Vec<(String, String)> = requests[0].url.query_pairs().into_owned().collect();
  assert_eq!(pairs[0], ("authKey".to_string(), "test_key".to_string()));
  assert_eq!(pairs[1], ("instList".to_string(), "2,3,6".to_string()));

  let pairs: Vec<(String, String)> = requests[2].url.query_pairs().into_owned().collect();
  let names: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
  assert_eq!(names, vec!["authKey", "instList", "maxYearCount", "original"]);
  assert_eq!(pairs[3].1, "1");
}

#[tokio::test]
async fn test_oversized_inst_list_rejected_before_request() {
  let server = MockServer::start().await;

  let (client, _) = client_with_recorder(test_config(&server));
  let ids: Vec<u32> = (1..=51).collect();
  let err = client.stock_prices().for_list(&ids, None, None).await.unwrap_err();

  assert!(matches!(err, Error::InvalidParameter(_)));
  assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_generic_call_with_request_descriptor() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/v1/instruments/stockprices/global/date"))
    .and(query_param("date", "2023-08-15"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stockPricesList": [{"i": 3}]})))
    .expect(1)
    .mount(&server)
    .await;

  let (client, _) = client_with_recorder(test_config(&server));
  let request = Request::new(Endpoint::GlobalStockPricesForDate).param(param::DATE, Some("2023-08-15"));
  let data: Value = client.call(&request).await.unwrap();

  assert_eq!(data["stockPricesList"][0]["i"], 3);
}

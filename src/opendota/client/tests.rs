//! Unit tests for the request dispatcher

use super::*;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::{
    matchers::{header, method, path, query_param, query_param_is_missing},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

/// Unpaced config pointed at the mock server.
fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(format!("{}/api", server.uri()))
        .with_delay(Duration::ZERO)
}

/// Responds with a fixed body and remembers when each request arrived.
#[derive(Clone)]
struct ArrivalRecorder {
    arrivals: Arc<Mutex<Vec<Instant>>>,
    body: serde_json::Value,
}

impl Respond for ArrivalRecorder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals.lock().unwrap().push(Instant::now());
        ResponseTemplate::new(200).set_body_json(&self.body)
    }
}

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn test_default_client_is_paced_and_unauthenticated() {
        let client = OpenDota::new(ClientConfig::default()).unwrap();

        assert!(!client.is_authenticated());
        assert!(client.is_paced());
        assert_eq!(client.format(), OutputFormat::Typed);
        assert_eq!(client.auth_method(), AuthMethod::Header);
        assert_eq!(client.base_url(), "https://api.opendota.com/api");
        assert_eq!(client.data_dir(), None);
        assert_eq!(client.fantasy(), &FantasyWeights::default());
    }

    #[test]
    fn test_api_key_disables_pacing() {
        let client = OpenDota::new(ClientConfig::default().with_api_key("k")).unwrap();

        assert!(client.is_authenticated());
        assert!(!client.is_paced());
    }

    #[test]
    fn test_zero_delay_disables_pacing() {
        let client = OpenDota::new(ClientConfig::default().with_delay(Duration::ZERO)).unwrap();
        assert!(!client.is_paced());
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let client = OpenDota::new(
            ClientConfig::default().with_base_url("http://localhost:1234/api/"),
        )
        .unwrap();

        assert_eq!(client.url_for("heroes"), "http://localhost:1234/api/heroes");
        assert_eq!(client.url_for("/heroes"), "http://localhost:1234/api/heroes");
    }

    #[test]
    fn test_invalid_fantasy_key_rejected() {
        let mut overrides = BTreeMap::new();
        overrides.insert("goals".to_string(), 1.0);

        let err = OpenDota::new(ClientConfig::default().with_fantasy(overrides)).unwrap_err();
        assert!(matches!(err, OpenDotaError::InvalidFantasyKey { .. }));
    }

    #[test]
    fn test_fantasy_overrides_applied() {
        let mut overrides = BTreeMap::new();
        overrides.insert("kills".to_string(), 0.4);

        let client = OpenDota::new(ClientConfig::default().with_fantasy(overrides)).unwrap();
        assert_eq!(client.fantasy().get("kills"), Some(0.4));
    }

    #[test]
    fn test_data_dir_created_on_construction() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("dota2");

        let client = OpenDota::new(ClientConfig::default().with_data_dir(&dir)).unwrap();

        assert!(dir.is_dir());
        assert_eq!(client.data_dir(), Some(dir.as_path()));
    }

    #[test]
    fn test_api_key_with_newline_rejected_for_header_auth() {
        let err = OpenDota::new(ClientConfig::default().with_api_key("bad\nkey")).unwrap_err();
        assert!(matches!(err, OpenDotaError::InvalidHeader(_)));
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let client = OpenDota::new(ClientConfig::default().with_api_key("super-secret")).unwrap();
        let debug = format!("{:?}", client);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_close_consumes_client() {
        let client = OpenDota::new(ClientConfig::default()).unwrap();
        client.close();
    }
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_json_returns_decoded_body() {
        let mock_server = MockServer::start().await;
        let body = json!([{"id": 1, "name": "npc_dota_hero_antimage"}]);

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OpenDota::new(mock_config(&mock_server)).unwrap();
        let result = client.get_json("heroes", &QueryParams::new()).await.unwrap();

        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn test_unset_params_not_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/publicMatches"))
            .and(query_param("mmr_ascending", "3000"))
            .and(query_param_is_missing("mmr_descending"))
            .and(query_param_is_missing("less_than_match_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OpenDota::new(mock_config(&mock_server)).unwrap();
        let mut q = QueryParams::new();
        q.push_opt("mmr_ascending", Some(3000))
            .push_opt("mmr_descending", None::<u32>)
            .push_opt("less_than_match_id", None::<u64>);

        client.get_json("publicMatches", &q).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("mmr_ascending=3000"));
    }

    #[tokio::test]
    async fn test_header_auth_keeps_key_out_of_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .and(header("authorization", "Bearer test-key"))
            .and(query_param_is_missing("api_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = mock_config(&mock_server)
            .with_api_key("test-key")
            .with_auth_method(AuthMethod::Header);
        let client = OpenDota::new(config).unwrap();

        client.get_json("heroes", &QueryParams::new()).await.unwrap();
    }

    #[tokio::test]
    async fn test_query_auth_keeps_key_out_of_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = mock_config(&mock_server)
            .with_api_key("test-key")
            .with_auth_method(AuthMethod::Query);
        let client = OpenDota::new(config).unwrap();

        client.get_json("heroes", &QueryParams::new()).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_unauthenticated_sends_no_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .and(query_param_is_missing("api_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let client = OpenDota::new(mock_config(&mock_server)).unwrap();
        client.get_json("heroes", &QueryParams::new()).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_404_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/matches/1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Not Found"})))
            .mount(&mock_server)
            .await;

        let client = OpenDota::new(mock_config(&mock_server)).unwrap();
        let err = client.get_json("matches/1", &QueryParams::new()).await.unwrap_err();

        assert!(err.is_not_found());
        match err {
            OpenDotaError::NotFound { endpoint } => assert_eq!(endpoint, "matches/1"),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_429_is_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OpenDota::new(mock_config(&mock_server)).unwrap();
        let err = client.get_json("heroes", &QueryParams::new()).await.unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(err.status(), Some(429));
    }

    #[tokio::test]
    async fn test_other_status_is_api_error_with_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OpenDota::new(mock_config(&mock_server)).unwrap();
        let err = client.get_json("heroes", &QueryParams::new()).await.unwrap_err();

        match err {
            OpenDotaError::Api {
                status, message, ..
            } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "database unavailable");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_reason_phrase() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = OpenDota::new(mock_config(&mock_server)).unwrap();
        let err = client.get_json("heroes", &QueryParams::new()).await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = OpenDota::new(mock_config(&mock_server)).unwrap();
        let err = client.get_json("heroes", &QueryParams::new()).await.unwrap_err();

        assert!(matches!(err, OpenDotaError::Api { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_api_error_without_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let config = mock_config(&mock_server).with_timeout(Duration::from_millis(50));
        let client = OpenDota::new(config).unwrap();
        let err = client.get_json("heroes", &QueryParams::new()).await.unwrap_err();

        match err {
            OpenDotaError::Api { status, source, .. } => {
                assert_eq!(status, None);
                assert!(source.map(|e| e.is_timeout()).unwrap_or(false));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_api_error() {
        // Grab a free port, then release it so nothing answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig::default()
            .with_base_url(format!("http://{addr}/api"))
            .with_delay(Duration::ZERO);
        let client = OpenDota::new(config).unwrap();
        let err = client.get_json("heroes", &QueryParams::new()).await.unwrap_err();

        assert!(matches!(err, OpenDotaError::Api { status: None, .. }));
    }
}

#[cfg(test)]
mod pacing_tests {
    use super::*;

    #[tokio::test]
    async fn test_unauthenticated_calls_are_spaced_by_delay() {
        let mock_server = MockServer::start().await;
        let recorder = ArrivalRecorder {
            arrivals: Arc::new(Mutex::new(Vec::new())),
            body: json!([]),
        };

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(recorder.clone())
            .expect(2)
            .mount(&mock_server)
            .await;

        let delay = Duration::from_millis(300);
        let client = OpenDota::new(mock_config(&mock_server).with_delay(delay)).unwrap();

        client.get_json("heroes", &QueryParams::new()).await.unwrap();
        client.get_json("heroes", &QueryParams::new()).await.unwrap();

        let arrivals = recorder.arrivals.lock().unwrap();
        assert_eq!(arrivals.len(), 2);
        assert!(arrivals[1] - arrivals[0] >= delay);
    }

    #[tokio::test]
    async fn test_failed_call_still_counts_for_pacing() {
        let mock_server = MockServer::start().await;
        let recorder = ArrivalRecorder {
            arrivals: Arc::new(Mutex::new(Vec::new())),
            body: json!([]),
        };

        Mock::given(method("GET"))
            .and(path("/api/matches/1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(recorder.clone())
            .mount(&mock_server)
            .await;

        let delay = Duration::from_millis(300);
        let client = OpenDota::new(mock_config(&mock_server).with_delay(delay)).unwrap();

        let before_first = Instant::now();
        assert!(client.get_json("matches/1", &QueryParams::new()).await.is_err());
        client.get_json("heroes", &QueryParams::new()).await.unwrap();

        let arrivals = recorder.arrivals.lock().unwrap();
        assert!(arrivals[0] - before_first >= delay);
    }

    #[tokio::test]
    async fn test_authenticated_calls_are_not_paced() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(3)
            .mount(&mock_server)
            .await;

        let config = mock_config(&mock_server)
            .with_delay(Duration::from_secs(10))
            .with_api_key("key");
        let client = OpenDota::new(config).unwrap();

        let start = Instant::now();
        for _ in 0..3 {
            client.get_json("heroes", &QueryParams::new()).await.unwrap();
        }

        assert!(start.elapsed() < Duration::from_secs(5));
    }
}

#[cfg(test)]
mod recording_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_response_recorded() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();
        let body = json!([{"match_id": 42}]);

        Mock::given(method("GET"))
            .and(path("/api/proMatches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let config = mock_config(&mock_server)
            .with_data_dir(temp_dir.path())
            .with_api_key("secret")
            .with_auth_method(AuthMethod::Query);
        let client = OpenDota::new(config).unwrap();

        let mut q = QueryParams::new();
        q.push("less_than_match_id", 100);
        client.get_json("proMatches", &q).await.unwrap();

        let recorded = temp_dir
            .path()
            .join("cache")
            .join("proMatches")
            .join("less_than_match_id=100.json");
        let contents = std::fs::read_to_string(&recorded).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&contents).unwrap(), body);
        assert!(!contents.contains("secret"));
    }

    #[tokio::test]
    async fn test_failed_response_not_recorded() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client =
            OpenDota::new(mock_config(&mock_server).with_data_dir(temp_dir.path())).unwrap();
        assert!(client.get_json("heroes", &QueryParams::new()).await.is_err());

        assert!(!temp_dir.path().join("cache").join("heroes").exists());
    }

    #[tokio::test]
    async fn test_recording_disabled() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let config = mock_config(&mock_server)
            .with_data_dir(temp_dir.path())
            .with_record_responses(false);
        let client = OpenDota::new(config).unwrap();
        client.get_json("heroes", &QueryParams::new()).await.unwrap();

        assert!(!temp_dir.path().join("cache").exists());
    }

    #[tokio::test]
    async fn test_replay_serves_recorded_body_without_network() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();
        let body = json!([
            {"id": 1, "name": "npc_dota_hero_antimage", "localized_name": "Anti-Mage"}
        ]);

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = mock_config(&mock_server)
            .with_data_dir(temp_dir.path())
            .with_replay_cache(true);
        let client = OpenDota::new(config).unwrap();

        let first = client.get_json("heroes", &QueryParams::new()).await.unwrap();
        let second = client.get_json("heroes", &QueryParams::new()).await.unwrap();

        assert_eq!(first, body);
        assert_eq!(second, body);
    }

    #[tokio::test]
    async fn test_without_replay_every_call_hits_network() {
        let mock_server = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/heroes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client =
            OpenDota::new(mock_config(&mock_server).with_data_dir(temp_dir.path())).unwrap();
        client.get_json("heroes", &QueryParams::new()).await.unwrap();
        client.get_json("heroes", &QueryParams::new()).await.unwrap();
    }
}

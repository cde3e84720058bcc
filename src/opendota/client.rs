//! The OpenDota HTTP client and its request dispatcher.

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt, fs, path::PathBuf};
use tracing::{debug, info, warn};

use crate::config::{AuthMethod, ClientConfig, OutputFormat};
use crate::core::{Pacer, QueryParams, RequestKey, ResponseCache};
use crate::fantasy::FantasyWeights;
use crate::response::{map_response, Payload};
use crate::{OpenDotaError, Result};

#[cfg(test)]
mod tests;

const USER_AGENT: &str = concat!("opendota-rs/", env!("CARGO_PKG_VERSION"));

/// Client for the OpenDota REST API.
///
/// The connection pool lives as long as the client. Drop it, or call
/// [`OpenDota::close`], to release it.
///
/// ```rust,no_run
/// use opendota::{ClientConfig, OpenDota, MatchId};
///
/// # async fn example() -> opendota::Result<()> {
/// let client = OpenDota::new(ClientConfig::from_env())?;
/// let m = client.get_match(MatchId::new(8461956309)).await?.into_typed()?;
/// println!("{} seconds, radiant won: {}", m.duration, m.radiant_win);
/// client.close();
/// # Ok(())
/// # }
/// ```
pub struct OpenDota {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    auth_method: AuthMethod,
    auth_headers: HeaderMap,
    format: OutputFormat,
    pacer: Option<Pacer>,
    data_dir: Option<PathBuf>,
    cache: Option<ResponseCache>,
    record_responses: bool,
    replay_cache: bool,
    fantasy: FantasyWeights,
}

impl OpenDota {
    /// Validate `config` and open the HTTP connection pool.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let fantasy = match &config.fantasy {
            Some(overrides) => FantasyWeights::with_overrides(overrides)?,
            None => FantasyWeights::default(),
        };

        let api_key = config.effective_api_key().map(str::to_string);

        let mut auth_headers = HeaderMap::new();
        auth_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let (Some(key), AuthMethod::Header) = (&api_key, config.auth_method) {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))?;
            value.set_sensitive(true);
            auth_headers.insert(AUTHORIZATION, value);
        }

        if let Some(dir) = &config.data_dir {
            fs::create_dir_all(dir)?;
        }
        let cache = config.data_dir.as_deref().map(ResponseCache::new);

        // Authenticated clients get the higher quota and skip pacing
        let pacer =
            (api_key.is_none() && !config.delay.is_zero()).then(|| Pacer::new(config.delay));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        debug!(
            base_url = %config.base_url,
            authenticated = api_key.is_some(),
            auth_method = %config.auth_method,
            format = %config.format,
            "OpenDota client ready"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            auth_method: config.auth_method,
            auth_headers,
            format: config.format,
            pacer,
            data_dir: config.data_dir,
            cache,
            record_responses: config.record_responses,
            replay_cache: config.replay_cache,
            fantasy,
        })
    }

    /// Release the connection pool. Equivalent to dropping the client.
    pub fn close(self) {
        debug!(base_url = %self.base_url, "closing OpenDota client");
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }

    /// Whether calls are spaced out by the configured delay.
    pub fn is_paced(&self) -> bool {
        self.pacer.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn data_dir(&self) -> Option<&std::path::Path> {
        self.data_dir.as_deref()
    }

    /// Fantasy weights as configured. Carried for callers; unused here.
    pub fn fantasy(&self) -> &FantasyWeights {
        &self.fantasy
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// GET `endpoint` and return the decoded JSON body.
    ///
    /// Works for any endpoint, including ones without a dedicated method.
    pub async fn get_json(&self, endpoint: &str, query: &QueryParams) -> Result<Value> {
        let endpoint = endpoint.trim_matches('/');
        let key = RequestKey { endpoint, query };

        if self.replay_cache {
            if let Some(body) = self.cache.as_ref().and_then(|c| c.load(key)) {
                info!(endpoint, "serving recorded response");
                return Ok(body);
            }
        }

        // Held until this function returns so the completion time is stamped
        // after the body has been read.
        let _pace = match &self.pacer {
            Some(pacer) => Some(pacer.acquire().await),
            None => None,
        };

        let mut params: Vec<(&str, &str)> = query
            .pairs()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if let (Some(api_key), AuthMethod::Query) = (&self.api_key, self.auth_method) {
            params.push(("api_key", api_key.as_str()));
        }

        debug!(
            endpoint,
            params = query.len(),
            authenticated = self.api_key.is_some(),
            "GET"
        );

        let res = self
            .http
            .get(self.url_for(endpoint))
            .headers(self.auth_headers.clone())
            .query(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(classify_failure(endpoint, res).await);
        }

        let body = res.json::<Value>().await?;
        self.record(key, &body);

        Ok(body)
    }

    /// GET and map into the configured representation.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &QueryParams,
    ) -> Result<Payload<T>> {
        let body = self.get_json(endpoint, query).await?;
        map_response(body, self.format)
    }

    fn record(&self, key: RequestKey<'_>, body: &Value) {
        if !self.record_responses {
            return;
        }
        let Some(cache) = &self.cache else {
            return;
        };
        match cache.store(key, body) {
            Ok(path) => debug!(path = %path.display(), "recorded response"),
            Err(e) => warn!(endpoint = key.endpoint, error = %e, "failed to record response"),
        }
    }
}

/// 404 and 429 get their own kinds; everything else is a generic API error
/// carrying the status and body text.
async fn classify_failure(endpoint: &str, res: Response) -> OpenDotaError {
    let status = res.status();
    warn!(endpoint, status = status.as_u16(), "OpenDota request failed");

    match status {
        StatusCode::NOT_FOUND => OpenDotaError::NotFound {
            endpoint: endpoint.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => OpenDotaError::RateLimited {
            endpoint: endpoint.to_string(),
        },
        _ => {
            let text = res.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            } else {
                text
            };
            OpenDotaError::Api {
                status: Some(status.as_u16()),
                message,
                source: None,
            }
        }
    }
}

impl fmt::Debug for OpenDota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenDota")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("auth_method", &self.auth_method)
            .field("format", &self.format)
            .field("paced", &self.pacer.as_ref().map(Pacer::delay))
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

//! HTTP data source for the Amazing Marvin API.
//!
//! Every request is a GET with the `X-API-Token` header and is bounded by
//! the client's timeout. Requests are keyed by resource: starting a request
//! for a key that already has one in flight aborts the older request, which
//! then resolves to [`ApiError::Superseded`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::model::config::AppConfig;
use crate::model::query::{Query, QueryError};
use crate::model::record::{Label, Record};
use crate::ops::pipeline::{Digest, assemble};
use crate::ops::tree::TreeError;

/// Header carrying the API token
pub const API_TOKEN_HEADER: &str = "X-API-Token";

/// Resource key for the category list
pub const CATEGORIES: &str = "categories";

/// Resource key for the label list
pub const LABELS: &str = "labels";

/// Errors that can occur while fetching data.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{key}: server answered {status} (check the API token)")]
    Status { key: String, status: u16 },
    #[error("{key}: no response within {timeout:?}")]
    Timeout { key: String, timeout: Duration },
    #[error("{key}: superseded by a newer request")]
    Superseded { key: String },
    #[error("{key}: request task failed: {message}")]
    Task { key: String, message: String },
    #[error("invalid API token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("{0}")]
    Query(#[from] QueryError),
    #[error("{0}")]
    Tree(#[from] TreeError),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}

struct InFlight {
    ticket: u64,
    abort: AbortHandle,
}

type InFlightTable = Arc<Mutex<HashMap<String, InFlight>>>;

/// Held by the caller while its request runs. Dropping it, whether the
/// request finished, timed out or the caller went away, aborts the task and
/// clears its table entry unless a newer request has taken the key.
struct InFlightGuard {
    table: InFlightTable,
    key: String,
    ticket: u64,
    abort: AbortHandle,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.abort.abort();
        let mut in_flight = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight.get(&self.key).is_some_and(|f| f.ticket == self.ticket) {
            in_flight.remove(&self.key);
        }
    }
}

/// Client for the remote data source. Clones share the in-flight table.
#[derive(Clone)]
pub struct MarvinClient {
    http: Client,
    base_url: String,
    token: String,
    timeout: Duration,
    in_flight: InFlightTable,
    next_ticket: Arc<AtomicU64>,
}

impl MarvinClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().pool_max_idle_per_host(4).build()?;
        Ok(MarvinClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_ticket: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        MarvinClient::new(&config.base_url, &config.api_token, config.timeout())
    }

    /// GET `{base_url}/{key}` and decode the JSON body.
    pub async fn get<T>(&self, key: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = format!("{}/{}", self.base_url, key);
        let request = self
            .http
            .get(&url)
            .header(API_TOKEN_HEADER, HeaderValue::from_str(&self.token)?);

        let task_key = key.to_string();
        let handle = tokio::spawn(async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status {
                    key: task_key,
                    status: status.as_u16(),
                });
            }
            let body = response.bytes().await?;
            Ok(serde_json::from_slice::<T>(&body)?)
        });
        let guard = self.register(key, handle.abort_handle());

        debug!(url = %url, "request started");
        let outcome = tokio::time::timeout(self.timeout, handle).await;
        drop(guard);

        match outcome {
            Err(_) => {
                warn!(key, timeout_ms = self.timeout.as_millis(), "request timed out");
                Err(ApiError::Timeout {
                    key: key.to_string(),
                    timeout: self.timeout,
                })
            }
            Ok(Err(e)) if e.is_cancelled() => {
                debug!(key, "request superseded");
                Err(ApiError::Superseded {
                    key: key.to_string(),
                })
            }
            Ok(Err(e)) => Err(ApiError::Task {
                key: key.to_string(),
                message: e.to_string(),
            }),
            Ok(Ok(result)) => result,
        }
    }

    /// Records for a resource key, subtasks already normalized to lists
    pub async fn fetch_records(&self, key: &str) -> Result<Vec<Record>, ApiError> {
        self.get(key).await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Record>, ApiError> {
        self.fetch_records(CATEGORIES).await
    }

    pub async fn fetch_labels(&self) -> Result<Vec<Label>, ApiError> {
        self.get(LABELS).await
    }

    /// Fetch everything a query needs and shape it into a digest.
    ///
    /// Tasks, categories and (when shown) labels are requested together.
    /// A failed label fetch is logged and treated as no labels.
    pub async fn fetch_digest(&self, query: &Query) -> Result<Digest, ApiError> {
        let key = resource_key(query)?;
        info!(key = %key, "fetching items");

        let labels = async {
            if !query.show_label {
                return Vec::new();
            }
            match self.fetch_labels().await {
                Ok(labels) => labels,
                Err(e) => {
                    warn!(error = %e, "labels unavailable, continuing without them");
                    Vec::new()
                }
            }
        };

        let (tasks, categories, labels) =
            tokio::join!(self.fetch_records(&key), self.fetch_categories(), labels);
        let (tasks, categories) = (tasks?, categories?);
        debug!(
            tasks = tasks.len(),
            categories = categories.len(),
            "fetched records"
        );

        Ok(assemble(query, categories, tasks, labels)?)
    }

    /// Track a new request for `key`, aborting any older one for it
    fn register(&self, key: &str, abort: AbortHandle) -> InFlightGuard {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = InFlight {
            ticket,
            abort: abort.clone(),
        };
        if let Some(previous) = in_flight.insert(key.to_string(), entry) {
            previous.abort.abort();
        }
        InFlightGuard {
            table: Arc::clone(&self.in_flight),
            key: key.to_string(),
            ticket,
            abort,
        }
    }
}

/// The resource key a query fetches, including its date parameter
pub fn resource_key(query: &Query) -> Result<String, QueryError> {
    let endpoint = query.query_type()?.endpoint();
    Ok(match query.date {
        Some(date) => format!("{}?date={}", endpoint, date.format("%Y-%m-%d")),
        None => endpoint.to_string(),
    })
}

// src/client/gateway.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::sync::watch;
use url::Url;

use crate::client::cache::{OfflineCache, OfflineQueueEntry};
use crate::client::error::ClientError;
use crate::client::fallback;
use crate::client::resource::Resource;
use crate::models::{
    progress::UserProgress, question::QuestionHit, secret::SurgerySecret, topic::Topic,
};

/// Callers only search with at least this many characters; shorter queries
/// resolve to no results without a request.
const MIN_SEARCH_LEN: usize = 3;

/// How a 401 response is surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// Treat 401 like any other HTTP failure.
    #[default]
    Error,
    /// Map 401 to a null result instead of failing.
    ReturnNull,
}

/// Whether successfully fetched data can go stale within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefetchPolicy {
    /// Fetched resources never go stale; repeat reads are served from the
    /// session memo without touching the network.
    #[default]
    Never,
    /// Every read goes to the network.
    Always,
}

/// Outcome of a progress write.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressWrite {
    /// The server accepted the write; carries the echoed record.
    Synced(UserProgress),
    /// The network was unreachable. The record was stored locally and
    /// queued for the sync agent.
    Queued,
}

/// HTTP gateway to the quiz API with offline mirroring and fallback.
///
/// Cheap to clone; clones share the session memo.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    cache: OfflineCache,
    on_unauthorized: UnauthorizedPolicy,
    refetch: RefetchPolicy,
    online: Option<watch::Receiver<bool>>,
    memo: Arc<Mutex<HashMap<Resource, Value>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, cache: OfflineCache) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            cache,
            on_unauthorized: UnauthorizedPolicy::default(),
            refetch: RefetchPolicy::default(),
            online: None,
            memo: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn with_unauthorized_policy(mut self, policy: UnauthorizedPolicy) -> Self {
        self.on_unauthorized = policy;
        self
    }

    pub fn with_refetch_policy(mut self, policy: RefetchPolicy) -> Self {
        self.refetch = policy;
        self
    }

    /// Attaches the connectivity signal. Without one the client assumes it
    /// is online.
    pub fn with_connectivity(mut self, online: watch::Receiver<bool>) -> Self {
        self.online = Some(online);
        self
    }

    pub fn cache(&self) -> &OfflineCache {
        &self.cache
    }

    pub fn is_online(&self) -> bool {
        self.online.as_ref().is_none_or(|rx| *rx.borrow())
    }

    fn memo_lock(&self) -> std::sync::MutexGuard<'_, HashMap<Resource, Value>> {
        self.memo.lock().expect("session memo lock poisoned")
    }

    /// Issues a request and fails on any non-2xx status, carrying the
    /// status code and response body text. No offline fallback on this
    /// path.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let url = self.base_url.join(path)?;
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::into_json(response).await
    }

    /// Cache-aware GET used for reads the UI can survive offline.
    ///
    /// On success the response is mirrored into the offline cache (topics
    /// and secrets) and memoized for the session. On a transport failure
    /// the fallback resolver substitutes cached data; without a usable
    /// substitute the original error propagates. HTTP error statuses are
    /// never masked by the fallback.
    pub async fn fetch_resource(&self, resource: &Resource) -> Result<Value, ClientError> {
        if self.refetch == RefetchPolicy::Never {
            if let Some(hit) = self.memo_lock().get(resource) {
                return Ok(hit.clone());
            }
        }

        let url = resource.url(&self.base_url);
        match self.http.get(url).send().await {
            Ok(response) => {
                if self.on_unauthorized == UnauthorizedPolicy::ReturnNull
                    && response.status() == StatusCode::UNAUTHORIZED
                {
                    return Ok(Value::Null);
                }
                let value = Self::into_json(response).await?;
                self.mirror(resource, &value).await;
                self.memo_lock().insert(resource.clone(), value.clone());
                Ok(value)
            }
            Err(err) => {
                tracing::debug!("network request failed, trying offline data: {}", err);
                match fallback::resolve(&self.cache, resource).await {
                    Some(value) => Ok(value),
                    None => Err(err.into()),
                }
            }
        }
    }

    pub async fn topics(&self) -> Result<Vec<Topic>, ClientError> {
        let value = self.fetch_resource(&Resource::Topics).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn topic(&self, label: &str) -> Result<Topic, ClientError> {
        let value = self
            .fetch_resource(&Resource::Topic(label.to_string()))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn secrets(&self) -> Result<Vec<SurgerySecret>, ClientError> {
        let value = self.fetch_resource(&Resource::Secrets).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn search_questions(&self, query: &str) -> Result<Vec<QuestionHit>, ClientError> {
        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }
        let value = self
            .fetch_resource(&Resource::SearchQuestions(query.to_string()))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn search_secrets(&self, query: &str) -> Result<Vec<SurgerySecret>, ClientError> {
        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }
        let value = self
            .fetch_resource(&Resource::SearchSecrets(query.to_string()))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn progress(&self, topic_label: &str) -> Result<UserProgress, ClientError> {
        let value = self
            .fetch_resource(&Resource::Progress(topic_label.to_string()))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Submits a progress write.
    ///
    /// Server rejections (4xx/5xx) surface as hard errors and are not
    /// queued. A transport failure stores the record in the local mirror
    /// and appends it to the offline queue instead.
    pub async fn submit_progress(
        &self,
        progress: &UserProgress,
    ) -> Result<ProgressWrite, ClientError> {
        let url = self.base_url.join("/api/progress")?;
        let request = self.http.post(url).json(progress);
        match request.send().await {
            Ok(response) => {
                let value = Self::into_json(response).await?;
                let stored: UserProgress = serde_json::from_value(value)?;
                if let Err(err) = self.cache.store_progress(&stored).await {
                    tracing::warn!("failed to mirror progress into offline cache: {}", err);
                }
                Ok(ProgressWrite::Synced(stored))
            }
            Err(err) => {
                tracing::debug!("progress write failed over network, queueing: {}", err);
                self.cache.store_progress(progress).await?;
                self.cache
                    .enqueue(OfflineQueueEntry::progress(progress.clone()))
                    .await?;
                Ok(ProgressWrite::Queued)
            }
        }
    }

    /// Replays one queued record. Unlike `submit_progress`, a failure here
    /// does not re-queue; the sync agent owns that decision.
    pub(crate) async fn replay_progress(&self, progress: &UserProgress) -> Result<(), ClientError> {
        let body = serde_json::to_value(progress)?;
        self.request(Method::POST, "/api/progress", Some(&body))
            .await?;
        Ok(())
    }

    /// Resets all server-side progress and wipes the local mirror and memo.
    pub async fn reset_progress(&self) -> Result<(), ClientError> {
        self.request(Method::DELETE, "/api/progress", None).await?;
        self.cache.clear_all().await?;
        self.memo_lock().clear();
        Ok(())
    }

    /// Eagerly fills empty cache namespaces while connectivity is available
    /// so later offline sessions have data to fall back to. Best-effort:
    /// failures are logged and ignored.
    pub async fn seed_offline_cache(&self) {
        if !self.is_online() {
            return;
        }
        if !self.cache.has_topics().await {
            match self.request(Method::GET, "/api/topics", None).await {
                Ok(value) => self.mirror(&Resource::Topics, &value).await,
                Err(err) => tracing::debug!("failed to seed offline topics: {}", err),
            }
        }
        if !self.cache.has_secrets().await {
            match self.request(Method::GET, "/api/secrets", None).await {
                Ok(value) => self.mirror(&Resource::Secrets, &value).await,
                Err(err) => tracing::debug!("failed to seed offline secrets: {}", err),
            }
        }
    }

    /// Mirrors topics/secrets responses into the offline cache. Mirror
    /// failures are logged, never surfaced to the caller.
    async fn mirror(&self, resource: &Resource, value: &Value) {
        let result = match resource {
            Resource::Topics => match serde_json::from_value::<Vec<Topic>>(value.clone()) {
                Ok(topics) => self.cache.store_topics(&topics).await,
                Err(err) => Err(err.into()),
            },
            Resource::Secrets => match serde_json::from_value::<Vec<SurgerySecret>>(value.clone()) {
                Ok(secrets) => self.cache.store_secrets(&secrets).await,
                Err(err) => Err(err.into()),
            },
            _ => Ok(()),
        };
        if let Err(err) = result {
            tracing::warn!("failed to mirror response into offline cache: {}", err);
        }
    }

    async fn into_json(response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let body = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                text
            };
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

//! Shared fakes for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use matchday::upstream::{RawResponse, Transport, UpstreamError};
use matchday::{CacheStore, FootballApi, UpstreamClient, UpstreamConfig};
use parking_lot::Mutex;
use reqwest::Url;
use serde_json::Value;

/// Transport answering from per-path response queues
///
/// Each request yields to the scheduler once before answering, so concurrent
/// callers interleave the way real network calls would.
#[derive(Default)]
pub struct FakeUpstream {
    routes: Mutex<HashMap<String, VecDeque<RawResponse>>>,
    requests: Mutex<Vec<Url>>,
}

impl FakeUpstream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a 200 response with the given JSON for a URL path
    pub fn respond(&self, path: &str, body: Value) {
        self.respond_status(path, 200, &body.to_string());
    }

    pub fn respond_status(&self, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(RawResponse::new(status, body));
    }

    /// Number of requests made to a URL path
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|url| url.path() == path)
            .count()
    }

    pub fn total_requests(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for FakeUpstream {
    async fn get(&self, url: Url) -> Result<RawResponse, UpstreamError> {
        tokio::task::yield_now().await;
        let path = url.path().to_string();
        self.requests.lock().push(url);
        self.routes
            .lock()
            .get_mut(&path)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| UpstreamError::Transport(format!("no response scripted for {path}")))
    }
}

/// Accessor layer over a fake upstream and a fresh cache store
pub fn api_with(upstream: Arc<FakeUpstream>) -> FootballApi {
    let config = UpstreamConfig {
        api_token: Some("test-token".to_string()),
        football_base_url: "https://api.test/v3/football".to_string(),
        odds_base_url: "https://api.test/v3/odds".to_string(),
        ..UpstreamConfig::default()
    };
    let client = UpstreamClient::with_transport(config, upstream);
    FootballApi::new(client, Arc::new(CacheStore::new()))
}

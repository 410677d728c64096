//! Scripted transport for unit tests

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Url;
use serde_json::Value;

use super::error::UpstreamError;
use super::transport::{RawResponse, Transport};

/// Replays queued responses in order and records every requested URL
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse, String>>>,
    urls: Mutex<Vec<Url>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: Value) {
        self.responses
            .lock()
            .push_back(Ok(RawResponse::new(200, body.to_string())));
    }

    pub fn push_status(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .push_back(Ok(RawResponse::new(status, body)));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.responses.lock().push_back(Err(message.to_string()));
    }

    pub fn call_count(&self) -> usize {
        self.urls.lock().len()
    }

    pub fn urls(&self) -> Vec<Url> {
        self.urls.lock().clone()
    }

    pub fn last_url(&self) -> Option<Url> {
        self.urls.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: Url) -> Result<RawResponse, UpstreamError> {
        self.urls.lock().push(url);
        match self.responses.lock().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(UpstreamError::Transport(message)),
            None => Err(UpstreamError::Transport("no scripted response left".to_string())),
        }
    }
}

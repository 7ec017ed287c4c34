//! In-memory stand-in for the upstream episode API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::api::ApiClient;
use crate::http::{HttpClient, HttpResponse};

pub const MOCK_BASE_URL: &str = "http://api.test/";

/// A raw episode record as the API would send it
pub fn raw_episode_json(id: &str) -> String {
    format!(
        r#"{{"id": "{id}", "title": "Episode {id}", "members": "Diego e Richard",
            "published_at": "2021-01-22 19:19:05", "thumbnail": "https://example.com/{id}.jpg",
            "description": "<p>About {id}</p>",
            "file": {{"url": "https://example.com/{id}.m4a", "type": "audio/x-m4a", "duration": 5898}}}}"#
    )
}

#[derive(Default)]
struct MockState {
    list: Vec<String>,
    episodes: HashMap<String, String>,
    fail_status: Option<u16>,
    requests: Vec<String>,
}

/// Serves `/episodes` and `/episodes/{id}` from canned JSON
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records returned by the list endpoint, newest first; each is also
    /// served by the single-record endpoint
    pub fn with_list(self, records: &[String]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.list = records.to_vec();
            for record in records {
                let value: serde_json::Value = serde_json::from_str(record).unwrap();
                let id = value["id"].as_str().unwrap().to_string();
                state.episodes.insert(id, record.clone());
            }
        }
        self
    }

    /// A record only reachable through the single-record endpoint
    pub fn with_episode(self, id: &str, record: String) -> Self {
        self.state
            .lock()
            .unwrap()
            .episodes
            .insert(id.to_string(), record);
        self
    }

    pub fn failing_with(self, status: u16) -> Self {
        self.set_failing(Some(status));
        self
    }

    /// Make every following request fail with `status`, or succeed again with `None`
    pub fn set_failing(&self, status: Option<u16>) {
        self.state.lock().unwrap().fail_status = status;
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn client(&self) -> ApiClient<MockApi> {
        ApiClient::new(self.clone(), MOCK_BASE_URL).unwrap()
    }

    fn respond(&self, url: &str) -> (u16, String) {
        let mut state = self.state.lock().unwrap();
        state.requests.push(url.to_string());

        if let Some(status) = state.fail_status {
            return (status, "upstream unavailable".to_string());
        }

        let url = Url::parse(url).unwrap();
        let segments: Vec<String> = url
            .path_segments()
            .unwrap()
            .map(String::from)
            .collect();

        match segments.as_slice() {
            [episodes] if episodes == "episodes" => {
                let limit = url
                    .query_pairs()
                    .find(|(key, _)| key == "_limit")
                    .and_then(|(_, value)| value.parse().ok())
                    .unwrap_or(usize::MAX);
                let page: Vec<_> = state.list.iter().take(limit).cloned().collect();
                (200, format!("[{}]", page.join(",")))
            }
            [episodes, id] if episodes == "episodes" => match state.episodes.get(id) {
                Some(record) => (200, record.clone()),
                None => (404, "{}".to_string()),
            },
            _ => (404, "{}".to_string()),
        }
    }
}

#[async_trait]
impl HttpClient for MockApi {
    async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let (status, body) = self.respond(url);
        Ok(HttpResponse {
            status,
            body: Bytes::from(body),
        })
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::http::HttpClient;

use super::raw::RawEpisode;

const EPISODES_PATH: &str = "episodes";

/// Client for the upstream episode API
#[derive(Clone)]
pub struct ApiClient<C> {
    http: C,
    base_url: Url,
}

impl<C: HttpClient> ApiClient<C> {
    /// Create a client rooted at `base_url`
    ///
    /// A missing trailing slash is added so relative paths resolve below
    /// the base instead of replacing its last segment.
    pub fn new(http: C, base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for the newest `limit` episodes, sorted by publication date
    pub fn list_url(&self, limit: usize) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(EPISODES_PATH)?;
        url.query_pairs_mut()
            .append_pair("_limit", &limit.to_string())
            .append_pair("_sort", "published_at")
            .append_pair("_order", "desc");
        Ok(url)
    }

    /// URL for a single episode; the id is encoded as one path segment
    pub fn episode_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(EPISODES_PATH)?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?
            .push(id);
        Ok(url)
    }

    /// Fetch up to `limit` episodes, newest first
    pub async fn list_episodes(&self, limit: usize) -> Result<Vec<RawEpisode>, ApiError> {
        let url = self.list_url(limit)?;
        self.fetch_json(url).await
    }

    /// Fetch exactly one episode by id
    pub async fn get_episode(&self, id: &str) -> Result<RawEpisode, ApiError> {
        let url = self.episode_url(id)?;
        self.fetch_json(url).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.as_str())
            .await
            .map_err(|e| ApiError::RequestFailed {
                url: url.to_string(),
                source: e,
            })?;

        if !response.is_success() {
            return Err(ApiError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| ApiError::JsonParseFailed {
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use bytes::Bytes;

    use crate::http::HttpResponse;

    #[derive(Clone, Default)]
    struct RecordingClient {
        status: u16,
        body: &'static str,
        requested: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl HttpClient for RecordingClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    const TWO_EPISODES: &str = r#"[
        {"id": "ep-2", "title": "Second", "members": "Ana", "published_at": "2021-02-01 10:00:00",
         "thumbnail": "https://example.com/2.jpg", "file": {"url": "https://example.com/2.m4a", "duration": 100}},
        {"id": "ep-1", "title": "First", "members": "Bia", "published_at": "2021-01-01 10:00:00",
         "thumbnail": "https://example.com/1.jpg", "file": {"url": "https://example.com/1.m4a", "duration": 200}}
    ]"#;

    fn client(status: u16, body: &'static str) -> (ApiClient<RecordingClient>, Arc<Mutex<Vec<String>>>) {
        let http = RecordingClient {
            status,
            body,
            ..Default::default()
        };
        let requested = http.requested.clone();
        (ApiClient::new(http, "http://localhost:3333").unwrap(), requested)
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let (api, _) = client(200, "[]");
        assert_eq!(api.base_url().as_str(), "http://localhost:3333/");

        let nested = ApiClient::new(RecordingClient::default(), "http://host/api/v1").unwrap();
        assert_eq!(
            nested.episode_url("x").unwrap().as_str(),
            "http://host/api/v1/episodes/x"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new(RecordingClient::default(), "not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(ApiClient::new(RecordingClient::default(), "mailto:me@example.com").is_err());
    }

    #[test]
    fn episode_ids_are_percent_encoded() {
        let (api, _) = client(200, "{}");
        assert_eq!(
            api.episode_url("a b/c").unwrap().as_str(),
            "http://localhost:3333/episodes/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn list_requests_sorted_bounded_page() {
        let (api, requested) = client(200, TWO_EPISODES);

        let episodes = api.list_episodes(12).await.unwrap();

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].id, "ep-2");
        assert_eq!(
            requested.lock().unwrap().as_slice(),
            ["http://localhost:3333/episodes?_limit=12&_sort=published_at&_order=desc"]
        );
    }

    #[tokio::test]
    async fn get_episode_requests_single_record() {
        let (api, requested) = client(
            200,
            r#"{"id": "ep-1", "title": "First", "published_at": "2021-01-01",
                "description": "<p>hi</p>", "file": {"url": "u", "duration": 1}}"#,
        );

        let episode = api.get_episode("ep-1").await.unwrap();

        assert_eq!(episode.title, "First");
        assert_eq!(
            requested.lock().unwrap().as_slice(),
            ["http://localhost:3333/episodes/ep-1"]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (api, _) = client(500, "oops");

        let err = api.list_episodes(2).await.unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let (api, _) = client(200, "<html>not json</html>");

        let err = api.get_episode("x").await.unwrap_err();
        assert!(matches!(err, ApiError::JsonParseFailed { .. }));
    }
}

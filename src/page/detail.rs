use std::time::Duration;

use chrono::Locale;
use log::debug;

use crate::api::ApiClient;
use crate::episode::{Detail, Episode};
use crate::error::{ApiError, PageError};
use crate::http::HttpClient;

use super::render::{Layout, render_episode};

/// Number of newest episodes whose pages are generated ahead of time
pub const PRERENDERED_EPISODE_LIMIT: usize = 2;

/// How long a generated episode page stays fresh
pub const EPISODE_REVALIDATE: Duration = Duration::from_secs(60 * 60 * 24);

/// Data behind an episode detail page
#[derive(Debug, Clone)]
pub struct EpisodePage {
    pub episode: Episode,
}

impl EpisodePage {
    pub fn render(&self, layout: &Layout) -> Result<String, PageError> {
        render_episode(&self.episode, layout)
    }
}

/// Ids of the episodes whose pages are generated ahead of time
///
/// Every other id is generated on first request.
pub async fn prerendered_episode_ids<C: HttpClient>(
    api: &ApiClient<C>,
) -> Result<Vec<String>, ApiError> {
    let raw = api.list_episodes(PRERENDERED_EPISODE_LIMIT).await?;
    Ok(raw.into_iter().map(|episode| episode.id).collect())
}

/// Fetch one episode and map it for its detail page
pub async fn build_episode_page<C: HttpClient>(
    api: &ApiClient<C>,
    id: &str,
    locale: Locale,
) -> Result<EpisodePage, PageError> {
    let raw = api.get_episode(id).await?;
    debug!("episode page: fetched {}", raw.id);

    Ok(EpisodePage {
        episode: Episode::from_raw(raw, Detail::Full, locale)?,
    })
}

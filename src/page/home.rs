use std::time::Duration;

use chrono::Locale;
use log::debug;

use crate::api::ApiClient;
use crate::episode::{Detail, Episode, EpisodeListing, partition_latest};
use crate::error::PageError;
use crate::http::HttpClient;

use super::render::{Layout, render_home};

/// Number of episodes requested for the home page
pub const HOME_EPISODE_LIMIT: usize = 12;

/// How long a generated home page stays fresh
pub const HOME_REVALIDATE: Duration = Duration::from_secs(60 * 60 * 8);

/// Data behind the home page
#[derive(Debug, Clone)]
pub struct HomePage {
    pub listing: EpisodeListing,
}

impl HomePage {
    pub fn render(&self, layout: &Layout) -> Result<String, PageError> {
        render_home(&self.listing, layout)
    }
}

/// Fetch the newest episodes and split them for the home page
///
/// Any upstream or formatting failure aborts the whole page; nothing
/// partial is returned.
pub async fn build_home_page<C: HttpClient>(
    api: &ApiClient<C>,
    locale: Locale,
) -> Result<HomePage, PageError> {
    let raw = api.list_episodes(HOME_EPISODE_LIMIT).await?;
    debug!("home page: {} episodes fetched", raw.len());

    let episodes = raw
        .into_iter()
        .map(|raw| Episode::from_raw(raw, Detail::Summary, locale))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HomePage {
        listing: partition_latest(episodes),
    })
}

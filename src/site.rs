// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use std::time::Duration;

use chrono::Locale;
use futures::future::try_join_all;
use log::info;

use crate::api::ApiClient;
use crate::cache::PageCache;
use crate::error::PageError;
use crate::format::DEFAULT_LOCALE;
use crate::http::HttpClient;
use crate::page::{
    EPISODE_REVALIDATE, HOME_REVALIDATE, Layout, build_episode_page, build_home_page,
    prerendered_episode_ids,
};

pub const HOME_ROUTE: &str = "/";

/// Cache key for an episode's detail page
pub fn episode_route(id: &str) -> String {
    format!("/episodes/{id}")
}

/// Settings for page generation
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Locale for published dates
    pub locale: Locale,
    pub layout: Layout,
    pub home_revalidate: Duration,
    pub episode_revalidate: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE,
            layout: Layout::default(),
            home_revalidate: HOME_REVALIDATE,
            episode_revalidate: EPISODE_REVALIDATE,
        }
    }
}

/// The generated site: page builders backed by a revalidating cache
pub struct Site<C> {
    api: ApiClient<C>,
    cache: PageCache,
    config: SiteConfig,
}

impl<C: HttpClient> Site<C> {
    pub fn new(api: ApiClient<C>, config: SiteConfig) -> Self {
        Self {
            api,
            cache: PageCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Generate the home page and the newest episodes' pages up front
    ///
    /// Returns the number of pages generated. Any failure aborts the whole
    /// run, as a failed static build would.
    pub async fn prerender(&self) -> Result<usize, PageError> {
        let home = self.generate_home().await?;
        self.cache.insert(HOME_ROUTE, home).await;

        let ids = prerendered_episode_ids(&self.api).await?;
        try_join_all(ids.iter().map(|id| async move {
            let html = self.generate_episode(id).await?;
            self.cache.insert(&episode_route(id), html).await;
            Ok::<_, PageError>(())
        }))
        .await?;

        let generated = ids.len() + 1;
        info!("pre-rendered {generated} pages");
        Ok(generated)
    }

    /// The home page, regenerated once older than the home window
    pub async fn home(&self) -> Result<Arc<str>, PageError> {
        self.cache
            .get_or_generate(HOME_ROUTE, self.config.home_revalidate, || {
                self.generate_home()
            })
            .await
    }

    /// An episode page; ids that were not pre-rendered are generated on demand
    pub async fn episode(&self, id: &str) -> Result<Arc<str>, PageError> {
        self.cache
            .get_or_generate(&episode_route(id), self.config.episode_revalidate, || {
                self.generate_episode(id)
            })
            .await
    }

    async fn generate_home(&self) -> Result<String, PageError> {
        build_home_page(&self.api, self.config.locale)
            .await?
            .render(&self.config.layout)
    }

    async fn generate_episode(&self, id: &str) -> Result<String, PageError> {
        build_episode_page(&self.api, id, self.config.locale)
            .await?
            .render(&self.config.layout)
    }
}

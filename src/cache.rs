// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::PageError;

/// A generated page and when it was generated
#[derive(Debug, Clone)]
struct CachedPage {
    html: Arc<str>,
    generated_at: Instant,
}

/// Result of looking a route up in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Generated within the revalidation window
    Fresh(Arc<str>),
    /// Older than the revalidation window; regenerate on this access
    Stale(Arc<str>),
    /// Never generated
    Missing,
}

/// Generated pages keyed by route, regenerated lazily once their window passes
#[derive(Debug, Default)]
pub struct PageCache {
    entries: RwLock<HashMap<String, CachedPage>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lookup(&self, route: &str, window: Duration) -> Lookup {
        let entries = self.entries.read().await;
        match entries.get(route) {
            Some(page) if page.generated_at.elapsed() < window => Lookup::Fresh(page.html.clone()),
            Some(page) => Lookup::Stale(page.html.clone()),
            None => Lookup::Missing,
        }
    }

    /// Store a freshly generated page, replacing any previous one
    pub async fn insert(&self, route: &str, html: impl Into<Arc<str>>) -> Arc<str> {
        let html = html.into();
        self.entries.write().await.insert(
            route.to_string(),
            CachedPage {
                html: html.clone(),
                generated_at: Instant::now(),
            },
        );
        html
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Serve `route` from the cache, generating it when missing or stale
    ///
    /// A missing page that fails to generate is an error. A stale page that
    /// fails to regenerate keeps being served until a later attempt succeeds.
    pub async fn get_or_generate<F, Fut>(
        &self,
        route: &str,
        window: Duration,
        generate: F,
    ) -> Result<Arc<str>, PageError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, PageError>>,
    {
        match self.lookup(route, window).await {
            Lookup::Fresh(html) => {
                debug!("{route}: served from cache");
                Ok(html)
            }
            Lookup::Missing => {
                let html = generate().await?;
                info!("{route}: generated");
                Ok(self.insert(route, html).await)
            }
            Lookup::Stale(previous) => match generate().await {
                Ok(html) => {
                    info!("{route}: regenerated");
                    Ok(self.insert(route, html).await)
                }
                Err(e) => {
                    warn!("{route}: regeneration failed, serving stale page: {e}");
                    Ok(previous)
                }
            },
        }
    }
}

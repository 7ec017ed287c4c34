use chrono::Locale;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::api::RawEpisode;
use crate::error::FormatError;
use crate::format::{duration_as_string, format_date};

/// Number of episodes highlighted at the top of the home page
pub const LATEST_COUNT: usize = 2;

/// Characters escaped when an id becomes a path segment (RFC 3986 unreserved are kept)
pub const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Render-ready form of an episode
///
/// Built from a raw API record for a single render pass and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    /// Original ISO-8601 timestamp
    #[serde(skip)]
    pub published_at_iso: String,
    /// Localized short date derived from `published_at_iso`
    pub published_at: String,
    pub thumbnail: String,
    /// HTML description, only present on detail pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub duration: u64,
    pub duration_as_string: String,
}

/// Which optional fields to carry over from the raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Summary,
    Full,
}

impl Episode {
    /// Map a raw API record into the display model
    pub fn from_raw(raw: RawEpisode, detail: Detail, locale: Locale) -> Result<Self, FormatError> {
        let duration = raw.file.duration.seconds()?;
        let published_at = format_date(&raw.published_at, locale)?;

        let description = match detail {
            Detail::Full => Some(raw.description.unwrap_or_default()),
            Detail::Summary => None,
        };

        Ok(Self {
            id: raw.id,
            title: raw.title,
            members: raw.members,
            published_at_iso: raw.published_at,
            published_at,
            thumbnail: raw.thumbnail,
            description,
            url: raw.file.url,
            duration,
            duration_as_string: duration_as_string(duration),
        })
    }

    /// Path of this episode's detail page
    pub fn href(&self) -> String {
        format!("/episodes/{}", utf8_percent_encode(&self.id, PATH_SEGMENT))
    }
}

/// Episodes split into the highlighted head and the remaining table rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeListing {
    pub latest: Vec<Episode>,
    pub rest: Vec<Episode>,
}

impl EpisodeListing {
    /// The combined, ordered list handed to the player
    pub fn playlist(&self) -> Vec<&Episode> {
        self.latest.iter().chain(self.rest.iter()).collect()
    }

    pub fn len(&self) -> usize {
        self.latest.len() + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty() && self.rest.is_empty()
    }
}

/// Split episodes into the first [`LATEST_COUNT`] and the remainder
///
/// Order is preserved; with fewer than [`LATEST_COUNT`] episodes everything
/// lands in `latest`.
pub fn partition_latest(mut episodes: Vec<Episode>) -> EpisodeListing {
    let split_at = episodes.len().min(LATEST_COUNT);
    let rest = episodes.split_off(split_at);

    EpisodeListing {
        latest: episodes,
        rest,
    }
}

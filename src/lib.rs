pub mod api;
pub mod cache;
pub mod episode;
pub mod error;
pub mod format;
pub mod http;
pub mod page;
pub mod server;
pub mod site;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use api::{ApiClient, RawEpisode};
pub use cache::{Lookup, PageCache};
pub use episode::{Episode, EpisodeListing, partition_latest};
pub use error::{ApiError, FormatError, PageError};
pub use format::{duration_as_string, format_date};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use page::Layout;
pub use server::routes;
pub use site::{Site, SiteConfig};

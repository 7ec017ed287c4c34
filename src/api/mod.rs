mod client;
mod raw;

pub use client::ApiClient;
pub use raw::{RawDuration, RawEpisode, RawFile};

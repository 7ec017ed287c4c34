use serde::{Deserialize, Deserializer};

use crate::error::FormatError;
use crate::format::{seconds_from_number, seconds_from_str};

/// An episode record as returned by the upstream API
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    pub published_at: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file: RawFile,
}

/// The audio file attached to a raw episode record
#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    pub url: String,
    pub duration: RawDuration,
}

/// Duration as the API sends it: a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Number(serde_json::Number),
    Text(String),
}

impl RawDuration {
    /// Whole seconds, rejecting negative or non-numeric values
    pub fn seconds(&self) -> Result<u64, FormatError> {
        match self {
            RawDuration::Number(number) => match number.as_u64() {
                Some(seconds) => Ok(seconds),
                None => number.as_f64().map_or_else(
                    || {
                        Err(FormatError::InvalidDuration {
                            value: number.to_string(),
                        })
                    },
                    seconds_from_number,
                ),
            },
            RawDuration::Text(text) => seconds_from_str(text),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

//! # GIF Search Feature
//!
//! Thin Tenor v2 search client for the /gif command.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with Tenor v2 search

use anyhow::{anyhow, Result};
use log::debug;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;

const TENOR_SEARCH_URL: &str = "https://tenor.googleapis.com/v2/search";

/// Results requested per search; one is picked at random.
const RESULT_LIMIT: u32 = 10;

/// Tenor v2 search client.
#[derive(Clone)]
pub struct TenorClient {
    api_key: String,
    client: reqwest::Client,
}

/// One search result. Tenor returns a map of transcode formats per result;
/// only the plain `gif` rendition is used.
#[derive(Debug, Clone, Deserialize)]
pub struct GifResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub media_formats: HashMap<String, MediaFormat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaFormat {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<GifResult>,
}

impl GifResult {
    /// URL of the plain GIF rendition, if Tenor provided one.
    pub fn gif_url(&self) -> Option<&str> {
        self.media_formats.get("gif").map(|m| m.url.as_str())
    }
}

impl TenorClient {
    pub fn new(api_key: String) -> Self {
        TenorClient {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Search Tenor for GIFs matching `term`.
    pub async fn search(&self, term: &str) -> Result<Vec<GifResult>> {
        debug!("Searching Tenor for '{term}'");

        let limit = RESULT_LIMIT.to_string();
        let response = self
            .client
            .get(TENOR_SEARCH_URL)
            .query(&[
                ("q", term),
                ("key", self.api_key.as_str()),
                ("limit", limit.as_str()),
                ("contentfilter", "medium"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Tenor returned HTTP {status}"));
        }

        let search: SearchResponse = response.json().await?;
        Ok(search.results)
    }
}

/// Pick a random result that actually carries a GIF URL.
pub fn pick_random(results: &[GifResult]) -> Option<&GifResult> {
    let usable: Vec<&GifResult> = results.iter().filter(|r| r.gif_url().is_some()).collect();
    if usable.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..usable.len());
    Some(usable[index])
}

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::nutrients::FoodRecord;
use crate::config::UsdaConfig;

/// Result of a single best-effort lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(FoodRecord),
    NotFound,
    TransportError(String),
}

#[async_trait]
pub trait FoodLookup: Send + Sync {
    /// False when no API credential is available.
    fn is_configured(&self) -> bool;

    /// Raw food objects from one search call.
    async fn search(&self, query: &str, page_size: u32) -> anyhow::Result<Vec<serde_json::Value>>;

    /// First match for `term`, one call, no retry.
    async fn first_match(&self, term: &str) -> LookupOutcome {
        let foods = match self.search(term, 1).await {
            Ok(foods) => foods,
            Err(e) => return LookupOutcome::TransportError(format!("{e:#}")),
        };
        match foods.into_iter().next() {
            None => LookupOutcome::NotFound,
            Some(raw) => match serde_json::from_value::<FoodRecord>(raw) {
                Ok(food) => LookupOutcome::Found(food),
                Err(e) => LookupOutcome::TransportError(format!("decode food: {e}")),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<serde_json::Value>,
}

/// FoodData Central client.
#[derive(Clone)]
pub struct UsdaClient {
    http: reqwest::Client,
    config: UsdaConfig,
}

impl UsdaClient {
    pub fn new(config: UsdaConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build usda http client")?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl FoodLookup for UsdaClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn search(&self, query: &str, page_size: u32) -> anyhow::Result<Vec<serde_json::Value>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .context("usda api key not configured")?;
        let url = format!("{}/foods/search", self.config.base_url.trim_end_matches('/'));
        let page_size = page_size.to_string();

        let resp = self
            .http
            .get(&url)
            .query(&[("api_key", api_key), ("query", query), ("pageSize", page_size.as_str())])
            .send()
            .await
            .context("usda search request")?
            .error_for_status()
            .context("usda search status")?;
        let body: SearchResponse = resp.json().await.context("usda search body")?;

        debug!(query, results = body.foods.len(), "usda search");
        Ok(body.foods)
    }
}

//! Nutrition lookup - thin client for a Spoonacular-compatible food database

use crate::config::NutritionConfig;
use crate::error::ApiError;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use trackit_shared::nutrition::{scale_to_serving, NutritionPer100g, ServingNutrition};
use trackit_shared::types::FoodSearchResult;

const DEFAULT_SEARCH_LIMIT: u32 = 10;
const MAX_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<FoodSearchResult>,
}

#[derive(Debug, Deserialize)]
struct IngredientInfo {
    id: i64,
    name: String,
    nutrition: NutrientList,
}

#[derive(Debug, Deserialize)]
struct NutrientList {
    #[serde(default)]
    nutrients: Vec<Nutrient>,
}

#[derive(Debug, Deserialize)]
struct Nutrient {
    name: String,
    amount: f64,
}

impl NutrientList {
    /// Amount of a named nutrient, 0 when the source omits it
    fn amount(&self, name: &str) -> f64 {
        self.nutrients
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(name))
            .map(|n| n.amount)
            .unwrap_or(0.0)
    }
}

/// Nutrition database client
#[derive(Clone)]
pub struct NutritionClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl NutritionClient {
    /// Build a client, or `None` when no API key is configured
    pub fn from_config(config: &NutritionConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build nutrition HTTP client")?;

        Ok(Some(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }))
    }

    /// Search ingredients by free text
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<FoodSearchResult>> {
        let url = format!("{}/food/ingredients/search", self.base_url);
        let number = limit.to_string();
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("number", number.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Nutrition search failed: {} - {}", status, text));
        }

        let data: SearchResponse = resp.json().await?;
        debug!(query, hits = data.results.len(), "Nutrition search");
        Ok(data.results)
    }

    /// Nutrition facts per 100 g for one ingredient
    pub async fn food_info(&self, id: i64) -> Result<NutritionPer100g> {
        let url = format!("{}/food/ingredients/{}/information", self.base_url, id);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("amount", "100"),
                ("unit", "g"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Nutrition lookup for {} failed: {} - {}", id, status, text));
        }

        let info: IngredientInfo = resp.json().await?;
        Ok(NutritionPer100g {
            source_id: info.id,
            calories: info.nutrition.amount("Calories"),
            protein_g: info.nutrition.amount("Protein"),
            carbs_g: info.nutrition.amount("Carbohydrates"),
            fat_g: info.nutrition.amount("Fat"),
            name: info.name,
        })
    }
}

/// Nutrition lookup operations exposed over HTTP
pub struct NutritionService;

impl NutritionService {
    pub async fn search(
        client: Option<&NutritionClient>,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Vec<FoodSearchResult>, ApiError> {
        let client = Self::require(client)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::invalid_field("query", "Search query is required"));
        }
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_SEARCH_LIMIT);

        client.search(query, limit).await.map_err(|e| {
            warn!(error = %e, "Nutrition search failed");
            ApiError::ServiceUnavailable("Nutrition database is unavailable".to_string())
        })
    }

    /// Nutrition for a serving of `grams` (100 g when not given)
    pub async fn serving(
        client: Option<&NutritionClient>,
        id: i64,
        grams: Option<f64>,
    ) -> Result<ServingNutrition, ApiError> {
        let client = Self::require(client)?;
        let grams = grams.unwrap_or(100.0);
        if !grams.is_finite() || grams <= 0.0 {
            return Err(ApiError::invalid_field("grams", "grams must be greater than 0"));
        }

        let per_100g = client.food_info(id).await.map_err(|e| {
            warn!(error = %e, food_id = id, "Nutrition lookup failed");
            ApiError::ServiceUnavailable("Nutrition database is unavailable".to_string())
        })?;

        Ok(scale_to_serving(&per_100g, grams))
    }

    fn require(client: Option<&NutritionClient>) -> Result<&NutritionClient, ApiError> {
        client.ok_or_else(|| {
            ApiError::ServiceUnavailable("Nutrition lookup is not configured".to_string())
        })
    }
}

use serde::{Deserialize, Serialize};

use super::nutrients::NutrientTotals;

#[derive(Debug, Deserialize)]
pub struct FoodQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct FoodsResponse {
    pub foods: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedIngredient {
    pub name: String,
    pub grams: f64,
    #[serde(flatten)]
    pub nutrients: Option<NutrientTotals>,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompositeResult {
    pub name: String,
    pub ingredients: Vec<ResolvedIngredient>,
    pub totals: NutrientTotals,
}

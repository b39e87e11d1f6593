use tracing::{debug, warn};

use super::catalog::{normalize, RecipeCatalog};
use super::dto::{CompositeResult, ResolvedIngredient};
use super::nutrients::NutrientTotals;
use super::usda::{FoodLookup, LookupOutcome};
use crate::error::ApiError;

const NOT_FOUND_MARKER: &str = "Could not find nutrition data";
const HINT_COUNT: usize = 5;

/// Expands a named dish into per-ingredient nutrition and totals.
///
/// Ingredients are looked up one after another. A failed or empty lookup
/// marks that ingredient `found: false` and the call still succeeds.
/// Totals are sums of the already rounded per-ingredient values, rounded
/// once more at the end.
pub async fn resolve_composite(
    catalog: &RecipeCatalog,
    foods: &dyn FoodLookup,
    raw_query: &str,
) -> Result<CompositeResult, ApiError> {
    let query = normalize(raw_query);
    if query.is_empty() {
        return Err(ApiError::InvalidInput("Query parameter required".into()));
    }
    if !foods.is_configured() {
        return Err(ApiError::Configuration("USDA API key not configured".into()));
    }

    let recipe = catalog.lookup(&query).ok_or_else(|| {
        ApiError::RecipeNotFound(format!(
            "No recipe found for \"{query}\". Try: {}, etc.",
            catalog.example_names(HINT_COUNT).join(", ")
        ))
    })?;
    debug!(query = %query, recipe = %recipe.name, "composite recipe matched");

    let mut ingredients = Vec::with_capacity(recipe.ingredients.len());
    let mut totals = NutrientTotals::default();

    for ing in &recipe.ingredients {
        let outcome = foods.first_match(&ing.search).await;
        let resolved = match outcome {
            LookupOutcome::Found(food) => {
                debug!(
                    search = %ing.search,
                    food = food.description.as_deref().unwrap_or("?"),
                    "food matched"
                );
                let values = NutrientTotals::scaled(&food, ing.grams);
                totals.add(&values);
                ResolvedIngredient {
                    name: ing.name.clone(),
                    grams: ing.grams,
                    nutrients: Some(values),
                    found: true,
                    error: None,
                }
            }
            LookupOutcome::NotFound => {
                debug!(search = %ing.search, "no food match for ingredient");
                unresolved(&ing.name, ing.grams)
            }
            LookupOutcome::TransportError(reason) => {
                warn!(search = %ing.search, %reason, "food lookup failed");
                unresolved(&ing.name, ing.grams)
            }
        };
        ingredients.push(resolved);
    }

    Ok(CompositeResult {
        name: title_case(&query),
        ingredients,
        totals: totals.rounded(),
    })
}

fn unresolved(name: &str, grams: f64) -> ResolvedIngredient {
    ResolvedIngredient {
        name: name.to_string(),
        grams,
        nutrients: None,
        found: false,
        error: Some(NOT_FOUND_MARKER.into()),
    }
}

/// Upper-cases the first letter of every alphabetic run.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub search: String,
    pub grams: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Deserialize)]
struct RecipeFile {
    ingredients: Vec<Ingredient>,
}

/// Read-only recipe table, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read recipe catalog {}", path.display()))?;
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("parse recipe catalog {}", path.display()))?;
        info!(recipes = catalog.len(), path = %path.display(), "recipe catalog loaded");
        Ok(catalog)
    }

    /// Parses `{"<name>": {"ingredients": [...]}}`, preserving key order.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;
        let mut recipes = Vec::with_capacity(map.len());
        for (key, value) in map {
            let file: RecipeFile = serde_json::from_value(value)
                .with_context(|| format!("recipe {key:?}"))?;
            for ing in &file.ingredients {
                anyhow::ensure!(
                    ing.grams.is_finite() && ing.grams > 0.0,
                    "recipe {key:?}: ingredient {:?} has non-positive grams",
                    ing.name
                );
            }
            recipes.push(Recipe {
                name: normalize(&key),
                ingredients: file.ingredients,
            });
        }
        Ok(Self { recipes })
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Exact key first, then the first key (in file order) that is contained
    /// in the query or contains it.
    pub fn lookup(&self, query: &str) -> Option<&Recipe> {
        let q = normalize(query);
        if q.is_empty() {
            return None;
        }
        self.recipes.iter().find(|r| r.name == q).or_else(|| {
            self.recipes
                .iter()
                .find(|r| q.contains(r.name.as_str()) || r.name.contains(q.as_str()))
        })
    }

    pub fn example_names(&self, n: usize) -> Vec<&str> {
        self.recipes.iter().take(n).map(|r| r.name.as_str()).collect()
    }
}

pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str) -> Recipe {
        Recipe {
            name: name.into(),
            ingredients: vec![Ingredient {
                name: "x".into(),
                search: "x".into(),
                grams: 1.0,
            }],
        }
    }

    #[test]
    fn exact_match_beats_earlier_substring() {
        let catalog = RecipeCatalog::new(vec![recipe("ham sandwich"), recipe("ham")]);
        assert_eq!(catalog.lookup("ham").unwrap().name, "ham");
        assert_eq!(catalog.lookup("  HAM ").unwrap().name, "ham");
    }

    #[test]
    fn substring_matches_in_both_directions() {
        let catalog = RecipeCatalog::new(vec![recipe("burger"), recipe("caesar salad")]);
        assert_eq!(catalog.lookup("double burger deluxe").unwrap().name, "burger");
        assert_eq!(catalog.lookup("caesar").unwrap().name, "caesar salad");
        assert!(catalog.lookup("pizza").is_none());
    }

    #[test]
    fn first_substring_match_in_file_order_wins() {
        let catalog = RecipeCatalog::new(vec![recipe("ham sandwich"), recipe("ham and cheese")]);
        assert_eq!(catalog.lookup("ha").unwrap().name, "ham sandwich");
    }

    #[test]
    fn blank_query_matches_nothing() {
        let catalog = RecipeCatalog::new(vec![recipe("burger")]);
        assert!(catalog.lookup("   ").is_none());
    }

    #[test]
    fn from_json_keeps_file_order_and_normalizes_keys() {
        let raw = r#"{
            "Zucchini Bread": {"ingredients": [{"name": "zucchini", "search": "zucchini raw", "grams": 50}]},
            "apple pie": {"ingredients": [{"name": "apple", "search": "apple raw", "grams": 80.5}]}
        }"#;
        let catalog = RecipeCatalog::from_json(raw).unwrap();
        assert_eq!(catalog.example_names(5), vec!["zucchini bread", "apple pie"]);
        let pie = catalog.lookup("apple pie").unwrap();
        assert_eq!(pie.ingredients[0].search, "apple raw");
        assert_eq!(pie.ingredients[0].grams, 80.5);
    }

    #[test]
    fn from_json_rejects_non_positive_grams() {
        let raw = r#"{"toast": {"ingredients": [{"name": "bread", "search": "bread", "grams": 0}]}}"#;
        let err = RecipeCatalog::from_json(raw).unwrap_err();
        assert!(format!("{err:#}").contains("non-positive grams"));
    }

    #[test]
    fn bundled_catalog_parses() {
        let raw = include_str!("../../composite_recipes.json");
        let catalog = RecipeCatalog::from_json(raw).unwrap();
        assert!(catalog.lookup("peanut butter sandwich").is_some());
        assert!(catalog.lookup("grilled cheese").is_some());
        assert_eq!(
            catalog.example_names(5),
            vec![
                "peanut butter sandwich",
                "ham sandwich",
                "grilled cheese",
                "burger",
                "caesar salad"
            ]
        );
    }
}

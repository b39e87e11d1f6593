use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One entry of a FoodData Central `foodNutrients` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientEntry {
    #[serde(default)]
    pub nutrient_name: String,
    /// FoodData Central sends `null` for some nutrients it lists.
    #[serde(default)]
    pub value: Option<f64>,
}

/// A food returned by the external search. Values are per 100 g.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<NutrientEntry>,
}

pub const ENERGY: &str = "Energy";
pub const PROTEIN: &str = "Protein";
pub const FAT: &str = "Total lipid (fat)";
pub const CARBS: &str = "Carbohydrate, by difference";
pub const FIBER: &str = "Fiber, total dietary";
pub const SUGAR: &str = "Sugars, total including NLEA";

/// Value of the first entry named exactly `target`, or 0.
///
/// A nutrient the database does not report, or reports as `null`, reads the
/// same as one reported as zero.
pub fn extract(nutrients: &[NutrientEntry], target: &str) -> f64 {
    nutrients
        .iter()
        .find(|n| n.nutrient_name == target)
        .and_then(|n| n.value)
        .unwrap_or(0.0)
}

/// Round to one decimal place, ties to even, on the exact stored value.
///
/// `1.15` is stored just below 1.15 and rounds to 1.1; `0.25` is exact and
/// goes to the even digit, 0.2.
pub fn round1(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// The six tracked nutrients, used both per ingredient and for totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
}

impl NutrientTotals {
    /// Per-ingredient values: each nutrient scaled by `grams / 100` and rounded.
    pub fn scaled(food: &FoodRecord, grams: f64) -> Self {
        let scale = grams / 100.0;
        let n = &food.food_nutrients;
        Self {
            calories: round1(extract(n, ENERGY) * scale),
            protein: round1(extract(n, PROTEIN) * scale),
            fat: round1(extract(n, FAT) * scale),
            carbs: round1(extract(n, CARBS) * scale),
            fiber: round1(extract(n, FIBER) * scale),
            sugar: round1(extract(n, SUGAR) * scale),
        }
    }

    pub fn add(&mut self, other: &NutrientTotals) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.fat += other.fat;
        self.carbs += other.carbs;
        self.fiber += other.fiber;
        self.sugar += other.sugar;
    }

    pub fn rounded(&self) -> Self {
        Self {
            calories: round1(self.calories),
            protein: round1(self.protein),
            fat: round1(self.fat),
            carbs: round1(self.carbs),
            fiber: round1(self.fiber),
            sugar: round1(self.sugar),
        }
    }
}

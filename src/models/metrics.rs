//! Diet metrics derived from a user's meal history.

use serde::{Deserialize, Serialize};

use super::meal::Meal;

/// Aggregate counts over a user's meals.
///
/// Serialized with the camelCase keys clients expect from `GET /meals/metrics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealMetrics {
    pub total_meals: u64,
    pub total_meal_diet: u64,
    pub total_not_meal_diet: u64,
    /// Longest run of consecutive in-diet meals.
    pub total_sequence_meal_diet: u64,
}

impl MealMetrics {
    /// Computes metrics over meals given in creation order.
    pub fn from_meals(meals: &[Meal]) -> Self {
        Self::from_flags(meals.iter().map(|meal| meal.inside_diet))
    }

    /// Computes metrics from a sequence of `inside_diet` flags in creation order.
    ///
    /// Single pass. The streak is a running maximum, so a later shorter run
    /// never replaces an earlier longer one.
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        let mut metrics = Self::default();
        let mut current_run = 0u64;
        let mut previous_inside = false;

        for inside_diet in flags {
            metrics.total_meals += 1;

            if inside_diet {
                metrics.total_meal_diet += 1;
                current_run = if previous_inside { current_run + 1 } else { 1 };
                metrics.total_sequence_meal_diet =
                    metrics.total_sequence_meal_diet.max(current_run);
            } else {
                metrics.total_not_meal_diet += 1;
            }

            previous_inside = inside_diet;
        }

        metrics
    }
}

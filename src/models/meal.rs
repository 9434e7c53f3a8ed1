use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A meal eaten by a user, flagged as inside or outside their diet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub inside_diet: bool,
    /// Session identity of the user who logged the meal.
    pub owner_id: String,
}

impl Meal {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        inside_diet: bool,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
            inside_diet,
            owner_id: owner_id.into(),
        }
    }

    #[cfg(test)]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Applies a partial update. Fields left as `None` keep their stored value.
    pub fn apply(&mut self, changes: MealChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(inside_diet) = changes.inside_diet {
            self.inside_diet = inside_diet;
        }
    }
}

/// Editable fields of a meal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub inside_diet: Option<bool>,
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.inside_diet { "in diet" } else { "off diet" };
        write!(f, "{} ({})", self.name, marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_new() {
        let meal = Meal::new("Salad", "Greens and olive oil", true, "user1");

        assert_eq!(meal.name, "Salad");
        assert_eq!(meal.description, "Greens and olive oil");
        assert!(meal.inside_diet);
        assert_eq!(meal.owner_id, "user1");
    }

    #[test]
    fn test_apply_partial_changes() {
        let mut meal = Meal::new("Salad", "Greens", true, "user1");

        meal.apply(MealChanges {
            inside_diet: Some(false),
            ..Default::default()
        });

        assert_eq!(meal.name, "Salad");
        assert_eq!(meal.description, "Greens");
        assert!(!meal.inside_diet);
    }

    #[test]
    fn test_apply_keeps_owner() {
        let mut meal = Meal::new("Pizza", "Pepperoni", false, "user1");
        let id = meal.id;

        meal.apply(MealChanges {
            name: Some("Calzone".into()),
            description: Some("Folded".into()),
            inside_diet: Some(true),
        });

        assert_eq!(meal.id, id);
        assert_eq!(meal.owner_id, "user1");
        assert_eq!(meal.name, "Calzone");
        assert_eq!(meal.description, "Folded");
        assert!(meal.inside_diet);
    }

    #[test]
    fn test_meal_display() {
        let meal = Meal::new("Burger", "Double cheese", false, "user1");
        assert_eq!(format!("{}", meal), "Burger (off diet)");
    }

    #[test]
    fn test_meal_json_field_names() {
        let meal = Meal::new("Salad", "Greens", true, "user1");
        let json = serde_json::to_value(&meal).unwrap();

        assert_eq!(json["name"], "Salad");
        assert_eq!(json["inside_diet"], true);
        assert_eq!(json["owner_id"], "user1");
        assert!(json["created_at"].is_string());
    }
}

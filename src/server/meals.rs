//! Meal CRUD and metrics handlers. All routes run behind the session gate.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::error::ApiError;
use super::session::SessionUser;
use super::AppState;
use crate::models::{Meal, MealChanges, MealMetrics};

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub description: String,
    pub inside_diet: bool,
}

/// Body of `PUT /meals/{id}`. Values are coerced rather than strictly typed.
///
/// A missing or empty name and a missing description keep the stored value.
/// `inside_diet` is always written: missing or `null` means `false`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMealRequest {
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::truthy")]
    pub inside_diet: bool,
}

impl From<UpdateMealRequest> for MealChanges {
    fn from(req: UpdateMealRequest) -> Self {
        MealChanges {
            name: req.name.filter(|name| !name.is_empty()),
            description: req.description,
            inside_diet: Some(req.inside_diet),
        }
    }
}

mod coerce {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Scalars become their string form; null counts as not provided.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            // Integral floats render without a fraction: 1.0 becomes "1"
            Value::Number(n) => Ok(Some(match n.as_f64() {
                Some(f) if n.is_f64() => f.to_string(),
                _ => n.to_string(),
            })),
            Value::Bool(b) => Ok(Some(b.to_string())),
            other => Err(D::Error::custom(format!(
                "expected a string, found {}",
                other
            ))),
        }
    }

    /// `false`, `0`, `""` and `null` are false, anything else is true.
    pub fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }
}

fn parse_meal_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation(format!("Invalid meal id '{}'", raw)))
}

/// `POST /meals`
pub async fn create_meal(
    State(state): State<AppState>,
    Extension(SessionUser(owner)): Extension<SessionUser>,
    payload: Result<Json<CreateMealRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload?;

    let meal = Meal::new(req.name, req.description, req.inside_diet, owner);
    state.meals.create(&meal).await?;

    tracing::info!(meal_id = %meal.id, owner = %meal.owner_id, "Created meal");
    Ok(StatusCode::CREATED)
}

/// `PUT /meals/{id}`
pub async fn update_meal(
    State(state): State<AppState>,
    Extension(SessionUser(owner)): Extension<SessionUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMealRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_meal_id(&id)?;
    let Json(req) = payload?;

    let mut meal = state
        .meals
        .get_for_owner(id, &owner)
        .await?
        .ok_or(ApiError::MealNotFound(id))?;

    meal.apply(req.into());

    if !state.meals.update(&meal).await? {
        return Err(ApiError::MealNotFound(id));
    }

    tracing::info!(meal_id = %id, owner = %owner, "Updated meal");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /meals/{id}`. Succeeds whether or not a meal was removed.
pub async fn delete_meal(
    State(state): State<AppState>,
    Extension(SessionUser(owner)): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_meal_id(&id)?;

    let removed = state.meals.delete_for_owner(id, &owner).await?;
    tracing::info!(meal_id = %id, owner = %owner, removed, "Deleted meal");

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /meals`
pub async fn list_meals(
    State(state): State<AppState>,
    Extension(SessionUser(owner)): Extension<SessionUser>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    Ok(Json(state.meals.list_by_owner(&owner).await?))
}

/// `GET /meals/{id}`. An unknown id yields 200 with an empty body.
pub async fn get_meal(
    State(state): State<AppState>,
    Extension(SessionUser(owner)): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_meal_id(&id)?;

    let response = match state.meals.get_for_owner(id, &owner).await? {
        Some(meal) => Json(meal).into_response(),
        None => StatusCode::OK.into_response(),
    };
    Ok(response)
}

/// `GET /meals/metrics`
pub async fn meal_metrics(
    State(state): State<AppState>,
    Extension(SessionUser(owner)): Extension<SessionUser>,
) -> Result<Json<MealMetrics>, ApiError> {
    let meals = state.meals.list_by_owner(&owner).await?;
    Ok(Json(MealMetrics::from_meals(&meals)))
}

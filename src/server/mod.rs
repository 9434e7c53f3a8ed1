//! HTTP layer of the meal tracking service.

pub mod error;
pub mod meals;
pub mod session;
pub mod users;

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::{MealRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub meals: MealRepository,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            meals: MealRepository::new(pool),
            config: Arc::new(config),
        }
    }
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    // Public routes (no session)
    let public_routes = Router::new()
        .route("/", get(index))
        .route("/users", post(users::create_user));

    // Session-gated routes
    let meal_routes = Router::new()
        .route("/meals", get(meals::list_meals).post(meals::create_meal))
        .route("/meals/metrics", get(meals::meal_metrics))
        .route(
            "/meals/{id}",
            get(meals::get_meal)
                .put(meals::update_meal)
                .delete(meals::delete_meal),
        )
        .route_layer(middleware::from_fn(session::require_session));

    Router::new()
        .merge(public_routes)
        .merge(meal_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct IndexResponse {
    env: String,
    date: DateTime<Utc>,
}

/// Liveness check (no session required)
async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        env: state.config.environment.clone(),
        date: Utc::now(),
    })
}

mod meal;
mod metrics;
mod user;

pub use meal::{Meal, MealChanges};
pub use metrics::MealMetrics;
pub use user::User;

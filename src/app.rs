use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/goals/main", post(handlers::form_add_main))
        .route("/goals/other", post(handlers::form_add_other))
        .route("/goals/:id/toggle", post(handlers::form_toggle_goal))
        .route("/goals/:id/delete", post(handlers::form_delete_goal))
        .route("/streak/check-in", post(handlers::form_check_in))
        .route("/timer/toggle", post(handlers::form_timer_toggle))
        .route("/timer/reset", post(handlers::form_timer_reset))
        .route("/timer/switch", post(handlers::form_timer_switch))
        .route("/api/goals", get(handlers::get_goals).post(handlers::add_goal))
        .route("/api/goals/:id", delete(handlers::delete_goal))
        .route("/api/goals/:id/toggle", post(handlers::toggle_goal))
        .route("/api/streak", get(handlers::get_streak))
        .route("/api/streak/check-in", post(handlers::check_in))
        .route("/api/timer", get(handlers::get_timer).post(handlers::timer_action))
        .with_state(state)
}

use crate::errors::AppError;
use crate::goals::{self, GOALS_KEY, GoalList};
use crate::models::{
    AddGoalRequest, GoalForm, GoalsResponse, StreakResponse, TimerRequest, TimerResponse,
};
use crate::state::AppState;
use crate::streak::{self, STREAK_KEY};
use crate::timer::TimerAction;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (goal_list, streak_data) = {
        let store = state.store.lock().await;
        (store.get(&GOALS_KEY), store.get(&STREAK_KEY))
    };
    let timer = state.clock.snapshot().await;
    let page = render_index(&goal_list, &streak::to_response(&streak_data), &timer)?;
    Ok(Html(page))
}

pub async fn get_goals(State(state): State<AppState>) -> Json<GoalsResponse> {
    let store = state.store.lock().await;
    Json(goals::to_response(&store.get(&GOALS_KEY)))
}

pub async fn add_goal(
    State(state): State<AppState>,
    Json(payload): Json<AddGoalRequest>,
) -> Result<Json<GoalsResponse>, AppError> {
    let list = if payload.main {
        update_goals(&state, |goals| goals.add_main(&payload.text).is_some()).await?
    } else {
        update_goals(&state, |goals| goals.add_other(&payload.text).is_some()).await?
    };
    Ok(Json(goals::to_response(&list)))
}

pub async fn toggle_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GoalsResponse>, AppError> {
    let list = update_goals(&state, |goals| goals.toggle(&id)).await?;
    Ok(Json(goals::to_response(&list)))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GoalsResponse>, AppError> {
    let list = update_goals(&state, |goals| goals.delete(&id)).await?;
    Ok(Json(goals::to_response(&list)))
}

pub async fn form_add_main(
    State(state): State<AppState>,
    Form(form): Form<GoalForm>,
) -> Result<Redirect, AppError> {
    update_goals(&state, |goals| goals.add_main(&form.text).is_some()).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_add_other(
    State(state): State<AppState>,
    Form(form): Form<GoalForm>,
) -> Result<Redirect, AppError> {
    update_goals(&state, |goals| goals.add_other(&form.text).is_some()).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_toggle_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    update_goals(&state, |goals| goals.toggle(&id)).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    update_goals(&state, |goals| goals.delete(&id)).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_streak(State(state): State<AppState>) -> Json<StreakResponse> {
    let store = state.store.lock().await;
    Json(streak::to_response(&store.get(&STREAK_KEY)))
}

pub async fn check_in(State(state): State<AppState>) -> Result<Json<StreakResponse>, AppError> {
    Ok(Json(apply_check_in(&state).await?))
}

pub async fn form_check_in(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_check_in(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_timer(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(state.clock.snapshot().await.to_response())
}

pub async fn timer_action(
    State(state): State<AppState>,
    Json(payload): Json<TimerRequest>,
) -> Result<Json<TimerResponse>, AppError> {
    let action = payload
        .action
        .parse::<TimerAction>()
        .map_err(AppError::bad_request)?;
    Ok(Json(state.clock.apply(action).await.to_response()))
}

pub async fn form_timer_toggle(State(state): State<AppState>) -> Redirect {
    state.clock.apply(TimerAction::Toggle).await;
    Redirect::to("/")
}

pub async fn form_timer_reset(State(state): State<AppState>) -> Redirect {
    state.clock.apply(TimerAction::Reset).await;
    Redirect::to("/")
}

pub async fn form_timer_switch(State(state): State<AppState>) -> Redirect {
    state.clock.apply(TimerAction::Switch).await;
    Redirect::to("/")
}

/// Reads the collection, applies `change`, and writes it back when `change`
/// reports a modification.
async fn update_goals<F>(state: &AppState, change: F) -> Result<GoalList, AppError>
where
    F: FnOnce(&mut GoalList) -> bool,
{
    let mut store = state.store.lock().await;
    let mut goals = store.get(&GOALS_KEY);
    if change(&mut goals) {
        store.write(&GOALS_KEY, &goals).await?;
        debug!(total = goals.len(), "goals saved");
    }
    Ok(goals)
}

async fn apply_check_in(state: &AppState) -> Result<StreakResponse, AppError> {
    let today = streak::today();
    let mut store = state.store.lock().await;
    let current = store.get(&STREAK_KEY);
    let updated = current.check_in_at(today);

    if updated != current {
        store.write(&STREAK_KEY, &updated).await?;
        info!(count = updated.count, "checked in");
    }

    Ok(streak::to_response_at(today, &updated))
}

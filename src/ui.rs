use crate::errors::AppError;
use crate::goals::{GoalList, completed_count};
use crate::models::{Goal, StreakResponse};
use crate::timer::{FocusTimer, format_clock};
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    streak: &'a StreakResponse,
    main_goals: Vec<&'a Goal>,
    other_goals: Vec<&'a Goal>,
    main_done: usize,
    other_done: usize,
    main_full: bool,
    switch_label: &'static str,
    clock: String,
    is_active: bool,
    hill_clip: String,
    climber_x: String,
    climber_y: String,
}

pub fn render_index(
    goals: &GoalList,
    streak: &StreakResponse,
    timer: &FocusTimer,
) -> Result<String, AppError> {
    let main_goals = goals.main_goals();
    let other_goals = goals.other_goals();
    let climber = timer.climber_position();

    let page = IndexTemplate {
        streak,
        main_done: completed_count(&main_goals),
        other_done: completed_count(&other_goals),
        main_full: goals.is_main_full(),
        main_goals,
        other_goals,
        switch_label: timer.mode.switch_label(),
        clock: format_clock(timer.time_left_seconds),
        is_active: timer.is_active,
        hill_clip: format!("{:.2}", 100.0 - timer.progress() * 100.0),
        climber_x: format!("{:.2}", climber.x),
        climber_y: format!("{:.2}", climber.y),
    };
    page.render().map_err(AppError::internal)
}

use crate::timer::{Point, TimerMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub is_main: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    pub count: u32,
    pub last_check_in: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddGoalRequest {
    pub text: String,
    #[serde(default)]
    pub main: bool,
}

#[derive(Debug, Deserialize)]
pub struct GoalForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TimerRequest {
    pub action: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalsResponse {
    pub main_goals: Vec<Goal>,
    pub other_goals: Vec<Goal>,
    pub main_completed: usize,
    pub other_completed: usize,
    pub main_full: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub count: u32,
    pub last_check_in: Option<String>,
    pub checked_in_today: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimerResponse {
    pub mode: TimerMode,
    pub time_left_seconds: u32,
    pub is_active: bool,
    pub display: String,
    pub progress: f64,
    pub climber: Point,
}

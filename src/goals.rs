use crate::models::{Goal, GoalsResponse};
use crate::storage::Key;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const GOALS_KEY: Key<GoalList> = Key::new("intambwe-goals");

pub const MAX_MAIN_GOALS: usize = 3;

/// Goals in insertion order. Main and other goals share one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalList {
    goals: Vec<Goal>,
}

impl GoalList {
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn main_goals(&self) -> Vec<&Goal> {
        self.goals.iter().filter(|goal| goal.is_main).collect()
    }

    pub fn other_goals(&self) -> Vec<&Goal> {
        self.goals.iter().filter(|goal| !goal.is_main).collect()
    }

    pub fn is_main_full(&self) -> bool {
        self.goals.iter().filter(|goal| goal.is_main).count() >= MAX_MAIN_GOALS
    }

    /// Returns the created goal, or `None` when the text is blank or the main
    /// list already holds three goals.
    pub fn add_main(&mut self, text: &str) -> Option<&Goal> {
        if self.is_main_full() {
            return None;
        }
        self.push(text, true)
    }

    pub fn add_other(&mut self, text: &str) -> Option<&Goal> {
        self.push(text, false)
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        match self.goals.iter_mut().find(|goal| goal.id == id) {
            Some(goal) => {
                goal.completed = !goal.completed;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.goals.len();
        self.goals.retain(|goal| goal.id != id);
        self.goals.len() != before
    }

    fn push(&mut self, text: &str, is_main: bool) -> Option<&Goal> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.goals.push(Goal {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            is_main,
        });
        self.goals.last()
    }
}

pub fn completed_count(goals: &[&Goal]) -> usize {
    goals.iter().filter(|goal| goal.completed).count()
}

pub fn to_response(list: &GoalList) -> GoalsResponse {
    let main_goals = list.main_goals();
    let other_goals = list.other_goals();

    GoalsResponse {
        main_completed: completed_count(&main_goals),
        other_completed: completed_count(&other_goals),
        main_full: list.is_main_full(),
        main_goals: main_goals.into_iter().cloned().collect(),
        other_goals: other_goals.into_iter().cloned().collect(),
    }
}

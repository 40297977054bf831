use crate::models::TimerResponse;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const FOCUS_SECONDS: u32 = 25 * 60;
pub const BREAK_SECONDS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Focus,
    Break,
}

impl TimerMode {
    pub fn duration_seconds(self) -> u32 {
        match self {
            TimerMode::Focus => FOCUS_SECONDS,
            TimerMode::Break => BREAK_SECONDS,
        }
    }

    pub fn other(self) -> TimerMode {
        match self {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        }
    }

    pub fn switch_label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Switch to Break",
            TimerMode::Break => "Switch to Focus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Toggle,
    Reset,
    Switch,
}

impl FromStr for TimerAction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "toggle" => Ok(TimerAction::Toggle),
            "reset" => Ok(TimerAction::Reset),
            "switch" => Ok(TimerAction::Switch),
            other => Err(format!("unknown timer action '{other}'")),
        }
    }
}

/// Transitions take the timer by value and return the next state. Ticking is
/// driven from outside, see [`crate::ticker::FocusClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTimer {
    pub mode: TimerMode,
    pub time_left_seconds: u32,
    pub is_active: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(TimerMode::Focus)
    }
}

impl FocusTimer {
    pub fn new(mode: TimerMode) -> Self {
        Self {
            mode,
            time_left_seconds: mode.duration_seconds(),
            is_active: false,
        }
    }

    /// Starting an expired countdown refills it to the full mode duration.
    pub fn toggle(self) -> Self {
        if self.is_active {
            return Self {
                is_active: false,
                ..self
            };
        }

        let time_left_seconds = if self.time_left_seconds == 0 {
            self.mode.duration_seconds()
        } else {
            self.time_left_seconds
        };

        Self {
            time_left_seconds,
            is_active: true,
            ..self
        }
    }

    pub fn reset(self) -> Self {
        Self::new(self.mode)
    }

    pub fn switch_mode(self) -> Self {
        Self::new(self.mode.other())
    }

    pub fn apply(self, action: TimerAction) -> Self {
        match action {
            TimerAction::Toggle => self.toggle(),
            TimerAction::Reset => self.reset(),
            TimerAction::Switch => self.switch_mode(),
        }
    }

    pub fn tick(self) -> Self {
        if !self.is_active || self.time_left_seconds == 0 {
            return Self {
                is_active: false,
                ..self
            };
        }

        let time_left_seconds = self.time_left_seconds - 1;
        Self {
            time_left_seconds,
            is_active: time_left_seconds > 0,
            ..self
        }
    }

    pub fn progress(&self) -> f64 {
        let total = self.mode.duration_seconds();
        let left = self.time_left_seconds.min(total);
        f64::from(total - left) / f64::from(total)
    }

    pub fn climber_position(&self) -> Point {
        CLIMB_PATH.at(self.progress())
    }

    pub fn to_response(&self) -> TimerResponse {
        TimerResponse {
            mode: self.mode,
            time_left_seconds: self.time_left_seconds,
            is_active: self.is_active,
            display: format_clock(self.time_left_seconds),
            progress: self.progress(),
            climber: self.climber_position(),
        }
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// Hill outline in a 100x100 box, y growing downwards.
pub const CLIMB_PATH: CubicBezier = CubicBezier {
    p0: Point::new(0.0, 80.0),
    p1: Point::new(20.0, 80.0),
    p2: Point::new(40.0, 20.0),
    p3: Point::new(100.0, 20.0),
};

impl CubicBezier {
    /// Evaluates the curve at `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f64) -> Point {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Point::new(
            axis(t, self.p0.x, self.p1.x, self.p2.x, self.p3.x),
            axis(t, self.p0.y, self.p1.y, self.p2.y, self.p3.y),
        )
    }
}

fn axis(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let c = 3.0 * (p1 - p0);
    let b = 3.0 * (p2 - p1) - c;
    let a = p3 - p0 - c - b;
    a * t.powi(3) + b * t.powi(2) + c * t + p0
}

use crate::timer::{FocusTimer, TimerAction};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::debug;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Aborts the tick task when dropped.
#[derive(Debug)]
struct Ticker(JoinHandle<()>);

impl Drop for Ticker {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug, Default)]
struct FocusSession {
    timer: FocusTimer,
    ticker: Option<Ticker>,
}

/// Shared focus timer plus the task that drives it. A tick task runs only
/// while the timer is active.
#[derive(Debug, Clone, Default)]
pub struct FocusClock {
    session: Arc<Mutex<FocusSession>>,
}

impl FocusClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> FocusTimer {
        self.session.lock().await.timer
    }

    pub async fn is_ticking(&self) -> bool {
        let session = self.session.lock().await;
        session
            .ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.0.is_finished())
    }

    pub async fn apply(&self, action: TimerAction) -> FocusTimer {
        let mut session = self.session.lock().await;
        let next = session.timer.apply(action);
        session.timer = next;

        if next.is_active {
            if session.ticker.is_none() {
                session.ticker = Some(spawn_ticker(Arc::downgrade(&self.session)));
            }
        } else {
            session.ticker = None;
        }

        debug!(?action, mode = ?next.mode, left = next.time_left_seconds, active = next.is_active, "timer updated");
        next
    }

    /// Pauses the timer and cancels any running tick task.
    pub async fn stop(&self) {
        let mut session = self.session.lock().await;
        session.timer.is_active = false;
        session.ticker = None;
    }
}

fn spawn_ticker(session: Weak<Mutex<FocusSession>>) -> Ticker {
    Ticker(tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_PERIOD);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            let Some(shared) = session.upgrade() else {
                break;
            };
            let mut guard = shared.lock().await;
            guard.timer = guard.timer.tick();
            if !guard.timer.is_active {
                debug!(mode = ?guard.timer.mode, "countdown finished");
                guard.ticker = None;
                break;
            }
        }
    }))
}

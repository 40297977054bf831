pub mod app;
pub mod errors;
pub mod goals;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod streak;
pub mod ticker;
pub mod timer;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{KvStore, resolve_data_path};

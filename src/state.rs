use crate::storage::KvStore;
use crate::ticker::FocusClock;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<KvStore>>,
    pub clock: FocusClock,
}

impl AppState {
    pub fn new(store: KvStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            clock: FocusClock::new(),
        }
    }
}

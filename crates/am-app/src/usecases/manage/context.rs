use std::sync::Arc;

use am_core::manage::ManageState;
use tokio::sync::Mutex;

/// Shared management context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: Used only for `dispatch` operations to serialize concurrent calls.
/// - `state`: Used for both reading (`get_state`) and writing (during `dispatch`).
#[derive(Clone)]
pub struct ManageContext {
    state: Arc<Mutex<ManageState>>,
    /// Serializes dispatch calls so that a command is always evaluated
    /// against the snapshot left by the previous one.
    dispatch_lock: Arc<Mutex<()>>,
}

impl ManageContext {
    pub fn new(initial_state: ManageState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> ManageState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Only call while holding `dispatch_lock`.
    pub async fn set_state(&self, state: ManageState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }
}

impl Default for ManageContext {
    fn default() -> Self {
        Self::new(ManageState::Loading)
    }
}

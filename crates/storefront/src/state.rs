//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::error::AppError;
use crate::render::CartSnapshot;
use crate::storage::DynStorage;
use crate::widget::{CartAction, CartWidget};

/// Widget over whichever storage adapter the server was started with.
pub type SharedWidget = CartWidget<DynStorage>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The widget sits behind a
/// mutex so requests mutate the cart one at a time.
#[derive(Clone)]
pub struct AppState {
    widget: Arc<Mutex<SharedWidget>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(widget: SharedWidget) -> Self {
        Self {
            widget: Arc::new(Mutex::new(widget)),
        }
    }

    /// Lock the widget for reading.
    pub async fn widget(&self) -> MutexGuard<'_, SharedWidget> {
        self.widget.lock().await
    }

    /// Apply an action on the blocking pool and return the repainted snapshot.
    ///
    /// Mutations write the cart slot synchronously, so they must not run on
    /// an async worker. The widget stays locked until the write finishes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the blocking task panics or is
    /// cancelled.
    pub async fn dispatch(&self, action: CartAction) -> Result<CartSnapshot, AppError> {
        let mut widget = Arc::clone(&self.widget).lock_owned().await;
        tokio::task::spawn_blocking(move || widget.dispatch(action).clone())
            .await
            .map_err(|e| AppError::Internal(format!("cart update task failed: {e}")))
    }
}

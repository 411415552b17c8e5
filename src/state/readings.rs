//! Readings Cache
//!
//! Cached reading list plus the fetch/mutate operations the pages use.
//! Cache discipline is invalidate-on-mutation: a successful create or
//! delete bumps `version`, and the fetch effect refetches. Fetches run as
//! independent spawned tasks; a result arriving after the user navigated
//! away is simply written into the cache and otherwise ignored.

use leptos::*;

use crate::api::client;
use crate::api::ApiError;
use crate::model::{Identity, Reading, ReadingDraft};
use crate::state::session::SessionState;

#[derive(Clone, Copy)]
pub struct ReadingsState {
    /// Readings descending by `logged_at`; `None` until the first fetch
    /// completes.
    pub readings: RwSignal<Option<Vec<Reading>>>,
    pub loading: RwSignal<bool>,
    /// Set when the last fetch failed; pages show a loading-failed state
    /// with no data.
    pub failed: RwSignal<bool>,
    /// Cache version, bumped by successful mutations to trigger a refetch.
    pub version: RwSignal<u32>,
    /// Transient error message (toast).
    pub error: RwSignal<Option<String>>,
    /// Transient success message (toast).
    pub success: RwSignal<Option<String>>,
}

/// Provide the readings cache to the component tree.
pub fn provide_readings() {
    let state = ReadingsState {
        readings: create_rw_signal(None),
        loading: create_rw_signal(false),
        failed: create_rw_signal(false),
        version: create_rw_signal(0),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };
    provide_context(state);
}

pub fn use_readings() -> ReadingsState {
    use_context::<ReadingsState>().expect("ReadingsState not found")
}

impl ReadingsState {
    /// Mark the cached list stale; the fetch effect refetches.
    pub fn invalidate(&self) {
        self.version.update(|v| *v += 1);
    }

    /// Drop cached data, e.g. after sign-out.
    pub fn clear(&self) {
        self.readings.set(None);
        self.failed.set(false);
    }

    /// Show a success message (auto-clears after timeout).
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout).
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error.set(None);
        })
        .forget();
    }
}

/// Keep the cache in sync with the session and the cache version: fetch
/// on sign-in and after every invalidation, clear on sign-out.
pub fn init_readings_sync(readings: ReadingsState, session: SessionState) {
    create_effect(move |_| {
        // Subscribe to invalidation
        let _ = readings.version.get();

        if !session.signed_in() {
            readings.clear();
            return;
        }

        spawn_local(async move {
            readings.loading.set(true);
            readings.failed.set(false);
            match client::list_readings().await {
                Ok(rows) => {
                    readings.readings.set(Some(rows));
                }
                Err(e) => {
                    readings.failed.set(true);
                    readings.show_error(&e.to_string());
                    // An expired session sends the user back to sign-in
                    if e.is_auth() {
                        session.identity.set(None);
                    }
                }
            }
            readings.loading.set(false);
        });
    });
}

/// Create a reading and invalidate the cache. Single attempt; on failure
/// the cache and the caller's form are left untouched so the user can
/// resubmit.
pub async fn add_reading(
    readings: ReadingsState,
    owner: &Identity,
    draft: ReadingDraft,
) -> Result<(), ApiError> {
    client::create_reading(&owner.id, &draft).await?;
    readings.invalidate();
    readings.show_success("Glucose reading logged successfully!");
    Ok(())
}

/// Delete a reading by id and invalidate the cache.
pub async fn remove_reading(readings: ReadingsState, id: &str) -> Result<(), ApiError> {
    client::delete_reading(id).await?;
    readings.invalidate();
    readings.show_success("Reading deleted successfully");
    Ok(())
}

//! Session State
//!
//! Explicit context object holding the current authenticated identity.
//! Populated once at startup from the stored token, updated by sign-in
//! and sign-out, and observed reactively by every gated page; identity
//! changes propagate through the signal graph, so route guards react to
//! sign-in/sign-out without polling.

use leptos::*;

use crate::api::client;
use crate::model::Identity;

#[derive(Clone, Copy)]
pub struct SessionState {
    /// Current authenticated identity, `None` when signed out.
    pub identity: RwSignal<Option<Identity>>,
    /// Whether the initial session lookup has completed. Route guards
    /// render a spinner instead of redirecting until this is set.
    pub checked: RwSignal<bool>,
}

/// Provide session state to the component tree and start the initial
/// session lookup.
pub fn provide_session() {
    let state = SessionState {
        identity: create_rw_signal(None),
        checked: create_rw_signal(false),
    };
    provide_context(state);

    spawn_local(async move {
        match client::current_identity().await {
            Ok(identity) => state.identity.set(identity),
            Err(e) => {
                web_sys::console::warn_1(&format!("Session lookup failed: {e}").into());
            }
        }
        state.checked.set(true);
    });
}

pub fn use_session() -> SessionState {
    use_context::<SessionState>().expect("SessionState not found")
}

impl SessionState {
    pub fn signed_in(&self) -> bool {
        self.identity.with(Option::is_some)
    }

    /// Sign out. The remote call is best-effort: whatever it returns, the
    /// local token and identity are cleared and the user ends up signed
    /// out on this client.
    pub fn sign_out(&self) {
        let identity = self.identity;
        spawn_local(async move {
            if let Err(e) = client::sign_out().await {
                web_sys::console::warn_1(
                    &format!("Remote sign-out failed, clearing local session anyway: {e}")
                        .into(),
                );
            }
            identity.set(None);
        });
    }
}

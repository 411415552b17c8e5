//! App Root Component
//!
//! Main application component with routing, global providers, and route
//! guards tied to the session state.

use leptos::*;
use leptos_router::*;

use crate::components::{Loading, Nav, Toast};
use crate::pages::{AddLog, AuthPage, Charts, Dashboard, History, Landing, Profile};
use crate::state::readings::init_readings_sync;
use crate::state::{provide_readings, provide_session, use_readings, use_session};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_session();
    provide_readings();

    // Keep the readings cache in sync with the session
    init_readings_sync(use_readings(), use_session());

    let session = use_session();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col">
                // Navigation header, only for signed-in users
                {move || session.signed_in().then(|| view! { <Nav /> })}

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=|| view! { <PublicOnly page=Landing /> } />
                        <Route path="/auth" view=|| view! { <PublicOnly page=AuthPage /> } />
                        <Route path="/dashboard" view=|| view! { <Guarded page=Dashboard /> } />
                        <Route path="/add-log" view=|| view! { <Guarded page=AddLog /> } />
                        <Route path="/history" view=|| view! { <Guarded page=History /> } />
                        <Route path="/charts" view=|| view! { <Guarded page=Charts /> } />
                        <Route path="/profile" view=|| view! { <Guarded page=Profile /> } />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Route guard for signed-in pages. Shows a spinner until the initial
/// session lookup finishes, then either renders the page or redirects to
/// the auth screen. Reacts to sign-out the same way.
#[component]
fn Guarded<F, IV>(page: F) -> impl IntoView
where
    F: Fn() -> IV + 'static,
    IV: IntoView,
{
    let session = use_session();

    move || {
        if !session.checked.get() {
            view! { <Loading /> }.into_view()
        } else if session.signed_in() {
            page().into_view()
        } else {
            view! { <Redirect path="/auth" /> }.into_view()
        }
    }
}

/// Inverse guard for the landing and auth pages: signed-in users are sent
/// straight to the dashboard.
#[component]
fn PublicOnly<F, IV>(page: F) -> impl IntoView
where
    F: Fn() -> IV + 'static,
    IV: IntoView,
{
    let session = use_session();

    move || {
        if !session.checked.get() {
            view! { <Loading /> }.into_view()
        } else if session.signed_in() {
            view! { <Redirect path="/dashboard" /> }.into_view()
        } else {
            page().into_view()
        }
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-600 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg \
                       font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}

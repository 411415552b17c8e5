//! Auth Page
//!
//! Email/password sign-in and sign-up against the hosted auth provider.
//! Errors are shown inline on this page rather than as toasts.

use leptos::*;

use crate::api::client;
use crate::state::use_session;

#[derive(Clone, Copy, PartialEq)]
enum AuthMode {
    SignIn,
    SignUp,
}

/// Auth page component
#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session();

    let (mode, set_mode) = create_signal(AuthMode::SignIn);
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);
    let (info, set_info) = create_signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email = email.get();
        let password = password.get();
        if email.is_empty() || password.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);
        set_info.set(None);

        let current_mode = mode.get();
        spawn_local(async move {
            match current_mode {
                AuthMode::SignIn => match client::sign_in(&email, &password).await {
                    Ok(identity) => {
                        // Route guards react to the identity change and
                        // move the user to the dashboard
                        session.identity.set(Some(identity));
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                },
                AuthMode::SignUp => match client::sign_up(&email, &password).await {
                    Ok((identity, true)) => {
                        session.identity.set(Some(identity));
                    }
                    Ok((_, false)) => {
                        set_info.set(Some(
                            "Check your email to confirm your account, then sign in."
                                .to_string(),
                        ));
                        set_mode.set(AuthMode::SignIn);
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                },
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-gradient-to-br from-blue-50 via-white to-green-50 \
                    flex items-center justify-center p-4">
            <div class="max-w-md w-full">
                // Header
                <div class="text-center mb-8">
                    <div class="text-4xl mb-3">"🩸"</div>
                    <h1 class="text-2xl font-bold text-gray-900">"Glucose Tracker"</h1>
                    <p class="text-gray-600 mt-2">"Sign in to manage your glucose levels"</p>
                </div>

                // Auth form
                <div class="bg-white rounded-xl p-8 shadow-lg border border-gray-100">
                    // Mode toggle
                    <div class="flex bg-gray-100 rounded-lg p-1 mb-6">
                        <ModeButton
                            label="Sign In"
                            current=mode
                            target=AuthMode::SignIn
                            on_click=move |_| set_mode.set(AuthMode::SignIn)
                        />
                        <ModeButton
                            label="Sign Up"
                            current=mode
                            target=AuthMode::SignUp
                            on_click=move |_| set_mode.set(AuthMode::SignUp)
                        />
                    </div>

                    <form on:submit=on_submit class="space-y-4">
                        <div>
                            <label class="block text-sm text-gray-600 mb-2">"Email"</label>
                            <input
                                type="email"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                class="w-full px-4 py-3 border border-gray-200 rounded-lg \
                                       focus:border-blue-500 focus:outline-none"
                            />
                        </div>
                        <div>
                            <label class="block text-sm text-gray-600 mb-2">"Password"</label>
                            <input
                                type="password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                class="w-full px-4 py-3 border border-gray-200 rounded-lg \
                                       focus:border-blue-500 focus:outline-none"
                            />
                        </div>

                        // Inline error / info
                        {move || error.get().map(|e| view! {
                            <p class="text-sm text-red-600">{e}</p>
                        })}
                        {move || info.get().map(|i| view! {
                            <p class="text-sm text-blue-600">{i}</p>
                        })}

                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-gray-300 \
                                   text-white rounded-lg py-3 font-semibold transition-colors"
                        >
                            {move || {
                                if submitting.get() {
                                    "Please wait..."
                                } else if mode.get() == AuthMode::SignIn {
                                    "Sign In"
                                } else {
                                    "Create Account"
                                }
                            }}
                        </button>
                    </form>
                </div>

                // Footer
                <div class="text-center mt-6">
                    <p class="text-sm text-gray-500">
                        "By signing in, you agree to our terms of service and privacy policy."
                    </p>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ModeButton(
    label: &'static str,
    current: ReadSignal<AuthMode>,
    target: AuthMode,
    on_click: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            on:click=on_click
            class=move || {
                let base = "flex-1 px-3 py-2 rounded-md text-sm font-medium transition-colors";
                if current.get() == target {
                    format!("{base} bg-white text-blue-600 shadow-sm")
                } else {
                    format!("{base} text-gray-600 hover:text-gray-900")
                }
            }
        >
            {label}
        </button>
    }
}

//! Navigation Component
//!
//! Header navigation bar with brand, links, and sign-out.

use leptos::*;
use leptos_router::*;

use crate::state::use_session;

/// Navigation header, shown on signed-in pages.
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let on_sign_out = move |_| {
        session.sign_out();
        navigate("/", Default::default());
    };

    view! {
        <nav class="bg-white border-b border-gray-100 shadow-sm">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/dashboard" class="flex items-center space-x-3">
                        <span class="text-2xl">"🩸"</span>
                        <span class="text-xl font-bold text-gray-900">"Glucose Tracker"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        <NavLink href="/dashboard" label="Dashboard" />
                        <NavLink href="/add-log" label="Add Log" />
                        <NavLink href="/history" label="History" />
                        <NavLink href="/charts" label="Charts" />
                        <NavLink href="/profile" label="Profile" />
                        <button
                            on:click=on_sign_out
                            class="px-4 py-2 rounded-lg text-gray-600 hover:text-gray-900 hover:bg-gray-100 transition-colors"
                        >
                            "Sign Out"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-600 hover:text-gray-900 hover:bg-gray-100 transition-colors"
            active_class="bg-blue-50 text-blue-700"
        >
            {label}
        </A>
    }
}

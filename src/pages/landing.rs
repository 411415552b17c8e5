//! Landing Page
//!
//! Public marketing page shown to signed-out visitors.

use leptos::*;
use leptos_router::*;

/// Landing page component
#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gradient-to-br from-blue-50 via-white to-green-50">
            <div class="container mx-auto px-4 py-16">
                // Hero
                <div class="text-center max-w-2xl mx-auto">
                    <div class="text-6xl mb-6">"🩸"</div>
                    <h1 class="text-4xl lg:text-5xl font-bold text-gray-900 mb-4">
                        "Take Control of Your Glucose"
                    </h1>
                    <p class="text-lg text-gray-600 mb-8">
                        "Log readings in seconds, spot trends over weeks, and keep your \
                         numbers in range. Built for people managing diabetes every day."
                    </p>
                    <A
                        href="/auth"
                        class="inline-block px-8 py-4 bg-blue-600 hover:bg-blue-700 text-white \
                               rounded-xl font-semibold text-lg transition-colors"
                    >
                        "Get Started"
                    </A>
                </div>

                // Feature highlights
                <div class="grid md:grid-cols-3 gap-8 mt-20 max-w-4xl mx-auto">
                    <Feature
                        icon="📝"
                        title="Quick Logging"
                        body="A guided five-step flow captures meal context, time, level, and notes."
                    />
                    <Feature
                        icon="📈"
                        title="Trend Charts"
                        body="Daily, weekly, and quarterly views with your target range shaded in."
                    />
                    <Feature
                        icon="📤"
                        title="Your Data, Portable"
                        body="Export everything as CSV or JSON whenever you want it."
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn Feature(
    icon: &'static str,
    title: &'static str,
    body: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl p-6 shadow-sm border border-gray-100 text-center">
            <div class="text-4xl mb-3">{icon}</div>
            <h3 class="text-lg font-semibold text-gray-900 mb-2">{title}</h3>
            <p class="text-sm text-gray-600">{body}</p>
        </div>
    }
}

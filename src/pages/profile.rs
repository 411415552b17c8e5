//! Profile Page
//!
//! Account details, usage stats, and the full JSON data export.

use chrono::{Local, Utc};
use leptos::*;

use crate::export;
use crate::state::{use_readings, use_session};
use crate::stats::{average_per_day, days_active};

/// Profile page component
#[component]
pub fn Profile() -> impl IntoView {
    let session = use_session();
    let readings = use_readings();

    let email = move || {
        session
            .identity
            .with(|id| id.as_ref().map(|id| id.email.clone()))
            .unwrap_or_default()
    };
    let member_since = move || {
        session
            .identity
            .with(|id| {
                id.as_ref().map(|id| {
                    id.created_at
                        .with_timezone(&Local)
                        .format("%B %-d, %Y")
                        .to_string()
                })
            })
            .unwrap_or_default()
    };

    let total = move || readings.readings.get().map(|r| r.len()).unwrap_or(0);
    let active_days = move || days_active(&readings.readings.get().unwrap_or_default());
    let per_day = move || average_per_day(&readings.readings.get().unwrap_or_default());

    let on_export = move |_| {
        let Some(identity) = session.identity.get() else {
            return;
        };
        let Some(rows) = readings.readings.get() else {
            return;
        };
        let json = export::json_export(&identity, &rows, Utc::now());
        let filename = export::json_filename(Local::now().date_naive());
        export::download(&filename, &json);
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold text-gray-900">"Profile"</h1>
                <p class="text-gray-600 mt-1">"Your account and data"</p>
            </div>

            // Account info
            <div class="bg-white rounded-xl p-6 shadow-sm border border-gray-100">
                <h2 class="text-lg font-semibold text-gray-900 mb-4">"Account"</h2>
                <div class="space-y-3">
                    <InfoRow label="Email" value=Signal::derive(email) />
                    <InfoRow label="Member since" value=Signal::derive(member_since) />
                    <InfoRow
                        label="Total readings"
                        value=Signal::derive(move || total().to_string())
                    />
                </div>
            </div>

            // Usage stats
            <div class="bg-white rounded-xl p-6 shadow-sm border border-gray-100">
                <h2 class="text-lg font-semibold text-gray-900 mb-4">"Quick Stats"</h2>
                <div class="grid grid-cols-2 gap-4">
                    <div class="text-center p-4 bg-blue-50 rounded-lg">
                        <p class="text-3xl font-bold text-blue-600">{active_days}</p>
                        <p class="text-sm text-gray-600 mt-1">"Days active"</p>
                    </div>
                    <div class="text-center p-4 bg-green-50 rounded-lg">
                        <p class="text-3xl font-bold text-green-600">
                            {move || format!("{:.0}", per_day())}
                        </p>
                        <p class="text-sm text-gray-600 mt-1">"Avg readings per day"</p>
                    </div>
                </div>
            </div>

            // Data export
            <div class="bg-white rounded-xl p-6 shadow-sm border border-gray-100">
                <h2 class="text-lg font-semibold text-gray-900 mb-2">"Export Your Data"</h2>
                <p class="text-sm text-gray-600 mb-4">
                    "Download a complete copy of your account and readings as JSON. \
                     For a spreadsheet-friendly CSV, use the export on the History page."
                </p>
                <button
                    on:click=on_export
                    disabled=move || readings.readings.get().is_none()
                    class="px-4 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-300 \
                           text-white rounded-lg transition-colors"
                >
                    "Download JSON"
                </button>
            </div>
        </div>
    }
}

#[component]
fn InfoRow(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="flex justify-between py-2 border-b border-gray-100 last:border-0">
            <span class="text-gray-600">{label}</span>
            <span class="font-medium text-gray-900">{move || value.get()}</span>
        </div>
    }
}

//! Stat Card Component
//!
//! Displays one aggregate statistic with an optional hint line.

use leptos::*;

/// Summary statistic card
#[component]
pub fn StatCard(
    /// Statistic name
    #[prop(into)]
    label: String,
    /// Formatted value
    #[prop(into)]
    value: String,
    /// Secondary line under the value
    #[prop(optional, into)]
    hint: Option<String>,
    /// Tailwind text color class for the value
    #[prop(default = "text-gray-900")]
    accent: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl p-6 shadow-sm border border-gray-100">
            <h3 class="text-sm font-medium text-gray-600 mb-2">{label}</h3>
            <p class=format!("text-3xl font-bold {accent}")>{value}</p>
            {hint.map(|h| view! {
                <p class="text-xs text-gray-500 mt-1">{h}</p>
            })}
        </div>
    }
}

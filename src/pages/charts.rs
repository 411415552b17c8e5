//! Charts Page
//!
//! Trend visualization over a selectable time window, with a per-window
//! summary panel next to the chart.

use chrono::Local;
use leptos::*;

use crate::components::{GlucoseChart, StatCard};
use crate::state::use_readings;
use crate::stats::{
    build_chart_series, filter_by_window, window_summary, TimeWindow, Trend,
};

/// Charts page component
#[component]
pub fn Charts() -> impl IntoView {
    let readings = use_readings();

    let (window, set_window) = create_signal(TimeWindow::Last7Days);

    let filtered = create_memo(move |_| {
        let rows = readings.readings.get().unwrap_or_default();
        filter_by_window(&rows, window.get(), Local::now())
    });

    let series = Signal::derive(move || build_chart_series(&filtered.get(), window.get()));
    let summary = create_memo(move |_| window_summary(&filtered.get()));

    view! {
        <div class="space-y-6">
            // Header with window selector
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold text-gray-900">"Glucose Trends"</h1>
                    <p class="text-gray-600 mt-1">"Visualize your readings over time"</p>
                </div>
                <select
                    on:change=move |ev| {
                        if let Some(w) = TimeWindow::from_key(&event_target_value(&ev)) {
                            set_window.set(w);
                        }
                    }
                    class="px-4 py-2 border border-gray-200 rounded-lg \
                           focus:border-blue-500 focus:outline-none"
                >
                    {TimeWindow::ALL_WINDOWS.into_iter().map(|w| view! {
                        <option
                            value=w.key()
                            selected=move || window.get() == w
                        >
                            {w.label()}
                        </option>
                    }).collect_view()}
                </select>
            </div>

            // Window summary
            {move || {
                let s = summary.get();
                if s.count == 0 {
                    return ().into_view();
                }
                let trend = match s.trend {
                    Trend::Up => "↗ Rising",
                    Trend::Down => "↘ Falling",
                    Trend::Flat => "→ Steady",
                };
                view! {
                    <div class="grid grid-cols-2 lg:grid-cols-5 gap-4">
                        <StatCard
                            label="Average"
                            value=format!("{:.0} mg/dL", s.average)
                        />
                        <StatCard
                            label="Lowest"
                            value=format!("{:.0} mg/dL", s.lowest)
                            accent="text-amber-600"
                        />
                        <StatCard
                            label="Highest"
                            value=format!("{:.0} mg/dL", s.highest)
                            accent="text-red-600"
                        />
                        <StatCard
                            label="In Range"
                            value=format!("{:.0}%", s.in_range_percentage)
                            hint="90-140 mg/dL"
                            accent="text-green-600"
                        />
                        <StatCard
                            label="Trend"
                            value=trend.to_string()
                            hint=format!("{} readings", s.count)
                            accent="text-blue-600"
                        />
                    </div>
                }.into_view()
            }}

            // Chart
            <div class="bg-white rounded-xl p-6 shadow-sm border border-gray-100">
                <GlucoseChart series=series />
            </div>

            // Target range legend
            <div class="bg-green-50 border border-green-200 rounded-xl p-4">
                <p class="text-sm text-green-800">
                    <span class="font-semibold">"Target range: "</span>
                    "the shaded band marks 90-140 mg/dL. Readings inside the band \
                     count toward the In Range percentage above."
                </p>
            </div>
        </div>
    }
}

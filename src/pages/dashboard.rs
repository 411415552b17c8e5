//! Dashboard Page
//!
//! Overview screen: aggregate statistics, quick actions, and the most
//! recent readings.

use chrono::{Local, Utc};
use leptos::*;
use leptos_router::*;

use crate::components::loading::CardSkeleton;
use crate::components::{ReadingCard, StatCard};
use crate::state::{use_readings, use_session};
use crate::stats::compute_stats;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_session();
    let readings = use_readings();

    let stats = create_memo(move |_| {
        readings
            .readings
            .get()
            .map(|rows| compute_stats(&rows, Utc::now()))
    });

    let greeting = move || {
        session
            .identity
            .with(|id| id.as_ref().map(|id| id.email.clone()))
            .map(|email| format!("Welcome back, {email}"))
            .unwrap_or_default()
    };

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold text-gray-900">"Dashboard"</h1>
                <p class="text-gray-600 mt-1">{greeting}</p>
            </div>

            // Stat cards
            {move || {
                match stats.get() {
                    None => view! {
                        <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view(),
                    Some(stats) => {
                        let latest_value = stats
                            .latest
                            .as_ref()
                            .map(|r| format!("{:.0} mg/dL", r.level))
                            .unwrap_or_else(|| "No data".to_string());
                        let latest_hint = stats.latest.as_ref().map(|r| {
                            r.logged_at
                                .with_timezone(&Local)
                                .format("%b %-d, %-I:%M %p")
                                .to_string()
                        });
                        let average_value = if stats.average_7_days > 0.0 {
                            format!("{:.0} mg/dL", stats.average_7_days)
                        } else {
                            "No data".to_string()
                        };

                        view! {
                            <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                                <StatCard
                                    label="Latest Reading"
                                    value=latest_value
                                    hint=latest_hint.unwrap_or_default()
                                    accent="text-blue-600"
                                />
                                <StatCard
                                    label="7-Day Average"
                                    value=average_value
                                    hint="Rolling window"
                                />
                                <StatCard
                                    label="Total Readings"
                                    value=stats.total_logs.to_string()
                                    hint="All time"
                                />
                                <StatCard
                                    label="Time in Range"
                                    value=format!("{:.0}%", stats.time_in_range_percentage)
                                    hint="80-140 mg/dL"
                                    accent="text-green-600"
                                />
                            </div>
                        }.into_view()
                    }
                }
            }}

            // Quick actions
            <div class="grid md:grid-cols-3 gap-4">
                <QuickAction
                    href="/add-log"
                    icon="➕"
                    title="Add Reading"
                    body="Log your latest glucose measurement"
                />
                <QuickAction
                    href="/history"
                    icon="🗂"
                    title="View History"
                    body="Browse, filter, and export your readings"
                />
                <QuickAction
                    href="/charts"
                    icon="📈"
                    title="View Charts"
                    body="Visualize your glucose trends"
                />
            </div>

            // Recent readings
            <section>
                <h2 class="text-lg font-semibold text-gray-900 mb-4">"Recent Readings"</h2>
                {move || {
                    let recent: Vec<_> = readings
                        .readings
                        .get()
                        .unwrap_or_default()
                        .into_iter()
                        .take(5)
                        .collect();

                    if recent.is_empty() {
                        view! {
                            <div class="bg-white rounded-xl p-8 text-center shadow-sm border border-gray-100">
                                <p class="text-gray-600">
                                    "No readings yet. Add your first one to get started."
                                </p>
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="space-y-3">
                                {recent.into_iter().map(|reading| view! {
                                    <ReadingCard reading=reading />
                                }).collect_view()}
                            </div>
                        }.into_view()
                    }
                }}
            </section>
        </div>
    }
}

#[component]
fn QuickAction(
    href: &'static str,
    icon: &'static str,
    title: &'static str,
    body: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="bg-white rounded-xl p-6 shadow-sm border border-gray-100 \
                   hover:border-blue-200 hover:shadow transition-all block"
        >
            <div class="text-3xl mb-2">{icon}</div>
            <h3 class="font-semibold text-gray-900">{title}</h3>
            <p class="text-sm text-gray-600 mt-1">{body}</p>
        </A>
    }
}
